//! Page-supplied configuration.

use fotg_editor_core::EditorConfig;
use web_sys::Element;

use crate::dom::by_id;

/// Id of the optional `<script type="application/json">` holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "fotg-config";

/// Read the configuration embedded in the page, falling back to defaults when
/// it is absent or invalid.
pub fn load() -> EditorConfig {
    let Some(json) = by_id::<Element>(CONFIG_ELEMENT_ID).and_then(|el| el.text_content()) else {
        return EditorConfig::default();
    };
    match EditorConfig::from_json(&json) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(error = %err, "ignoring page configuration");
            EditorConfig::default()
        }
    }
}
