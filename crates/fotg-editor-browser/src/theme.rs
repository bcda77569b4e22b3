//! Applying the colour theme to the page.

use fotg_editor_core::fotg_renderer::{SyntaxCss, Theme};
use wasm_bindgen::JsValue;
use web_sys::{Element, Event};

use crate::dom::{by_id, set_style};

/// Window event broadcast after every theme switch.
pub const THEME_CHANGED_EVENT: &str = "theme-changed";

const SYNTAX_STYLE_ID: &str = "syntax-theme";

/// Whether the system asks for a dark colour scheme.
pub fn system_prefers_dark() -> bool {
    gloo_utils::window()
        .match_media("(prefers-color-scheme: dark)")
        .ok()
        .flatten()
        .is_some_and(|query| query.matches())
}

/// Update the root `data-theme` attribute, the toggle icons and the code
/// highlighting stylesheet.
pub fn apply(theme: Theme, syntax_css: Option<&SyntaxCss>) {
    let root = gloo_utils::document_element();
    if let Err(e) = root.set_attribute("data-theme", theme.as_str()) {
        tracing::warn!("could not set data-theme: {:?}", e);
    }

    let (shown, hidden) = if theme.is_dark() {
        ("sun-icon", "moon-icon")
    } else {
        ("moon-icon", "sun-icon")
    };
    if let Some(icon) = by_id::<Element>(shown) {
        set_style(&icon, "display", "block");
    }
    if let Some(icon) = by_id::<Element>(hidden) {
        set_style(&icon, "display", "none");
    }

    if let Some(css) = syntax_css {
        match syntax_style_element() {
            Ok(style) => style.set_text_content(Some(css.for_theme(theme))),
            Err(e) => tracing::warn!("could not install syntax stylesheet: {:?}", e),
        }
    }
}

/// The `<style>` element holding highlight CSS, created in `<head>` on first use.
fn syntax_style_element() -> Result<Element, JsValue> {
    if let Some(existing) = by_id::<Element>(SYNTAX_STYLE_ID) {
        return Ok(existing);
    }
    let document = gloo_utils::document();
    let style = document.create_element("style")?;
    style.set_id(SYNTAX_STYLE_ID);
    if let Some(head) = document.head() {
        head.append_child(&style)?;
    }
    Ok(style)
}

/// Tell listeners the theme changed.
pub fn broadcast_change() -> Result<(), JsValue> {
    let event = Event::new(THEME_CHANGED_EVENT)?;
    gloo_utils::window().dispatch_event(&event)?;
    Ok(())
}
