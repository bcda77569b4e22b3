//! Editor configuration.
//!
//! Every field has a default; a page may override any subset by embedding a
//! JSON object (see [`EditorConfig::from_json`]).

use std::time::Duration;

use fotg_renderer::ExportOptions;
use fotg_renderer::css::{DEFAULT_DARK_CODE_THEME, DEFAULT_LIGHT_CODE_THEME};
use serde::{Deserialize, Serialize};

use crate::debounce::DEFAULT_DEBOUNCE_MS;
use crate::error::EditorError;
use crate::storage::{CONTENT_KEY, PANE_WIDTH_KEY, THEME_KEY};

pub const DEFAULT_PLACEHOLDER: &str = "# Welcome to Markdown Viewer\n\nStart typing your markdown here...";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Quiet period before the preview re-renders, in milliseconds.
    pub debounce_ms: u64,
    /// Document shown when nothing was saved.
    pub placeholder: String,
    /// Whether scroll sync starts enabled.
    pub sync_scroll: bool,
    pub keys: StorageKeys,
    pub resize: ResizeConfig,
    /// Window width (px) at or below which the mobile tab layout applies.
    pub mobile_breakpoint: f64,
    pub export: ExportOptions,
    pub syntax_themes: SyntaxThemes,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
            sync_scroll: true,
            keys: StorageKeys::default(),
            resize: ResizeConfig::default(),
            mobile_breakpoint: 768.0,
            export: ExportOptions::default(),
            syntax_themes: SyntaxThemes::default(),
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON configuration object.
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Storage keys for persisted state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub content: String,
    pub pane_width: String,
    pub theme: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            content: CONTENT_KEY.to_owned(),
            pane_width: PANE_WIDTH_KEY.to_owned(),
            theme: THEME_KEY.to_owned(),
        }
    }
}

/// Minimum pane widths kept by the resizer, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    pub mouse_min_width: f64,
    pub touch_min_width: f64,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            mouse_min_width: 200.0,
            touch_min_width: 100.0,
        }
    }
}

/// Bundled syntect theme names used for code highlighting CSS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxThemes {
    pub light: String,
    pub dark: String,
}

impl Default for SyntaxThemes {
    fn default() -> Self {
        Self {
            light: DEFAULT_LIGHT_CODE_THEME.to_owned(),
            dark: DEFAULT_DARK_CODE_THEME.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EditorConfig::from_json(r#"{"debounce_ms": 150, "resize": {"touch_min_width": 80}}"#)
            .unwrap();
        assert_eq!(config.debounce_delay(), Duration::from_millis(150));
        assert_eq!(config.resize.touch_min_width, 80.0);
        assert_eq!(config.resize.mouse_min_width, 200.0);
        assert_eq!(config.keys.content, "fotg-content");
        assert_eq!(config.placeholder, DEFAULT_PLACEHOLDER);
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(EditorConfig::from_json("{}").unwrap(), EditorConfig::default());
    }

    #[test]
    fn test_invalid_json_is_a_config_error() {
        let err = EditorConfig::from_json("[1, 2").unwrap_err();
        assert!(matches!(err, EditorError::Config(_)));
    }
}
