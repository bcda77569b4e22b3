//! Theme stylesheets for highlighted code.

use syntect::highlighting::ThemeSet;
use syntect::html::css_for_theme_with_class_style;

use crate::code_pretty::CLASS_STYLE;
use crate::error::RenderError;
use crate::theme::Theme;

pub const DEFAULT_LIGHT_CODE_THEME: &str = "InspiredGitHub";
pub const DEFAULT_DARK_CODE_THEME: &str = "base16-ocean.dark";

/// Pre-generated highlight CSS for both colour themes.
///
/// Swapped into the page whenever the colour theme changes.
#[derive(Debug, Clone)]
pub struct SyntaxCss {
    light: String,
    dark: String,
}

impl SyntaxCss {
    pub fn generate(light_theme: &str, dark_theme: &str) -> Result<Self, RenderError> {
        let themes = ThemeSet::load_defaults();
        let css_for = |name: &str| -> Result<String, RenderError> {
            let theme = themes
                .themes
                .get(name)
                .ok_or_else(|| RenderError::UnknownSyntaxTheme(name.to_string()))?;
            Ok(css_for_theme_with_class_style(theme, CLASS_STYLE)?)
        };
        Ok(Self {
            light: css_for(light_theme)?,
            dark: css_for(dark_theme)?,
        })
    }

    pub fn generate_default() -> Result<Self, RenderError> {
        Self::generate(DEFAULT_LIGHT_CODE_THEME, DEFAULT_DARK_CODE_THEME)
    }

    pub fn for_theme(&self, theme: Theme) -> &str {
        match theme {
            Theme::Light => &self.light,
            Theme::Dark => &self.dark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_css_is_prefixed() {
        let css = SyntaxCss::generate_default().unwrap();
        assert!(css.for_theme(Theme::Light).contains(".hl-"));
        assert_ne!(css.for_theme(Theme::Light), css.for_theme(Theme::Dark));
    }

    #[test]
    fn test_unknown_theme_is_reported() {
        let err = SyntaxCss::generate("nope", DEFAULT_DARK_CODE_THEME).unwrap_err();
        assert!(matches!(err, RenderError::UnknownSyntaxTheme(name) if name == "nope"));
    }
}
