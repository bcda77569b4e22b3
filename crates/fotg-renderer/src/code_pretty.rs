//! Class-based syntax highlighting for preview code blocks.

use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

/// Prefix for every class syntect emits, so theme CSS cannot collide with
/// page styles.
pub const CSS_PREFIX: &str = "hl-";

pub const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: CSS_PREFIX };

pub struct Highlighter {
    syntax_set: SyntaxSet,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
        }
    }

    /// Highlight `code` as `lang` into `out` (the inner HTML of a `<code>`).
    ///
    /// Returns `Ok(false)` without writing anything when the language is not
    /// known, so the caller can keep the block as plain text.
    pub fn highlight(&self, lang: &str, code: &str, out: &mut String) -> Result<bool, syntect::Error> {
        let Some(syntax) = self.syntax_set.find_syntax_by_token(lang) else {
            return Ok(false);
        };
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, CLASS_STYLE);
        for line in LinesWithEndings::from(code) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }
        out.push_str(&generator.finalize());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_language_gets_spans() {
        let h = Highlighter::new();
        let mut out = String::new();
        assert!(h.highlight("rust", "fn main() {}\n", &mut out).unwrap());
        assert!(out.contains("<span class=\"hl-"));
        assert!(out.contains("main"));
    }

    #[test]
    fn test_unknown_language_is_left_alone() {
        let h = Highlighter::new();
        let mut out = String::new();
        assert!(!h.highlight("no-such-lang", "x", &mut out).unwrap());
        assert!(out.is_empty());
    }

    #[test]
    fn test_markup_in_code_is_escaped() {
        let h = Highlighter::new();
        let mut out = String::new();
        h.highlight("html", "<b>hi</b>\n", &mut out).unwrap();
        assert!(!out.contains("<b>"));
        assert!(out.contains("&lt;"));
    }
}
