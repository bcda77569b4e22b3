use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>?").unwrap());

/// Word and character counts shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocumentStats {
    pub words: usize,
    pub chars: usize,
}

impl DocumentStats {
    /// Words are counted on the converted HTML with all tags stripped;
    /// characters on the raw markdown, markup included, in UTF-16 code units
    /// as the browser reports string length.
    pub fn compute(markdown: &str, converted_html: &str) -> Self {
        let text = TAG_RE.replace_all(converted_html, "");
        Self {
            words: text.split_whitespace().count(),
            chars: markdown.encode_utf16().count(),
        }
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

impl fmt::Display for DocumentStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} word{} | {} char{}",
            self.words,
            plural(self.words),
            self.chars,
            plural(self.chars)
        )
    }
}
