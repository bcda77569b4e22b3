//! HTML sanitization for the preview pane.
//!
//! Wraps an `ammonia` builder extended with the media tags produced by
//! [`expand_video_embeds`](crate::preprocess::expand_video_embeds), so embedded
//! videos survive cleaning.

/// Tags added on top of ammonia's defaults.
pub const EXTRA_TAGS: &[&str] = &["video", "source"];

/// Attributes allowed on every tag on top of ammonia's defaults.
///
/// `class` keeps the `language-*` markers the highlight and diagram passes
/// look for.
pub const EXTRA_ATTRIBUTES: &[&str] = &["controls", "src", "style", "class"];

pub struct Sanitizer {
    builder: ammonia::Builder<'static>,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sanitizer {
    pub fn new() -> Self {
        let mut builder = ammonia::Builder::default();
        builder
            .add_tags(EXTRA_TAGS)
            .add_generic_attributes(EXTRA_ATTRIBUTES);
        Self { builder }
    }

    pub fn clean(&self, html: &str) -> String {
        self.builder.clean(html).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_scripts_and_handlers() {
        let s = Sanitizer::new();
        let out = s.clean(r#"<p onclick="x()">hi</p><script>alert(1)</script>"#);
        assert!(!out.contains("script"));
        assert!(!out.contains("onclick"));
        assert!(out.contains("<p>hi</p>"));
    }

    #[test]
    fn test_keeps_video_embed() {
        let s = Sanitizer::new();
        let out = s.clean(r#"<video controls style="max-width: 100%;"><source src="clip.mp4"></video>"#);
        assert!(out.contains("<video"));
        assert!(out.contains("controls"));
        assert!(out.contains(r#"style="max-width: 100%;""#));
        assert!(out.contains(r#"<source src="clip.mp4">"#));
    }

    #[test]
    fn test_keeps_code_language_class() {
        let s = Sanitizer::new();
        let out = s.clean(r#"<pre><code class="language-mermaid">graph TD</code></pre>"#);
        assert_eq!(out, r#"<pre><code class="language-mermaid">graph TD</code></pre>"#);
    }
}
