//! Textual rewrites applied before markdown conversion.
//!
//! The converter has no notion of video embeds, so `![video](url)` is turned
//! into a `<video>` element up front and passed through as inline HTML.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::utils::escape_attr;

pub static VIDEO_EMBED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)!\[video\]\((.*?)\)").unwrap());

/// Inline style carried by every embedded video.
pub const VIDEO_STYLE: &str = "max-width: 100%; height: auto; border-radius: 6px; margin: 1rem 0;";

/// Rewrite every `![video](url)` occurrence (any case) into a playable
/// `<video>` element.
pub fn expand_video_embeds(markdown: &str) -> Cow<'_, str> {
    VIDEO_EMBED_RE.replace_all(markdown, |caps: &Captures<'_>| video_element(&caps[1]))
}

pub fn video_element(url: &str) -> String {
    let mut out = String::with_capacity(url.len() + 128);
    out.push_str("<video controls style=\"");
    out.push_str(VIDEO_STYLE);
    out.push_str("\"><source src=\"");
    escape_attr(&mut out, url);
    out.push_str("\"></video>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expands_every_occurrence() {
        let out = expand_video_embeds("![video](a.mp4) and ![VIDEO](b.webm)\n![Video](c.ogg)");
        assert_eq!(out.matches("<video controls").count(), 3);
        assert!(out.contains(r#"<source src="a.mp4">"#));
        assert!(out.contains(r#"<source src="b.webm">"#));
        assert!(out.contains(r#"<source src="c.ogg">"#));
    }

    #[test]
    fn test_leaves_images_alone() {
        let text = "![alt text](pic.png)";
        assert!(matches!(expand_video_embeds(text), Cow::Borrowed(_)));
    }

    #[test]
    fn test_url_stops_at_first_paren() {
        let out = expand_video_embeds("![video](x.mp4) (caption)");
        assert!(out.contains(r#"<source src="x.mp4">"#));
        assert!(out.ends_with("</video> (caption)"));
    }

    #[test]
    fn test_url_is_attribute_escaped() {
        let out = expand_video_embeds(r#"![video](a"onerror="x)"#);
        assert!(out.contains(r#"src="a&quot;onerror=&quot;x""#));
    }
}
