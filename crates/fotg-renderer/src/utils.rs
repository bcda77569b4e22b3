use pulldown_cmark_escape::{FmtWriter, escape_html, escape_html_body_text};

/// Escape text for use inside an attribute value or element body.
pub fn escape_attr(out: &mut String, text: &str) {
    // Writing into a String cannot fail.
    let _ = escape_html(FmtWriter(&mut *out), text);
}

/// Escape text for use as element body (quotes left alone).
pub fn escape_body(out: &mut String, text: &str) {
    let _ = escape_html_body_text(FmtWriter(&mut *out), text);
}

/// Undo the entity escaping an HTML serializer applies to text nodes.
///
/// Only the entities emitted by the markdown writer and the sanitizer's
/// serializer are recognised; `&amp;` goes last so `&amp;lt;` stays `&lt;`.
pub fn unescape_text(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_attr_quotes() {
        let mut out = String::new();
        escape_attr(&mut out, r#"a"b<c>&"#);
        assert_eq!(out, "a&quot;b&lt;c&gt;&amp;");
    }

    #[test]
    fn test_unescape_round_trips_code() {
        let src = "if a < b && c > \"d\" {}";
        let mut escaped = String::new();
        escape_body(&mut escaped, src);
        assert_eq!(unescape_text(&escaped), src);
    }

    #[test]
    fn test_unescape_double_escaped() {
        assert_eq!(unescape_text("&amp;lt;"), "&lt;");
    }
}
