use pulldown_cmark::{Options, Parser, html};

/// Parser options matching a GitHub-flavoured converter.
pub fn default_md_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
}

/// Convert markdown to unsanitized HTML.
pub fn to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, default_md_options());
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_code_keeps_language_class() {
        let html = to_html("```mermaid\ngraph TD\n```\n");
        assert!(html.contains(r#"<pre><code class="language-mermaid">graph TD"#));
    }

    #[test]
    fn test_gfm_extensions() {
        let html = to_html("~~gone~~\n\n| a |\n|---|\n| b |\n");
        assert!(html.contains("<del>gone</del>"));
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(to_html(""), "");
    }
}
