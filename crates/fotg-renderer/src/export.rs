//! Standalone exports of the current document.

use serde::{Deserialize, Serialize};

use crate::utils::escape_body;

pub const DEFAULT_EXPORT_TITLE: &str = "Markdown Viewer Export";
pub const DEFAULT_EXPORT_STYLESHEET: &str =
    "https://cdn.jsdelivr.net/npm/normalize.css@8.0.1/normalize.min.css";

const EXPORT_STYLE: &str = r#"  body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif; line-height: 1.6; color: #333; max-width: 800px; margin: 0 auto; padding: 2rem; }
  pre { background: #f4f4f4; padding: 1rem; border-radius: 6px; overflow-x: auto; }
  code { font-family: monospace; }
  img { max-width: 100%; height: auto; }
  blockquote { border-left: 4px solid #ccc; margin-left: 0; padding-left: 1rem; color: #666; }
"#;

/// A file offered to the user for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: &'static str,
    pub mime_type: &'static str,
    pub contents: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub title: String,
    pub stylesheet: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_EXPORT_TITLE.to_string(),
            stylesheet: DEFAULT_EXPORT_STYLESHEET.to_string(),
        }
    }
}

/// Wrap rendered preview content in a self-contained HTML page.
pub fn standalone_html(content: &str, options: &ExportOptions) -> String {
    let mut title = String::new();
    escape_body(&mut title, &options.title);
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{title}</title>\n\
         <link rel=\"stylesheet\" href=\"{stylesheet}\">\n\
         <style>\n{EXPORT_STYLE}</style>\n\
         </head>\n\
         <body>\n\
         {content}\n\
         </body>\n\
         </html>",
        stylesheet = options.stylesheet,
    )
}

pub fn html_download(content: &str, options: &ExportOptions) -> Download {
    Download {
        filename: "export.html",
        mime_type: "text/html",
        contents: standalone_html(content, options),
    }
}

pub fn markdown_download(markdown: &str) -> Download {
    Download {
        filename: "document.md",
        mime_type: "text/markdown",
        contents: markdown.to_string(),
    }
}
