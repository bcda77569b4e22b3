//! The preview pane's content model.
//!
//! Sanitized HTML is split into runs of plain markup and code blocks, so the
//! post-processing passes can work on individual blocks the way a DOM walk
//! would. Diagram blocks carry the render pass number and their index as
//! `data-*` attributes; a platform surface uses them to find the block again
//! once its diagram arrives, and a stale pass simply finds nothing.

use std::sync::LazyLock;

use regex::Regex;
use smol_str::SmolStr;

use crate::stats::DocumentStats;
use crate::utils::{escape_attr, escape_body, unescape_text};

static CODE_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<pre><code(?: class="([^"]*)")?>(.*?)</code></pre>"#).unwrap()
});

/// Language marker that routes a code block to the diagram pass.
pub const DIAGRAM_LANGUAGE: &str = "mermaid";

pub const PASS_ATTR: &str = "data-render-pass";
pub const BLOCK_ATTR: &str = "data-block";

pub const DIAGRAM_CONTAINER_STYLE: &str = "display: flex; justify-content: center; margin: 1rem 0;";
pub const DIAGRAM_ERROR_STYLE: &str = "color: #ef4444; font-size: 0.85rem; margin-bottom: 0.5rem;";
pub const DIAGRAM_ERROR_TEXT: &str = "Mermaid syntax error";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagramState {
    Pending,
    Rendered(String),
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewBlock {
    /// Markup between code blocks, already sanitized.
    Html(String),
    Code {
        /// Full `class` attribute as it came out of the sanitizer.
        class: Option<SmolStr>,
        language: Option<SmolStr>,
        source: String,
        /// Inner HTML produced by the highlight pass.
        highlighted: Option<String>,
    },
    Diagram {
        source: String,
        state: DiagramState,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewDocument {
    pass: u64,
    blocks: Vec<PreviewBlock>,
}

fn language_of(class: &str) -> Option<&str> {
    class
        .split_ascii_whitespace()
        .find_map(|c| c.strip_prefix("language-"))
}

impl PreviewDocument {
    /// Split sanitized HTML into blocks.
    pub fn from_html(pass: u64, html: &str) -> Self {
        let mut blocks = Vec::new();
        let mut last = 0;
        for caps in CODE_BLOCK_RE.captures_iter(html) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if whole.start() > last {
                blocks.push(PreviewBlock::Html(html[last..whole.start()].to_string()));
            }
            last = whole.end();

            let class = caps.get(1).map(|m| m.as_str());
            let source = unescape_text(caps.get(2).map_or("", |m| m.as_str()));
            let is_diagram = class
                .map(|c| c.split_ascii_whitespace().any(|c| c == "language-mermaid"))
                .unwrap_or(false);

            if is_diagram {
                blocks.push(PreviewBlock::Diagram {
                    source,
                    state: DiagramState::Pending,
                });
            } else {
                blocks.push(PreviewBlock::Code {
                    class: class.map(SmolStr::new),
                    language: class.and_then(language_of).map(SmolStr::new),
                    source,
                    highlighted: None,
                });
            }
        }
        if last < html.len() {
            blocks.push(PreviewBlock::Html(html[last..].to_string()));
        }
        Self { pass, blocks }
    }

    pub fn pass(&self) -> u64 {
        self.pass
    }

    pub fn blocks(&self) -> &[PreviewBlock] {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut [PreviewBlock] {
        &mut self.blocks
    }

    /// Indices of diagram blocks, in document order.
    pub fn diagram_indices(&self) -> Vec<usize> {
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| matches!(b, PreviewBlock::Diagram { .. }))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn block_html(&self, index: usize) -> Option<String> {
        let block = self.blocks.get(index)?;
        let mut out = String::new();
        write_block(&mut out, self.pass, index, block);
        Some(out)
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for (index, block) in self.blocks.iter().enumerate() {
            write_block(&mut out, self.pass, index, block);
        }
        out
    }
}

fn write_block(out: &mut String, pass: u64, index: usize, block: &PreviewBlock) {
    match block {
        PreviewBlock::Html(html) => out.push_str(html),
        PreviewBlock::Code {
            class,
            source,
            highlighted,
            ..
        } => {
            out.push_str("<pre><code");
            if let Some(class) = class {
                out.push_str(" class=\"");
                escape_attr(out, class);
                out.push('"');
            }
            out.push('>');
            match highlighted {
                Some(inner) => out.push_str(inner),
                None => escape_body(out, source),
            }
            out.push_str("</code></pre>");
        }
        PreviewBlock::Diagram { source, state } => match state {
            DiagramState::Pending => write_diagram_source(out, pass, index, source),
            DiagramState::Rendered(svg) => out.push_str(&diagram_container(svg)),
            DiagramState::Failed => {
                out.push_str(&diagram_error_annotation());
                write_diagram_source(out, pass, index, source);
            }
        },
    }
}

fn write_diagram_source(out: &mut String, pass: u64, index: usize, source: &str) {
    out.push_str(&format!(
        "<pre {PASS_ATTR}=\"{pass}\" {BLOCK_ATTR}=\"{index}\"><code class=\"language-{DIAGRAM_LANGUAGE}\">"
    ));
    escape_body(out, source);
    out.push_str("</code></pre>");
}

/// Element that replaces a diagram block once its SVG is available.
pub fn diagram_container(svg: &str) -> String {
    format!("<div class=\"mermaid-rendered\" style=\"{DIAGRAM_CONTAINER_STYLE}\">{svg}</div>")
}

/// Annotation inserted right before a diagram block that failed to render.
pub fn diagram_error_annotation() -> String {
    format!("<div class=\"mermaid-error\" style=\"{DIAGRAM_ERROR_STYLE}\">{DIAGRAM_ERROR_TEXT}</div>")
}

/// Where rendered previews end up: the DOM in a browser, a buffer in tests.
pub trait PreviewSurface {
    /// Replace the whole preview with a freshly rendered document.
    fn replace_content(&mut self, document: &PreviewDocument);

    /// Replace one block of render pass `pass` with `html`.
    ///
    /// Must do nothing when `pass` is no longer the displayed one.
    fn replace_block(&mut self, pass: u64, index: usize, html: &str);

    /// Insert `html` immediately before one block of render pass `pass`.
    fn insert_before_block(&mut self, pass: u64, index: usize, html: &str);

    fn set_stats(&mut self, stats: &DocumentStats);
}

impl<T: PreviewSurface + ?Sized> PreviewSurface for &mut T {
    fn replace_content(&mut self, document: &PreviewDocument) {
        (**self).replace_content(document)
    }

    fn replace_block(&mut self, pass: u64, index: usize, html: &str) {
        (**self).replace_block(pass, index, html)
    }

    fn insert_before_block(&mut self, pass: u64, index: usize, html: &str) {
        (**self).insert_before_block(pass, index, html)
    }

    fn set_stats(&mut self, stats: &DocumentStats) {
        (**self).set_stats(stats)
    }
}

/// In-memory surface, for native hosts and tests.
#[derive(Debug, Default, Clone)]
pub struct MemorySurface {
    pass: Option<u64>,
    blocks: Vec<String>,
    stats: Option<DocumentStats>,
    replacements: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn html(&self) -> String {
        self.blocks.concat()
    }

    pub fn pass(&self) -> Option<u64> {
        self.pass
    }

    pub fn stats(&self) -> Option<DocumentStats> {
        self.stats
    }

    /// Number of full-content replacements so far.
    pub fn replacements(&self) -> usize {
        self.replacements
    }

    fn block_mut(&mut self, pass: u64, index: usize) -> Option<&mut String> {
        if self.pass != Some(pass) {
            return None;
        }
        self.blocks.get_mut(index)
    }
}

impl PreviewSurface for MemorySurface {
    fn replace_content(&mut self, document: &PreviewDocument) {
        self.pass = Some(document.pass());
        self.blocks = (0..document.blocks().len())
            .filter_map(|i| document.block_html(i))
            .collect();
        self.replacements += 1;
    }

    fn replace_block(&mut self, pass: u64, index: usize, html: &str) {
        if let Some(block) = self.block_mut(pass, index) {
            *block = html.to_string();
        }
    }

    fn insert_before_block(&mut self, pass: u64, index: usize, html: &str) {
        if let Some(block) = self.block_mut(pass, index) {
            block.insert_str(0, html);
        }
    }

    fn set_stats(&mut self, stats: &DocumentStats) {
        self.stats = Some(*stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = concat!(
        "<h1>Title</h1>\n",
        "<pre><code class=\"language-rust\">fn a() -&gt; u8 { 1 }\n</code></pre>\n",
        "<p>between</p>\n",
        "<pre><code class=\"language-mermaid\">graph TD\nA--&gt;B\n</code></pre>\n",
        "<pre><code>plain\n</code></pre>\n",
    );

    #[test]
    fn test_split_into_blocks() {
        let doc = PreviewDocument::from_html(1, SAMPLE);
        let kinds: Vec<&str> = doc
            .blocks()
            .iter()
            .map(|b| match b {
                PreviewBlock::Html(_) => "html",
                PreviewBlock::Code { .. } => "code",
                PreviewBlock::Diagram { .. } => "diagram",
            })
            .collect();
        assert_eq!(
            kinds,
            ["html", "code", "html", "diagram", "html", "code", "html"]
        );
        assert_eq!(doc.diagram_indices(), vec![3]);
    }

    #[test]
    fn test_code_source_is_unescaped() {
        let doc = PreviewDocument::from_html(1, SAMPLE);
        match &doc.blocks()[1] {
            PreviewBlock::Code {
                language, source, ..
            } => {
                assert_eq!(language.as_deref(), Some("rust"));
                assert_eq!(source, "fn a() -> u8 { 1 }\n");
            }
            other => panic!("expected code block, got {other:?}"),
        }
        match &doc.blocks()[3] {
            PreviewBlock::Diagram { source, .. } => assert_eq!(source, "graph TD\nA-->B\n"),
            other => panic!("expected diagram block, got {other:?}"),
        }
    }

    #[test]
    fn test_untouched_document_reserializes_code() {
        let doc = PreviewDocument::from_html(1, SAMPLE);
        let html = doc.to_html();
        assert!(html.contains("<pre><code class=\"language-rust\">fn a() -&gt; u8 { 1 }\n</code></pre>"));
        assert!(html.contains("<pre><code>plain\n</code></pre>"));
        assert!(html.contains(
            "<pre data-render-pass=\"1\" data-block=\"3\"><code class=\"language-mermaid\">graph TD\nA--&gt;B\n</code></pre>"
        ));
    }

    #[test]
    fn test_failed_diagram_keeps_source_after_annotation() {
        let mut doc = PreviewDocument::from_html(1, SAMPLE);
        if let PreviewBlock::Diagram { state, .. } = &mut doc.blocks_mut()[3] {
            *state = DiagramState::Failed;
        }
        let html = doc.block_html(3).unwrap();
        assert!(html.starts_with(&diagram_error_annotation()));
        assert!(html.ends_with("A--&gt;B\n</code></pre>"));
    }

    #[test]
    fn test_memory_surface_ignores_stale_pass() {
        let mut surface = MemorySurface::new();
        surface.replace_content(&PreviewDocument::from_html(2, SAMPLE));
        let before = surface.html();
        surface.replace_block(1, 3, "<svg/>");
        surface.insert_before_block(1, 3, "<div/>");
        assert_eq!(surface.html(), before);

        surface.replace_block(2, 3, "<svg/>");
        assert!(surface.html().contains("<svg/>"));
    }

    #[test]
    fn test_no_code_blocks() {
        let doc = PreviewDocument::from_html(0, "<p>hi</p>");
        assert_eq!(doc.blocks(), &[PreviewBlock::Html("<p>hi</p>".into())]);
        assert!(PreviewDocument::from_html(0, "").blocks().is_empty());
    }
}
