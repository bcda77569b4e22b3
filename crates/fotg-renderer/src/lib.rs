//! fotg-renderer: markdown to sanitized preview HTML.
//!
//! The pipeline, in order:
//! - `preprocess`: `![video](url)` embeds become `<video>` elements
//! - `markdown`: conversion with pulldown-cmark
//! - `stats`: word/char counts (from the unsanitized conversion)
//! - `sanitize`: ammonia, with the media tags allow-listed
//! - `preview`: split into blocks and published to a `PreviewSurface`
//! - `code_pretty`: syntect highlighting of non-diagram code blocks
//! - `diagram`: sequential, per-block diagram rendering

use std::sync::atomic::{AtomicU64, Ordering};

pub mod code_pretty;
pub mod css;
pub mod diagram;
pub mod error;
pub mod export;
pub mod markdown;
pub mod perf;
pub mod preprocess;
pub mod preview;
pub mod sanitize;
pub mod stats;
pub mod theme;
pub mod utils;

pub use code_pretty::Highlighter;
pub use css::SyntaxCss;
pub use diagram::{DiagramReport, DiagramRenderer, render_diagrams};
pub use error::{DiagramError, RenderError};
pub use export::{Download, ExportOptions};
pub use preview::{MemorySurface, PreviewBlock, PreviewDocument, PreviewSurface};
pub use sanitize::Sanitizer;
pub use stats::DocumentStats;
pub use theme::Theme;

/// Result of the synchronous part of a render.
#[derive(Debug, Clone)]
pub struct PreparedRender {
    pub stats: DocumentStats,
    pub document: PreviewDocument,
}

/// Summary of a complete render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderReport {
    pub pass: u64,
    pub stats: DocumentStats,
    pub diagrams: DiagramReport,
}

/// Markdown to preview conversion, shared by every render of a session.
pub struct RenderPipeline {
    sanitizer: Sanitizer,
    highlighter: Highlighter,
    next_pass: AtomicU64,
}

impl Default for RenderPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderPipeline {
    pub fn new() -> Self {
        Self {
            sanitizer: Sanitizer::new(),
            highlighter: Highlighter::new(),
            next_pass: AtomicU64::new(1),
        }
    }

    /// Convert, sanitize, split and highlight, without touching any surface.
    pub fn prepare(&self, markdown: &str) -> PreparedRender {
        let _timing = perf::TimingGuard::new("prepare preview");
        let pass = self.next_pass.fetch_add(1, Ordering::Relaxed);

        let processed = preprocess::expand_video_embeds(markdown);
        let raw_html = markdown::to_html(&processed);
        let stats = DocumentStats::compute(markdown, &raw_html);
        let safe_html = self.sanitizer.clean(&raw_html);

        let mut document = PreviewDocument::from_html(pass, &safe_html);
        self.highlight_code_blocks(&mut document);

        PreparedRender { stats, document }
    }

    /// Highlight pass: every code block that is not a diagram.
    fn highlight_code_blocks(&self, document: &mut PreviewDocument) {
        for block in document.blocks_mut() {
            let PreviewBlock::Code {
                language: Some(language),
                source,
                highlighted,
                ..
            } = block
            else {
                continue;
            };
            let mut inner = String::new();
            match self.highlighter.highlight(language, source, &mut inner) {
                Ok(true) => *highlighted = Some(inner),
                Ok(false) => {}
                Err(err) => {
                    tracing::debug!(%language, error = %err, "highlighting failed, leaving block plain")
                }
            }
        }
    }

    /// Full render: prepare, publish to `surface`, then run the diagram pass.
    pub async fn render<S, D>(
        &self,
        markdown: &str,
        theme: Theme,
        surface: &mut S,
        diagrams: &D,
    ) -> RenderReport
    where
        S: PreviewSurface,
        D: DiagramRenderer,
    {
        let PreparedRender {
            stats,
            mut document,
        } = self.prepare(markdown);

        surface.replace_content(&document);
        surface.set_stats(&stats);
        tracing::debug!(pass = document.pass(), words = stats.words, chars = stats.chars, "preview replaced");

        let diagrams = render_diagrams(&mut document, theme, surface, diagrams).await;
        RenderReport {
            pass: document.pass(),
            stats,
            diagrams,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_sync(pipeline: &RenderPipeline, md: &str) -> (RenderReport, MemorySurface) {
        let mut surface = MemorySurface::new();
        let report = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(pipeline.render(md, Theme::Light, &mut surface, &()));
        (report, surface)
    }

    #[test]
    fn test_video_embeds_survive_sanitizing() {
        let pipeline = RenderPipeline::new();
        let (_, surface) = render_sync(&pipeline, "![video](one.mp4)\n\n![VIDEO](two.mp4)\n");
        let html = surface.html();
        assert_eq!(html.matches("<video").count(), 2);
        assert!(html.contains("controls"));
        assert!(html.contains(r#"<source src="one.mp4">"#));
        assert!(html.contains(r#"<source src="two.mp4">"#));
    }

    #[test]
    fn test_stats_are_published() {
        let pipeline = RenderPipeline::new();
        let (report, surface) = render_sync(&pipeline, "Hello **world**");
        assert_eq!(report.stats, DocumentStats { words: 2, chars: 15 });
        assert_eq!(surface.stats(), Some(report.stats));
        assert!(surface.html().contains("<strong>world</strong>"));
    }

    #[test]
    fn test_unsafe_markup_is_removed() {
        let pipeline = RenderPipeline::new();
        let (_, surface) = render_sync(&pipeline, "<script>alert(1)</script>\n\n[x](javascript:alert(1))");
        let html = surface.html();
        assert!(!html.contains("<script"));
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn test_code_highlighted_but_diagram_untouched() {
        let pipeline = RenderPipeline::new();
        let prepared = pipeline.prepare("```rust\nlet x = 1;\n```\n\n```mermaid\ngraph TD\n```\n");
        let blocks = prepared.document.blocks();
        assert!(blocks.iter().any(|b| matches!(
            b,
            PreviewBlock::Code { highlighted: Some(h), .. } if h.contains("hl-")
        )));
        assert!(blocks.iter().any(|b| matches!(
            b,
            PreviewBlock::Diagram { source, .. } if source == "graph TD\n"
        )));
    }

    #[test]
    fn test_each_render_gets_a_new_pass() {
        let pipeline = RenderPipeline::new();
        let a = pipeline.prepare("a").document.pass();
        let b = pipeline.prepare("b").document.pass();
        assert!(b > a);
    }
}
