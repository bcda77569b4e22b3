//! Diagram post-processing pass.
//!
//! Diagram blocks are rendered one at a time, in document order, each awaited
//! before the next starts. A failure is confined to its block: the source stays
//! visible and an annotation is placed right before it.

use std::future::Future;

use crate::error::DiagramError;
use crate::preview::{
    DiagramState, PreviewBlock, PreviewDocument, PreviewSurface, diagram_container,
    diagram_error_annotation,
};
use crate::theme::Theme;

/// Renders diagram source to SVG markup.
///
/// The browser implementation calls into Mermaid; hosts without a diagram
/// engine use `()`, which leaves diagram blocks as code.
pub trait DiagramRenderer {
    /// Whether an engine is loaded at all. When false the pass is skipped and
    /// blocks are left untouched, without annotations.
    fn is_available(&self) -> bool {
        true
    }

    /// Called once per pass before any block is rendered.
    fn initialize(&self, _theme: Theme) {}

    fn render(
        &self,
        id: &str,
        source: &str,
        theme: Theme,
    ) -> impl Future<Output = Result<String, DiagramError>>;
}

impl DiagramRenderer for () {
    fn is_available(&self) -> bool {
        false
    }

    async fn render(&self, _id: &str, _source: &str, _theme: Theme) -> Result<String, DiagramError> {
        Err(DiagramError::Unavailable)
    }
}

impl<T: DiagramRenderer> DiagramRenderer for &T {
    fn is_available(&self) -> bool {
        (*self).is_available()
    }

    fn initialize(&self, theme: Theme) {
        (*self).initialize(theme)
    }

    fn render(
        &self,
        id: &str,
        source: &str,
        theme: Theme,
    ) -> impl Future<Output = Result<String, DiagramError>> {
        (*self).render(id, source, theme)
    }
}

/// Outcome of one diagram pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagramReport {
    pub rendered: usize,
    pub failed: Vec<(usize, DiagramError)>,
}

/// Element id handed to the diagram engine for one block.
pub fn diagram_id(pass: u64, index: usize) -> String {
    format!("mermaid-{pass}-{index}")
}

/// Render every diagram block of `document`, updating both the document and
/// the surface as each block completes.
pub async fn render_diagrams<S, D>(
    document: &mut PreviewDocument,
    theme: Theme,
    surface: &mut S,
    renderer: &D,
) -> DiagramReport
where
    S: PreviewSurface,
    D: DiagramRenderer,
{
    let mut report = DiagramReport::default();
    if !renderer.is_available() {
        return report;
    }
    renderer.initialize(theme);

    let pass = document.pass();
    for index in document.diagram_indices() {
        let source = match &document.blocks()[index] {
            PreviewBlock::Diagram { source, .. } => source.clone(),
            _ => continue,
        };

        let result = renderer.render(&diagram_id(pass, index), &source, theme).await;
        let state = match result {
            Ok(svg) => {
                surface.replace_block(pass, index, &diagram_container(&svg));
                report.rendered += 1;
                DiagramState::Rendered(svg)
            }
            Err(err) => {
                tracing::warn!(block = index, error = %err, "diagram render failed");
                surface.insert_before_block(pass, index, &diagram_error_annotation());
                report.failed.push((index, err));
                DiagramState::Failed
            }
        };
        if let PreviewBlock::Diagram { state: slot, .. } = &mut document.blocks_mut()[index] {
            *slot = state;
        }
    }
    report
}
