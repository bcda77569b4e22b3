//! The preview pane as a render target.

use fotg_editor_core::fotg_renderer::preview::{BLOCK_ATTR, PASS_ATTR};
use fotg_editor_core::fotg_renderer::{DocumentStats, PreviewDocument, PreviewSurface};
use web_sys::Element;

/// Preview container plus the optional word-count label.
#[derive(Debug, Clone)]
pub struct DomPreview {
    container: Element,
    stats: Option<Element>,
}

impl DomPreview {
    pub fn new(container: Element, stats: Option<Element>) -> Self {
        Self { container, stats }
    }

    pub fn container(&self) -> &Element {
        &self.container
    }

    /// Current preview markup, as shown.
    pub fn inner_html(&self) -> String {
        self.container.inner_html()
    }

    /// Block `index` of render pass `pass`, if that pass is still displayed.
    fn block(&self, pass: u64, index: usize) -> Option<Element> {
        let selector = format!("[{PASS_ATTR}=\"{pass}\"][{BLOCK_ATTR}=\"{index}\"]");
        match self.container.query_selector(&selector) {
            Ok(found) => found,
            Err(e) => {
                tracing::debug!(selector, "block lookup failed: {:?}", e);
                None
            }
        }
    }
}

impl PreviewSurface for DomPreview {
    fn replace_content(&mut self, document: &PreviewDocument) {
        self.container.set_inner_html(&document.to_html());
    }

    fn replace_block(&mut self, pass: u64, index: usize, html: &str) {
        let Some(block) = self.block(pass, index) else {
            tracing::debug!(pass, index, "block gone, skipping replacement");
            return;
        };
        block.set_outer_html(html);
    }

    fn insert_before_block(&mut self, pass: u64, index: usize, html: &str) {
        let Some(block) = self.block(pass, index) else {
            return;
        };
        if let Err(e) = block.insert_adjacent_html("beforebegin", html) {
            tracing::warn!("could not annotate diagram block: {:?}", e);
        }
    }

    fn set_stats(&mut self, stats: &DocumentStats) {
        if let Some(label) = &self.stats {
            label.set_text_content(Some(&stats.to_string()));
        }
    }
}
