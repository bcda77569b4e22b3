//! Scroll panes backed by DOM elements.

use fotg_editor_core::{ScrollMetrics, ScrollPane};
use web_sys::Element;

/// A scrollable element: the textarea or the preview container.
#[derive(Debug, Clone)]
pub struct DomPane(pub Element);

impl ScrollPane for DomPane {
    fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top: self.0.scroll_top() as f64,
            scroll_height: self.0.scroll_height() as f64,
            client_height: self.0.client_height() as f64,
        }
    }

    fn set_scroll_top(&mut self, top: f64) {
        self.0.set_scroll_top(top.round() as i32);
    }
}
