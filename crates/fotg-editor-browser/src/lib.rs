//! Browser DOM layer for the fotg markdown editor.
//!
//! Binds an [`EditorSession`] to a page built around these element ids:
//! `editor-container`, `preview-container`, `word-count`, `main-content`,
//! `editor-pane`, `preview-pane`, `resizer`, the `btn-*` toolbar buttons,
//! `theme-toggle`, `tab-editor`/`tab-preview` and `reset-dialog`. Missing
//! optional elements are skipped. Assumes `wasm32-unknown-unknown`.
//!
//! # Architecture
//!
//! - `app`: event wiring and the render timer
//! - `widget`: the `<textarea>` editing widget
//! - `preview`: the preview pane as a `PreviewSurface`
//! - `scroll`: DOM elements as `ScrollPane`s
//! - `mermaid`: `DiagramRenderer` over `window.mermaid`
//! - `storage`: `localStorage` as a `KeyValueStore`
//! - `download`: Blob downloads and file import
//! - `theme`: `data-theme`, icons, highlight CSS, `theme-changed`

// Re-export core crate
pub use fotg_editor_core;
pub use fotg_editor_core::*;

pub mod app;
pub mod config;
pub mod dom;
pub mod download;
pub mod logging;
pub mod mermaid;
pub mod preview;
pub mod scroll;
pub mod storage;
pub mod theme;
pub mod widget;

pub use app::{App, mount, unmount};
pub use mermaid::MermaidRenderer;
pub use preview::DomPreview;
pub use scroll::DomPane;
pub use storage::LocalStore;
pub use widget::TextareaWidget;

use wasm_bindgen::prelude::*;

/// Entry point: set up logging and mount the editor on the page.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    logging::init();
    mount()?;
    Ok(())
}
