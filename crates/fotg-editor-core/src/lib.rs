//! Framework-free editor logic.
//!
//! Everything here runs natively; `fotg-editor-browser` binds it to a page.
//!
//! - `text` / `document` / `types`: the document mirror and its selections
//! - `actions`: formatting actions and keybindings
//! - `debounce`: the trailing-edge render delay
//! - `scroll`: scroll synchronization with echo suppression
//! - `layout`: view mode, pane resizer, mobile tabs
//! - `storage` / `config`: persisted state and page configuration
//! - `session`: the per-page controller holding all of the above

pub mod actions;
pub mod config;
pub mod debounce;
pub mod document;
pub mod error;
pub mod layout;
pub mod scroll;
pub mod session;
pub mod storage;
pub mod text;
pub mod types;

pub use actions::{EditorCommand, FormatAction, Key, KeyCombo, KeydownResult, Modifiers, command_for};
pub use config::EditorConfig;
pub use debounce::RenderDebouncer;
pub use document::EditorDocument;
pub use error::{EditorError, StorageError};
pub use layout::{MobileTab, PaneDisplay, PaneResizer, PaneVisibility, PointerKind, ViewMode};
pub use scroll::{Pane, ScrollMetrics, ScrollOutcome, ScrollPane, ScrollSync};
pub use session::{EditorSession, FormatOutcome};
pub use storage::{KeyValueStore, MemoryStore};
pub use text::{EditorRope, TextBuffer};
pub use types::Selection;

// Re-exported so platform crates need only one dependency for shared types.
pub use fotg_renderer;
