//! The editing widget: a plain `<textarea>`.
//!
//! The textarea reports selections in UTF-16 code units; the core works in
//! chars. Conversions go through the document's buffer.

use fotg_editor_core::{EditorDocument, Selection, TextBuffer};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlTextAreaElement};

use crate::dom::by_id;

pub const EDITOR_CONTAINER_ID: &str = "editor-container";
pub const TEXTAREA_CLASS: &str = "editor-textarea";

#[derive(Debug, Clone)]
pub struct TextareaWidget {
    textarea: HtmlTextAreaElement,
}

impl TextareaWidget {
    /// Replace the contents of `#editor-container` with a textarea holding `text`.
    pub fn mount(text: &str) -> Option<Self> {
        let container = by_id::<Element>(EDITOR_CONTAINER_ID)?;
        container.set_inner_html("");
        let textarea: HtmlTextAreaElement = gloo_utils::document()
            .create_element("textarea")
            .ok()?
            .dyn_into()
            .ok()?;
        textarea.set_class_name(TEXTAREA_CLASS);
        textarea.set_spellcheck(false);
        textarea.set_value(text);
        container.append_child(&textarea).ok()?;
        Some(Self { textarea })
    }

    pub fn element(&self) -> &HtmlTextAreaElement {
        &self.textarea
    }

    pub fn value(&self) -> String {
        self.textarea.value()
    }

    /// Current selection, in chars of `document`.
    pub fn selection(&self, document: &EditorDocument) -> Selection {
        let start = self.textarea.selection_start().ok().flatten().unwrap_or(0) as usize;
        let end = self.textarea.selection_end().ok().flatten().unwrap_or(0) as usize;
        let backward = self
            .textarea
            .selection_direction()
            .ok()
            .flatten()
            .is_some_and(|dir| dir == "backward");

        let buffer = document.buffer();
        let (start, end) = (buffer.utf16_to_char(start), buffer.utf16_to_char(end));
        if backward {
            Selection::new(end, start)
        } else {
            Selection::new(start, end)
        }
    }

    /// Replace the text and selection, then focus the widget.
    pub fn set_contents(&self, text: &str, selection: Selection, document: &EditorDocument) {
        self.textarea.set_value(text);
        let buffer = document.buffer();
        let start = buffer.char_to_utf16(selection.start()) as u32;
        let end = buffer.char_to_utf16(selection.end()) as u32;
        let direction = if selection.is_backwards() { "backward" } else { "forward" };
        if let Err(e) = self
            .textarea
            .set_selection_range_with_direction(start, end, direction)
        {
            tracing::debug!("could not restore selection: {:?}", e);
        }
        if let Err(e) = self.textarea.focus() {
            tracing::debug!("could not focus editor: {:?}", e);
        }
    }

    pub fn set_value(&self, text: &str) {
        self.textarea.set_value(text);
    }
}
