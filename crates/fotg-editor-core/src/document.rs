//! The document being edited: text plus the selection set.

use crate::actions::FormatAction;
use crate::text::{EditorRope, TextBuffer};
use crate::types::Selection;

/// Text buffer and selections, as last reported by the editing widget.
///
/// There is always at least one selection; `main` indexes the one the
/// cursor belongs to.
#[derive(Clone)]
pub struct EditorDocument<T: TextBuffer = EditorRope> {
    buffer: T,
    selections: Vec<Selection>,
    main: usize,
}

impl EditorDocument<EditorRope> {
    pub fn from_text(text: &str) -> Self {
        Self::new(EditorRope::from_str(text))
    }
}

impl<T: TextBuffer> EditorDocument<T> {
    /// Wrap a buffer, with the cursor at the start.
    pub fn new(buffer: T) -> Self {
        Self {
            buffer,
            selections: vec![Selection::collapsed(0)],
            main: 0,
        }
    }

    pub fn buffer(&self) -> &T {
        &self.buffer
    }

    pub fn content_string(&self) -> String {
        self.buffer.to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    pub fn main_selection(&self) -> Selection {
        self.selections[self.main]
    }

    /// Replace the selection set. An empty set collapses to the start.
    pub fn set_selections(&mut self, selections: Vec<Selection>, main: usize) {
        let len = self.buffer.len_chars();
        if selections.is_empty() {
            self.selections = vec![Selection::collapsed(0)];
            self.main = 0;
            return;
        }
        self.main = main.min(selections.len() - 1);
        self.selections = selections.into_iter().map(|s| s.clamped(len)).collect();
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.set_selections(vec![selection], 0);
    }

    /// Replace the whole text. Selections are clamped to the new length.
    pub fn replace_all(&mut self, text: &str) {
        let len = self.buffer.len_chars();
        self.buffer.replace(0..len, text);
        let new_len = self.buffer.len_chars();
        for sel in &mut self.selections {
            *sel = sel.clamped(new_len);
        }
    }

    /// Wrap every selected range in `prefix`/`suffix`.
    ///
    /// Ranges are edited from last to first so earlier offsets stay valid.
    /// Afterwards only the main selection remains, moved right by the prefix
    /// and by whatever the ranges before it grew.
    pub fn wrap_selections(&mut self, prefix: &str, suffix: &str) -> Selection {
        let main = self.main_selection();
        let prefix_len = prefix.chars().count();
        let growth = prefix_len + suffix.chars().count();

        let mut ranges: Vec<_> = self.selections.iter().map(Selection::to_range).collect();
        ranges.sort_by_key(|r| r.start);
        // overlapping ranges would be wrapped twice
        ranges.dedup_by(|later, earlier| later.start < earlier.end);

        for range in ranges.iter().rev() {
            let selected = self.buffer.slice(range.clone()).unwrap_or_default();
            let wrapped = format!("{prefix}{selected}{suffix}");
            self.buffer.replace(range.clone(), &wrapped);
        }

        let before_main = ranges.iter().filter(|r| r.start < main.start()).count();
        let moved = main.shifted(before_main * growth + prefix_len);
        self.set_selection(moved);
        moved
    }

    pub fn apply_format(&mut self, action: FormatAction) -> Selection {
        let (prefix, suffix) = action.markers();
        self.wrap_selections(prefix, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_wraps_selection() {
        let mut doc = EditorDocument::from_text("hello world");
        doc.set_selection(Selection::new(6, 11));
        let sel = doc.apply_format(FormatAction::Bold);
        assert_eq!(doc.content_string(), "hello **world**");
        assert_eq!(sel, Selection::new(8, 13));
    }

    #[test]
    fn test_collapsed_cursor_inserts_markers() {
        let mut doc = EditorDocument::from_text("ab");
        doc.set_selection(Selection::collapsed(1));
        let sel = doc.apply_format(FormatAction::Link);
        assert_eq!(doc.content_string(), "a[](url)b");
        assert_eq!(sel, Selection::collapsed(2));
    }

    #[test]
    fn test_every_range_is_wrapped() {
        let mut doc = EditorDocument::from_text("one two three");
        doc.set_selections(
            vec![Selection::new(0, 3), Selection::new(8, 13), Selection::new(4, 7)],
            1,
        );
        let sel = doc.apply_format(FormatAction::Italic);
        assert_eq!(doc.content_string(), "*one* *two* *three*");
        // two ranges precede the main one, each grew by 2
        assert_eq!(sel, Selection::new(13, 18));
        assert_eq!(doc.selections(), &[sel]);
    }

    #[test]
    fn test_backwards_selection_keeps_direction() {
        let mut doc = EditorDocument::from_text("code");
        doc.set_selection(Selection::new(4, 0));
        let sel = doc.apply_format(FormatAction::CodeBlock);
        assert_eq!(doc.content_string(), "\n```\ncode\n```\n");
        assert_eq!(sel, Selection::new(9, 5));
    }

    #[test]
    fn test_replace_all_clamps_selection() {
        let mut doc = EditorDocument::from_text("a long document");
        doc.set_selection(Selection::new(2, 10));
        doc.replace_all("");
        assert_eq!(doc.content_string(), "");
        assert_eq!(doc.main_selection(), Selection::collapsed(0));
    }

    #[test]
    fn test_multibyte_offsets() {
        let mut doc = EditorDocument::from_text("héllo");
        doc.set_selection(Selection::new(0, 5));
        doc.apply_format(FormatAction::Bold);
        assert_eq!(doc.content_string(), "**héllo**");
    }

    #[test]
    fn test_action_markers() {
        let wrapped: Vec<String> = FormatAction::ALL
            .into_iter()
            .map(|action| {
                let mut doc = EditorDocument::from_text("x");
                doc.set_selection(Selection::new(0, 1));
                doc.apply_format(action);
                format!("{action:?}: {:?}", doc.content_string())
            })
            .collect();
        insta::assert_snapshot!(wrapped.join("\n"), @r#"
        Bold: "**x**"
        Italic: "*x*"
        Link: "[x](url)"
        CodeBlock: "\n```\nx\n```\n"
        DiagramBlock: "\n```mermaid\nx\n```\n"
        Image: "![alt text](ximage_url_here)"
        Video: "![video](xvideo_url_here)"
        "#);
    }
}
