//! Text buffer abstraction for the document.
//!
//! Offsets are in Unicode scalar values (chars). Browser widgets report
//! selections in UTF-16 code units, so the buffer also converts between the two.

use smol_str::{SmolStr, ToSmolStr};
use std::ops::Range;

pub trait TextBuffer {
    /// Total length in chars (Unicode scalar values).
    fn len_chars(&self) -> usize;

    /// Insert text at char offset.
    fn insert(&mut self, char_offset: usize, text: &str);

    /// Delete char range.
    fn delete(&mut self, char_range: Range<usize>);

    /// Replace char range with text.
    fn replace(&mut self, char_range: Range<usize>, text: &str) {
        self.delete(char_range.clone());
        self.insert(char_range.start, text);
    }

    /// Get a slice as SmolStr. Returns None if range is invalid.
    fn slice(&self, char_range: Range<usize>) -> Option<SmolStr>;

    fn to_string(&self) -> String;

    /// Convert char offset to UTF-16 code unit offset.
    fn char_to_utf16(&self, char_offset: usize) -> usize;

    /// Convert UTF-16 code unit offset to char offset.
    fn utf16_to_char(&self, utf16_offset: usize) -> usize;
}

/// Ropey-backed text buffer.
#[derive(Clone)]
pub struct EditorRope {
    rope: ropey::Rope,
}

impl EditorRope {
    pub fn from_str(s: &str) -> Self {
        Self {
            rope: ropey::Rope::from_str(s),
        }
    }
}

impl TextBuffer for EditorRope {
    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn insert(&mut self, char_offset: usize, text: &str) {
        let offset = char_offset.min(self.rope.len_chars());
        self.rope.insert(offset, text);
    }

    fn delete(&mut self, char_range: Range<usize>) {
        let end = char_range.end.min(self.rope.len_chars());
        let start = char_range.start.min(end);
        if start < end {
            self.rope.remove(start..end);
        }
    }

    fn slice(&self, char_range: Range<usize>) -> Option<SmolStr> {
        if char_range.start > char_range.end || char_range.end > self.rope.len_chars() {
            return None;
        }
        Some(self.rope.slice(char_range).to_smolstr())
    }

    fn to_string(&self) -> String {
        self.rope.to_string()
    }

    fn char_to_utf16(&self, char_offset: usize) -> usize {
        self.rope
            .char_to_utf16_cu(char_offset.min(self.rope.len_chars()))
    }

    fn utf16_to_char(&self, utf16_offset: usize) -> usize {
        self.rope
            .utf16_cu_to_char(utf16_offset.min(self.rope.len_utf16_cu()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let mut rope = EditorRope::from_str("hello world");
        assert_eq!(rope.len_chars(), 11);

        rope.insert(5, " beautiful");
        assert_eq!(rope.to_string(), "hello beautiful world");

        rope.delete(5..15);
        assert_eq!(rope.to_string(), "hello world");
    }

    #[test]
    fn test_slice() {
        let rope = EditorRope::from_str("hello world");
        assert_eq!(rope.slice(6..11).as_deref(), Some("world"));
        assert_eq!(rope.slice(0..100), None);
    }

    #[test]
    fn test_replace() {
        let mut rope = EditorRope::from_str("hello world");
        rope.replace(6..11, "rust");
        assert_eq!(rope.to_string(), "hello rust");
    }

    #[test]
    fn test_out_of_range_edits_are_clamped() {
        let mut rope = EditorRope::from_str("abc");
        rope.insert(10, "d");
        assert_eq!(rope.to_string(), "abcd");
        rope.delete(2..99);
        assert_eq!(rope.to_string(), "ab");
    }

    #[test]
    fn test_utf16_conversion() {
        // the emoji is one char but two UTF-16 code units
        let rope = EditorRope::from_str("a\u{1F30D}b");
        assert_eq!(rope.len_chars(), 3);
        assert_eq!(rope.char_to_utf16(2), 3);
        assert_eq!(rope.utf16_to_char(3), 2);
        assert_eq!(rope.utf16_to_char(99), 3);
    }
}
