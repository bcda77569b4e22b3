//! Selection type shared by the document and the platform layers.

use std::ops::Range;

/// Text selection with anchor and head positions, in char offsets.
///
/// The anchor is where the selection started, the head is where the cursor is now.
/// They may be in any order - use `start()` and `end()` for ordered bounds.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub anchor: usize,
    pub head: usize,
}

impl Selection {
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// Create a collapsed selection (cursor position).
    pub fn collapsed(offset: usize) -> Self {
        Self {
            anchor: offset,
            head: offset,
        }
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    /// Convert to a Range<usize> (ordered).
    pub fn to_range(&self) -> Range<usize> {
        self.start()..self.end()
    }

    pub fn is_backwards(&self) -> bool {
        self.head < self.anchor
    }

    /// Move both ends right by `delta` chars.
    pub fn shifted(self, delta: usize) -> Self {
        Self {
            anchor: self.anchor + delta,
            head: self.head + delta,
        }
    }

    /// Clamp both ends to a document of `len` chars.
    pub fn clamped(self, len: usize) -> Self {
        Self {
            anchor: self.anchor.min(len),
            head: self.head.min(len),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_ordered() {
        let sel = Selection::new(8, 3);
        assert!(sel.is_backwards());
        assert_eq!(sel.to_range(), 3..8);
    }

    #[test]
    fn test_shift_and_clamp() {
        let sel = Selection::new(2, 4).shifted(3);
        assert_eq!(sel, Selection::new(5, 7));
        assert_eq!(sel.clamped(6), Selection::new(5, 6));
        assert_eq!(Selection::collapsed(1).to_range(), 1..1);
    }
}
