//! Selection Management
//!
//! A selection is the span between a fixed anchor and a moving focus.
//! Empty spans are never stored: `Selection::new` returns `None` when the
//! two ends coincide.

use std::ops::Range;

/// A text selection range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Fixed end, set when the shift-extend gesture starts
    anchor: usize,
    /// Moving end, always equal to the cursor index
    focus: usize,
}

impl Selection {
    /// Create a selection, or `None` if it would be empty
    pub fn new(anchor: usize, focus: usize) -> Option<Self> {
        (anchor != focus).then_some(Self { anchor, focus })
    }

    pub fn anchor(&self) -> usize {
        self.anchor
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Normalized `[min, max)` range
    pub fn range(&self) -> Range<usize> {
        self.anchor.min(self.focus)..self.anchor.max(self.focus)
    }

    /// Number of selected characters
    pub fn len(&self) -> usize {
        self.range().len()
    }

    /// Move the focus, keeping the anchor. Collapses to `None` when empty.
    pub fn extend_to(self, focus: usize) -> Option<Self> {
        Self::new(self.anchor, focus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection_is_none() {
        assert!(Selection::new(3, 3).is_none());
    }

    #[test]
    fn test_selection_normalized() {
        let sel = Selection::new(4, 1).unwrap();
        assert_eq!(sel.range(), 1..4);
        assert_eq!(sel.len(), 3);
        assert_eq!(sel.anchor(), 4);
        assert_eq!(sel.focus(), 1);
    }

    #[test]
    fn test_extend_collapses() {
        let sel = Selection::new(2, 3).unwrap();
        let sel = sel.extend_to(4).unwrap();
        assert_eq!(sel.anchor(), 2);
        assert_eq!(sel.focus(), 4);
        assert!(sel.extend_to(2).is_none());
    }
}
