//! Cursor Management
//!
//! Handles the caret index, keyboard movement and selection extension, and
//! locating a caret index from a pointer x-coordinate.

use tracing::trace;

use crate::buffer::TextBuffer;
use crate::metrics::GlyphMetrics;
use crate::selection::Selection;

/// Cursor movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Caret position plus the optional selection it drives.
///
/// `index` is the offset *before* the character at `index`, so
/// `index == len` places the caret after the last character. While a
/// selection exists its focus equals `index`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorModel {
    index: usize,
    selection: Option<Selection>,
}

impl CursorModel {
    /// Create a cursor at offset 0 with no selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cursor at a specific offset
    pub fn at(index: usize) -> Self {
        Self {
            index,
            selection: None,
        }
    }

    /// Current caret offset
    pub fn index(&self) -> usize {
        self.index
    }

    /// Active selection, if any
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Whether a non-empty selection is active
    pub fn has_selection(&self) -> bool {
        self.selection.is_some()
    }

    /// Place the caret without touching the selection state
    pub fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    /// Move one character left. Returns true if index or selection changed.
    pub fn move_left(&mut self, extend: bool) -> bool {
        self.step(Direction::Left, extend, usize::MAX)
    }

    /// Move one character right, bounded by `len`. Returns true if index or
    /// selection changed.
    pub fn move_right(&mut self, extend: bool, len: usize) -> bool {
        self.step(Direction::Right, extend, len)
    }

    /// Move in a direction by one character
    pub fn move_direction(&mut self, direction: Direction, extend: bool, len: usize) -> bool {
        match direction {
            Direction::Left => self.move_left(extend),
            Direction::Right => self.move_right(extend, len),
        }
    }

    fn step(&mut self, direction: Direction, extend: bool, len: usize) -> bool {
        let before = self.clone();
        let origin = self.index;

        let moved = match direction {
            Direction::Left if self.index > 0 => {
                self.index -= 1;
                true
            }
            Direction::Right if self.index < len => {
                self.index += 1;
                true
            }
            _ => false,
        };

        if !extend {
            self.clear_selection();
        } else if moved {
            self.start_or_extend_selection(origin);
        }

        trace!(?direction, extend, index = self.index, "cursor step");
        *self != before
    }

    /// Anchor at `origin` unless a selection is already running, then let
    /// the focus follow the caret.
    fn start_or_extend_selection(&mut self, origin: usize) {
        let anchor = self.selection.map_or(origin, |sel| sel.anchor());
        self.selection = Selection::new(anchor, self.index);
    }

    /// Drop any selection
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Largest prefix length `i` with `padding + width(chars[0..i)) <= x`.
    ///
    /// `x` is in the widget's local frame. A click left of the first glyph
    /// yields 0 and a click past the last glyph yields `buffer.len()`.
    pub fn locate_from_device_x<M>(buffer: &TextBuffer, x: f32, padding: f32, metrics: &M) -> usize
    where
        M: GlyphMetrics + ?Sized,
    {
        let mut right_edge = padding;
        let mut utf8 = [0u8; 4];

        for (i, ch) in buffer.chars().enumerate() {
            right_edge += metrics.width_of(ch.encode_utf8(&mut utf8));
            if right_edge > x {
                return i;
            }
        }
        buffer.len()
    }

    /// Pointer pressed at local `x`: reset any selection and relocate the caret
    pub fn on_pointer_down<M>(&mut self, buffer: &TextBuffer, x: f32, padding: f32, metrics: &M)
    where
        M: GlyphMetrics + ?Sized,
    {
        self.clear_selection();
        self.index = Self::locate_from_device_x(buffer, x, padding, metrics);
        trace!(x, index = self.index, "caret located from pointer");
    }
}
