//! Text Buffer
//!
//! Single-line edit buffer backed by a rope. All positions are char
//! offsets in `[0, len]`; every mutating call is bounds-checked and
//! reports `OutOfRange` instead of panicking.

use std::ops::Range;

use ropey::Rope;
use canvas_input_core::{InputError, Result};

/// The character sequence being edited
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    rope: Rope,
}

impl TextBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Create a buffer from a string
    pub fn from_str(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Get the full text content
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Get the text in a char range
    pub fn slice(&self, range: Range<usize>) -> Result<String> {
        self.check_range(&range)?;
        Ok(self.rope.slice(range).to_string())
    }

    /// Current character count
    pub fn len(&self) -> usize {
        self.rope.len_chars()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Character at `pos`, which must be below `len()`
    pub fn char_at(&self, pos: usize) -> Result<char> {
        if pos >= self.len() {
            return Err(self.out_of_range(pos));
        }
        Ok(self.rope.char(pos))
    }

    /// Iterate over the characters in document order
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.rope.chars()
    }

    /// Insert `text` before `pos`
    pub fn insert_at(&mut self, pos: usize, text: &str) -> Result<()> {
        if pos > self.len() {
            return Err(self.out_of_range(pos));
        }
        self.rope.insert(pos, text);
        Ok(())
    }

    /// Remove the chars in `[start, end)`. An empty range is a no-op.
    pub fn delete_range(&mut self, start: usize, end: usize) -> Result<()> {
        let range = start..end;
        self.check_range(&range)?;
        if !range.is_empty() {
            self.rope.remove(range);
        }
        Ok(())
    }

    /// Replace the whole content
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }

    fn check_range(&self, range: &Range<usize>) -> Result<()> {
        if range.end > self.len() {
            return Err(self.out_of_range(range.end));
        }
        if range.start > range.end {
            return Err(self.out_of_range(range.start));
        }
        Ok(())
    }

    fn out_of_range(&self, index: usize) -> InputError {
        InputError::OutOfRange {
            index,
            len: self.len(),
        }
    }
}
