//! Edit Controller
//!
//! Single owner of an input's edit transaction. Every public operation
//! checks the gating conditions, delegates to the cursor and buffer,
//! refreshes placeholder visibility and raises the level-triggered
//! "needs render" flag. Multiple edits between two frames coalesce into a
//! single repaint; the renderer re-reads state via [`EditController::snapshot`].

use std::ops::Range;

use serde::Serialize;
use tracing::{debug, warn};

use canvas_input_core::{CaseTransform, InputConfig, InputError};

use crate::buffer::TextBuffer;
use crate::commands::{Command, Outcome, RejectReason};
use crate::cursor::{CursorModel, Direction};
use crate::metrics::GlyphMetrics;
use crate::selection::Selection;

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub text: String,
    pub placeholder_visible: bool,
    pub placeholder_text: String,
    pub caret_index: usize,
    pub caret_x: f32,
    /// Normalized `[start, end)` char range
    pub selection: Option<(usize, usize)>,
    /// Left x and width of the selection highlight
    pub selection_span: Option<(f32, f32)>,
    pub disabled: bool,
    pub focused: bool,
}

/// Owns the buffer and cursor of one input and applies edits to them
pub struct EditController {
    buffer: TextBuffer,
    cursor: CursorModel,
    config: InputConfig,
    placeholder_visible: bool,
    focused: bool,
    needs_render: bool,
}

impl EditController {
    /// Create an empty controller
    pub fn new(config: InputConfig) -> Self {
        let focused = config.auto_focus;
        Self {
            buffer: TextBuffer::new(),
            cursor: CursorModel::new(),
            config,
            placeholder_visible: true,
            focused,
            needs_render: true,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Current value
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// Character count
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the value is empty
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Underlying text buffer
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Caret and selection state
    pub fn cursor(&self) -> &CursorModel {
        &self.cursor
    }

    /// Active selection, if any
    pub fn selection(&self) -> Option<Selection> {
        self.cursor.selection()
    }

    /// Text covered by the active selection
    pub fn selected_text(&self) -> Option<String> {
        let range = self.cursor.selection()?.range();
        self.buffer.slice(range).ok()
    }

    /// Whether the placeholder hint should be drawn
    pub fn placeholder_visible(&self) -> bool {
        self.placeholder_visible
    }

    /// Whether all input is ignored
    pub fn is_disabled(&self) -> bool {
        self.config.disabled
    }

    /// Whether the caret is shown and keys are accepted
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether a repaint is pending
    pub fn needs_render(&self) -> bool {
        self.needs_render
    }

    /// Read and clear the repaint flag
    pub fn take_needs_render(&mut self) -> bool {
        std::mem::take(&mut self.needs_render)
    }

    /// Enable or disable input. Requests a repaint on change.
    pub fn set_disabled(&mut self, disabled: bool) {
        if self.config.disabled != disabled {
            self.config.disabled = disabled;
            self.needs_render = true;
        }
    }

    /// Gain or lose focus. Requests a repaint on change.
    pub fn set_focused(&mut self, focused: bool) {
        if self.focused != focused {
            self.focused = focused;
            self.needs_render = true;
        }
    }

    /// Replace the value programmatically. Control characters are dropped
    /// and the text is cut to the maximum length; the caret ends up at the tail.
    pub fn set_text(&mut self, text: &str) {
        let limit = self.config.max_length.unwrap_or(usize::MAX);
        let value: String = text.chars().filter(|c| !c.is_control()).take(limit).collect();

        self.buffer.set_text(&value);
        self.cursor = CursorModel::at(self.buffer.len());
        self.commit();
    }

    /// Apply a command
    pub fn execute<M>(&mut self, command: Command, metrics: &M) -> Outcome
    where
        M: GlyphMetrics + ?Sized,
    {
        debug!(?command, "executing");
        match command {
            Command::InsertChar(ch) => self.handle_character(ch, self.config.case_transform),
            Command::DeleteBackward => self.handle_backspace(),
            Command::DeleteForward => self.handle_delete(),
            Command::Move { direction, extend } => self.handle_arrow(direction, extend),
            Command::PointerDown { x } => self.handle_pointer_down(x, metrics),
            Command::ClearSelection => self.handle_clear_selection(),
            Command::SetFocus(focused) => {
                self.set_focused(focused);
                Outcome::Applied
            }
        }
    }

    /// Insert one typed character at the caret
    pub fn handle_character(&mut self, ch: char, transform: CaseTransform) -> Outcome {
        if self.config.disabled {
            return Outcome::Rejected(RejectReason::Disabled);
        }
        if ch.is_control() {
            return Outcome::Rejected(RejectReason::NotPrintable);
        }
        if self.config.max_length.is_some_and(|max| self.buffer.len() >= max) {
            return Outcome::Rejected(RejectReason::MaxLength);
        }

        // Typing does not replace a selection, it only collapses it
        self.cursor.clear_selection();

        let ch = transform.apply(ch);
        let mut utf8 = [0u8; 4];
        if let Err(err) = self.buffer.insert_at(self.cursor.index(), ch.encode_utf8(&mut utf8)) {
            return self.recover(err);
        }
        self.cursor.move_right(false, self.buffer.len());
        self.commit()
    }

    /// Delete the character before the caret
    pub fn handle_backspace(&mut self) -> Outcome {
        if self.config.disabled {
            return Outcome::Rejected(RejectReason::Disabled);
        }
        let index = self.cursor.index();
        if index == 0 {
            return Outcome::Rejected(RejectReason::AtBoundary);
        }

        if let Err(err) = self.buffer.delete_range(index - 1, index) {
            return self.recover(err);
        }
        self.cursor.move_left(false);
        self.commit()
    }

    /// Delete the selection, or the character after the caret
    pub fn handle_delete(&mut self) -> Outcome {
        if self.config.disabled {
            return Outcome::Rejected(RejectReason::Disabled);
        }

        let range = match self.cursor.selection() {
            Some(selection) => selection.range(),
            None if self.cursor.index() < self.buffer.len() => {
                self.cursor.index()..self.cursor.index() + 1
            }
            None => return Outcome::Rejected(RejectReason::AtBoundary),
        };

        if let Err(err) = self.buffer.delete_range(range.start, range.end) {
            return self.recover(err);
        }
        self.cursor.clear_selection();
        self.cursor.set_index(range.start);
        self.commit()
    }

    /// Move the caret one character, optionally extending the selection
    pub fn handle_arrow(&mut self, direction: Direction, extend: bool) -> Outcome {
        if self.config.disabled {
            return Outcome::Rejected(RejectReason::Disabled);
        }
        if self.cursor.move_direction(direction, extend, self.buffer.len()) {
            self.commit()
        } else {
            Outcome::Rejected(RejectReason::AtBoundary)
        }
    }

    /// Pointer pressed at local `x`. Focuses the input and relocates the caret.
    pub fn handle_pointer_down<M>(&mut self, x: f32, metrics: &M) -> Outcome
    where
        M: GlyphMetrics + ?Sized,
    {
        if self.config.disabled {
            return Outcome::Rejected(RejectReason::Disabled);
        }
        self.focused = true;
        self.cursor
            .on_pointer_down(&self.buffer, x, self.config.cursor_padding, metrics);
        self.commit()
    }

    /// Explicit selection reset
    pub fn handle_clear_selection(&mut self) -> Outcome {
        if self.config.disabled {
            return Outcome::Rejected(RejectReason::Disabled);
        }
        if !self.cursor.has_selection() {
            return Outcome::Rejected(RejectReason::NothingSelected);
        }
        self.cursor.clear_selection();
        self.commit()
    }

    /// Caret x-position in the widget's local frame
    pub fn caret_x<M>(&self, metrics: &M) -> f32
    where
        M: GlyphMetrics + ?Sized,
    {
        self.config.cursor_padding + self.span_width(0..self.cursor.index(), metrics)
    }

    /// Left x and width of the selection highlight
    pub fn selection_span<M>(&self, metrics: &M) -> Option<(f32, f32)>
    where
        M: GlyphMetrics + ?Sized,
    {
        let range = self.cursor.selection()?.range();
        let left = self.config.cursor_padding + self.span_width(0..range.start, metrics);
        let width = self.span_width(range, metrics);
        Some((left, width))
    }

    /// Capture the current state for rendering
    pub fn snapshot<M>(&self, metrics: &M) -> RenderSnapshot
    where
        M: GlyphMetrics + ?Sized,
    {
        RenderSnapshot {
            text: self.buffer.text(),
            placeholder_visible: self.placeholder_visible,
            placeholder_text: self.config.placeholder_text.clone(),
            caret_index: self.cursor.index(),
            caret_x: self.caret_x(metrics),
            selection: self
                .cursor
                .selection()
                .map(|sel| (sel.range().start, sel.range().end)),
            selection_span: self.selection_span(metrics),
            disabled: self.config.disabled,
            focused: self.focused,
        }
    }

    /// Sum of per-glyph widths over a char range. Glyphs are measured one
    /// at a time, the same way the pointer hit-test walks them, so a width
    /// cache only ever holds single characters.
    fn span_width<M>(&self, range: Range<usize>, metrics: &M) -> f32
    where
        M: GlyphMetrics + ?Sized,
    {
        let mut utf8 = [0u8; 4];
        self.buffer
            .chars()
            .skip(range.start)
            .take(range.len())
            .map(|ch| metrics.width_of(ch.encode_utf8(&mut utf8)))
            .sum()
    }

    /// Post-mutation bookkeeping shared by every applied operation
    fn commit(&mut self) -> Outcome {
        self.placeholder_visible = self.buffer.is_empty();
        self.needs_render = true;
        self.check_invariants();
        Outcome::Applied
    }

    fn check_invariants(&self) {
        let len = self.buffer.len();
        debug_assert!(self.cursor.index() <= len, "cursor past end of buffer");
        if let Some(selection) = self.cursor.selection() {
            debug_assert_ne!(selection.anchor(), selection.focus());
            debug_assert_eq!(selection.focus(), self.cursor.index());
            debug_assert!(selection.anchor() <= len);
        }
    }

    /// A buffer bounds error means the cursor drifted. Panic in debug builds,
    /// clamp back into range in release builds.
    fn recover(&mut self, err: InputError) -> Outcome {
        debug_assert!(!err.is_invariant_violation(), "edit invariant broken: {}", err);
        warn!(error = %err, "clamping cursor after invariant violation");

        let len = self.buffer.len();
        self.cursor.clear_selection();
        self.cursor.set_index(self.cursor.index().min(len));
        self.commit()
    }
}
