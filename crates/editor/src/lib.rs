//! canvas-input editor
//!
//! Editing state machine for a single-line text input:
//! - Rope-backed text buffer with bounds-checked edits
//! - Caret movement, shift-extend selection and pointer hit-testing
//! - Edit controller that gates input and signals repaints
//! - Widget binding to the input event bus

pub mod buffer;
pub mod cursor;
pub mod selection;
pub mod metrics;
pub mod commands;
pub mod controller;
pub mod widget;

pub use buffer::TextBuffer;
pub use cursor::{CursorModel, Direction};
pub use selection::Selection;
pub use metrics::{CellMetrics, GlyphMetrics, MeasureCache, MonospaceMeasurer, TextMeasurer};
pub use commands::{Command, Outcome, RejectReason};
pub use controller::{EditController, RenderSnapshot};
pub use widget::{Frame, InputWidget};
