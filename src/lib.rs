//! canvas-input - single-line text input for canvas scene graphs
//!
//! The widget owns a text buffer, a caret and a selection, and turns
//! keyboard and pointer events into edits. Rendering, font rasterization
//! and platform event delivery stay outside; the widget exposes a
//! repaint flag and a `RenderSnapshot` for the renderer to read.
//!
//! ## Architecture
//!
//! - `canvas-input-core`: errors, configuration, input events and the event bus
//! - `canvas-input-editor`: buffer, cursor, selection, metrics and the edit controller

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod script;

// Re-export main components for library usage
pub use canvas_input_core as core;
pub use canvas_input_editor as editor;

/// Prelude module for convenient imports
pub mod prelude {
    pub use canvas_input_core::{CaseTransform, EventBus, InputConfig, InputEvent, KeyCode};
    pub use canvas_input_editor::{
        CellMetrics, Command, Direction, EditController, Frame, GlyphMetrics, InputWidget,
        MeasureCache, MonospaceMeasurer, Outcome, RenderSnapshot,
    };
}
