//! canvas-input core - shared types
//!
//! Errors, widget configuration and the input event bus used by the
//! editing state machine in `canvas-input-editor`.

pub mod config;
pub mod events;
pub mod error;

pub use config::{CaseTransform, FontConfig, InputConfig};
pub use events::{EventBus, EventSubscription, InputEvent, KeyCode, SubscriptionId};
pub use error::{InputError, Result};

/// canvas-input version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
