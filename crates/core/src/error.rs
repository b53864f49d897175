//! Error types for canvas-input
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Main error type for the input widget
#[derive(Error, Debug)]
pub enum InputError {
    #[error("index {index} out of range for buffer of length {len}")]
    OutOfRange { index: usize, len: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Subscription is no longer attached to the event bus")]
    Unsubscribed,
}

/// Result type alias for canvas-input operations
pub type Result<T> = std::result::Result<T, InputError>;

impl InputError {
    /// Whether this error can only come from a broken cursor/buffer invariant
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, InputError::OutOfRange { .. })
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            InputError::Io(e) => format!("File operation failed: {}", e),
            InputError::Config(msg) => format!("Configuration error: {}", msg),
            InputError::TomlParse(e) => format!("Invalid configuration file: {}", e),
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_is_invariant_violation() {
        let err = InputError::OutOfRange { index: 7, len: 3 };
        assert!(err.is_invariant_violation());
        assert_eq!(err.to_string(), "index 7 out of range for buffer of length 3");
    }

    #[test]
    fn test_config_error_is_not_invariant_violation() {
        let err = InputError::Config("max_length must be positive".into());
        assert!(!err.is_invariant_violation());
        assert!(err.user_message().starts_with("Configuration error"));
    }
}
