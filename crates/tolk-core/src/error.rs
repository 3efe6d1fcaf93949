//! Error types for the Tolk application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::OptionField;

/// A shared error type for the entire Tolk application.
///
/// Every failure a front-end has to report to the user maps onto one of these
/// variants, with automatic conversion from common error types via `From`.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum TolkError {
    /// The local inference server could not be started.
    #[error("Failed to start inference server: {message}")]
    BackendLaunch { message: String },

    /// The inference endpoint answered with a non-success status.
    #[error("API Error: {status}. {body}")]
    Api { status: u16, body: String },

    /// The request never produced an HTTP status (connection refused, reset, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// A decoding-option field does not hold a valid number.
    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InputParse {
        field: OptionField,
        value: String,
        reason: String,
    },

    /// A turn was requested while another one is still in flight.
    #[error("A translation is already in progress")]
    TurnInFlight,

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TolkError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an Api error from a status code and raw response body
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// Creates a BackendLaunch error
    pub fn backend_launch(message: impl Into<String>) -> Self {
        Self::BackendLaunch {
            message: message.into(),
        }
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates an InputParse error for a decoding-option field
    pub fn input_parse(
        field: OptionField,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InputParse {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an Api error
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Check if this is an InputParse error
    pub fn is_input_parse(&self) -> bool {
        matches!(self, Self::InputParse { .. })
    }

    /// Check if this is a BackendLaunch error
    pub fn is_backend_launch(&self) -> bool {
        matches!(self, Self::BackendLaunch { .. })
    }

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Status code of an Api error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for TolkError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for TolkError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for TolkError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, TolkError>`.
pub type Result<T> = std::result::Result<T, TolkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_matches_dialog_text() {
        let err = TolkError::api(500, "model not found");
        assert_eq!(err.to_string(), "API Error: 500. model not found");
        assert_eq!(err.status(), Some(500));
        assert!(err.is_api());
    }

    #[test]
    fn test_input_parse_names_the_field() {
        let err = TolkError::input_parse(OptionField::TopK, "forty", "not an integer");
        let text = err.to_string();
        assert!(text.contains("Top-K"));
        assert!(text.contains("forty"));
        assert!(err.is_input_parse());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: TolkError = io.into();
        assert!(err.is_io());
        assert!(err.to_string().contains("NotFound"));
    }

    #[test]
    fn test_toml_conversion_is_a_serialization_error() {
        let parse_err = toml::from_str::<toml::Value>("endpoint = ").unwrap_err();
        let err: TolkError = parse_err.into();
        assert!(matches!(err, TolkError::Serialization { ref format, .. } if format == "TOML"));
        assert!(!err.is_io());
    }
}
