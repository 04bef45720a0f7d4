//! Error types for ProviderTone.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire ProviderTone workspace.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ToneError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", "template", ...
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Persisted state could not be migrated to the current schema
    #[error("Migration error: {0}")]
    Migration(String),

    /// An external generation call did not complete
    #[error("Generation error: {0}")]
    Generation(String),

    /// The generation service answered, but not with a usable style profile
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Step cursor outside `1..=max` for the track
    #[error("Invalid step {step} for {track} track (valid range 1..={max})")]
    InvalidStep { track: String, step: u32, max: u32 },

    /// Section name that the track does not have
    #[error("Unknown section '{section}' for {track} track")]
    UnknownSection { track: String, section: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToneError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

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

    /// Creates a Generation error
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }

    /// Creates a MalformedResponse error
    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Creates a Migration error
    pub fn migration(message: impl Into<String>) -> Self {
        Self::Migration(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Creates an InvalidStep error
    pub fn invalid_step(track: impl Into<String>, step: u32, max: u32) -> Self {
        Self::InvalidStep {
            track: track.into(),
            step,
            max,
        }
    }

    /// Creates an UnknownSection error
    pub fn unknown_section(track: impl Into<String>, section: impl Into<String>) -> Self {
        Self::UnknownSection {
            track: track.into(),
            section: section.into(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Check if this is an invalid step error
    pub fn is_invalid_step(&self) -> bool {
        matches!(self, Self::InvalidStep { .. })
    }

    /// Check if this error came out of an external generation call,
    /// either because the call failed or because its answer was unusable.
    pub fn is_generation_failure(&self) -> bool {
        matches!(self, Self::Generation(_) | Self::MalformedResponse(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ToneError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ToneError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<version_migrate::MigrationError> for ToneError {
    fn from(err: version_migrate::MigrationError) -> Self {
        use version_migrate::MigrationError;

        match err {
            MigrationError::DeserializationError(_) | MigrationError::SerializationError(_) => {
                Self::Serialization {
                    format: "migration".to_string(),
                    message: err.to_string(),
                }
            }
            _ => Self::Migration(err.to_string()),
        }
    }
}

/// Conversion from anyhow::Error (used at the CLI boundary)
impl From<anyhow::Error> for ToneError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Conversion from String (for error messages)
impl From<String> for ToneError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, ToneError>`.
pub type Result<T> = std::result::Result<T, ToneError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_step_message() {
        let err = ToneError::invalid_step("messaging", 9, 6);
        assert!(err.is_invalid_step());
        assert_eq!(
            err.to_string(),
            "Invalid step 9 for messaging track (valid range 1..=6)"
        );
    }

    #[test]
    fn test_generation_failure_classification() {
        assert!(ToneError::generation("timeout").is_generation_failure());
        assert!(ToneError::malformed_response("no json").is_generation_failure());
        assert!(!ToneError::io("disk").is_generation_failure());
    }

    #[test]
    fn test_from_serde_json_error() {
        let err: ToneError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(err.is_serialization());
    }
}
