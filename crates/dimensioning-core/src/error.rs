//! Error handling for the dimensioning engine
//!
//! Every failure is detected before any computation starts, so a caller
//! either receives a complete result or one of these errors, never a
//! partially filled result.

use thiserror::Error;

use crate::validation::fields;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, DimensioningError>;

/// Error type for dimensioning and quality operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DimensioningError {
    /// A numeric field is non-positive, out of range or not finite
    #[error("Invalid input for `{field}`: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// The codec identifier does not resolve in the catalog
    #[error("Codec not found: {name}")]
    CodecNotFound { name: String },

    /// The target grade of service cannot be met within the circuit ceiling
    #[error(
        "Target GOS {target_gos} unreachable for {traffic} Erlangs within {ceiling} circuits"
    )]
    SizingUnreachable {
        traffic: f64,
        target_gos: f64,
        ceiling: u32,
    },

    /// Engine configuration rejected at load time
    #[error("Invalid configuration: {details}")]
    InvalidConfig { details: String },
}

impl DimensioningError {
    /// Create a new invalid input error for the named field
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Create a new codec not found error
    pub fn codec_not_found(name: impl Into<String>) -> Self {
        Self::CodecNotFound { name: name.into() }
    }

    /// Create a new invalid configuration error
    pub fn invalid_config(details: impl Into<String>) -> Self {
        Self::InvalidConfig {
            details: details.into(),
        }
    }

    /// Name of the offending field, for validation errors
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidInput { field, .. } => Some(*field),
            Self::CodecNotFound { .. } => Some(fields::CODEC),
            _ => None,
        }
    }

    /// Whether the error was caused by the caller's input rather than the
    /// engine's limits or configuration
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::CodecNotFound { .. })
    }
}
