//! # Error Types
//!
//! Structured error types for weld_core. Degenerate geometry (negative
//! depths, zero-width grooves, empty layer lists) is absorbed by clamping and
//! never reaches this type; errors are reserved for inputs that are outside
//! the domain altogether and for file/settings I/O.
//!
//! ## Example
//!
//! ```rust
//! use weld_core::errors::{CalcError, CalcResult};
//!
//! fn validate_thickness(thickness_mm: f64) -> CalcResult<()> {
//!     if thickness_mm <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "thickness_mm",
//!             thickness_mm.to_string(),
//!             "Thickness must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_thickness(-3.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for weld_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for estimation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong sign, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Process code could not be parsed
    #[error("Unknown welding process: {code}")]
    UnknownProcess { code: String },

    /// Percent-mode distribution does not add up to 100
    #[error("Invalid distribution for zone '{zone}': shares sum to {sum}, expected 100 ± {tolerance}")]
    InvalidDistribution {
        zone: String,
        sum: f64,
        tolerance: f64,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create an UnknownProcess error
    pub fn unknown_process(code: impl Into<String>) -> Self {
        CalcError::UnknownProcess { code: code.into() }
    }

    /// Create an InvalidDistribution error
    pub fn invalid_distribution(zone: impl Into<String>, sum: f64, tolerance: f64) -> Self {
        CalcError::InvalidDistribution {
            zone: zone.into(),
            sum,
            tolerance,
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Check whether the caller can fix this by correcting input values
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. }
                | CalcError::MissingField { .. }
                | CalcError::UnknownProcess { .. }
                | CalcError::InvalidDistribution { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::UnknownProcess { .. } => "UNKNOWN_PROCESS",
            CalcError::InvalidDistribution { .. } => "INVALID_DISTRIBUTION",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("thickness_mm", "-5", "Thickness must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("test").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::unknown_process("XYZ").error_code(), "UNKNOWN_PROCESS");
        assert_eq!(
            CalcError::invalid_distribution("inside", 99.0, 0.1).error_code(),
            "INVALID_DISTRIBUTION"
        );
    }

    #[test]
    fn test_input_error_classification() {
        assert!(CalcError::invalid_distribution("inside", 98.0, 0.1).is_input_error());
        assert!(!CalcError::file_error("open", "a.wtp", "not found").is_input_error());
    }

    #[test]
    fn test_distribution_message() {
        let msg = CalcError::invalid_distribution("inside", 99.5, 0.1).to_string();
        assert!(msg.contains("inside"));
        assert!(msg.contains("99.5"));
    }
}
