//! # Error Types
//!
//! Structured error types for oven_core. A failed calculation names the
//! offending field so the message can be shown to the end user verbatim.
//!
//! ## Example
//!
//! ```rust
//! use oven_core::errors::{CalcError, CalcResult};
//!
//! fn validate_power(power_kw: f64) -> CalcResult<()> {
//!     if power_kw <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "power",
//!             power_kw.to_string(),
//!             "Power must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! let err = validate_power(0.0).unwrap_err();
//! assert_eq!(err.error_code(), "INVALID_INPUT");
//! assert!(err.to_string().contains("'power'"));
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for oven_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is zero, negative, or not a finite number where the
    /// formulas require a positive quantity
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Reading a settings or request file failed
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON request or settings document could not be parsed
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// A computed value has no input to blame
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        CalcError::Internal {
            message: message.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Name of the rejected field, if this is an input error
    pub fn field(&self) -> Option<&str> {
        match self {
            CalcError::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}

/// Require `value` to be a finite number strictly greater than zero.
pub(crate) fn require_positive(field: &str, value: f64, reason: &str) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), reason));
    }
    Ok(())
}

/// Input that a computed quantity depends on: field name, the value as
/// given, and the factor it contributes to the quantity.
pub(crate) type Influence = (&'static str, f64, f64);

/// Fail when a computed quantity overflowed or underflowed to a non-finite
/// value. The error names the influence whose factor is farthest from 1
/// on a log scale.
pub(crate) fn require_finite_output(quantity: &str, value: f64, influences: &[Influence]) -> CalcResult<()> {
    if value.is_finite() {
        return Ok(());
    }
    let spread = |factor: f64| factor.abs().ln().abs();
    let (field, input, _) = influences
        .iter()
        .copied()
        .max_by(|a, b| spread(a.2).total_cmp(&spread(b.2)))
        .ok_or_else(|| CalcError::internal(format!("'{}' is {} with no input to blame", quantity, value)))?;
    Err(CalcError::invalid_input(
        field,
        input.to_string(),
        format!("Value is out of range: '{}' evaluates to {}", quantity, value),
    ))
}

/// Require `value` to be a finite number (any sign).
pub(crate) fn require_finite(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Value must be a finite number",
        ));
    }
    Ok(())
}
