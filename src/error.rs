//! Error types for the Sedge library.
//!
//! All fallible operations in Sedge return [`Result`], whose error type is
//! the [`SedgeError`] enum. Construction-time failures (bad field names,
//! malformed date-math expressions) are raised synchronously at the call
//! that causes them; there is no deferred validation.
//!
//! # Examples
//!
//! ```
//! use sedge::error::{Result, SedgeError};
//!
//! fn check_name(name: &str) -> Result<()> {
//!     if name.trim().is_empty() {
//!         return Err(SedgeError::invalid_field_name("field name cannot be empty"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_name("title").is_ok());
//! assert!(check_name("  ").is_err());
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for Sedge operations.
#[derive(Error, Debug)]
pub enum SedgeError {
    /// A field descriptor was constructed with an empty or blank name.
    #[error("invalid field name: {0}")]
    InvalidFieldName(String),

    /// A date-math expression could not be parsed.
    #[error("invalid date math expression: {0}")]
    InvalidDateMath(String),

    /// An operation was invoked outside the declared capabilities of a field.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Schema registry errors (duplicate names, empty schema).
    #[error("schema error: {0}")]
    Schema(String),

    /// I/O errors (workspace provisioning, template copying).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases.
    #[error("error: {0}")]
    Other(String),

    /// Generic anyhow error.
    #[error("error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with [`SedgeError`].
pub type Result<T> = std::result::Result<T, SedgeError>;

impl SedgeError {
    /// Create a new invalid field name error.
    pub fn invalid_field_name<S: Into<String>>(msg: S) -> Self {
        SedgeError::InvalidFieldName(msg.into())
    }

    /// Create a new date math error.
    pub fn date_math<S: Into<String>>(msg: S) -> Self {
        SedgeError::InvalidDateMath(msg.into())
    }

    /// Create a new unsupported operation error.
    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        SedgeError::UnsupportedOperation(msg.into())
    }

    /// Create a new schema error.
    pub fn schema<S: Into<String>>(msg: S) -> Self {
        SedgeError::Schema(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SedgeError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = SedgeError::invalid_field_name("field name cannot be empty");
        assert_eq!(
            error.to_string(),
            "invalid field name: field name cannot be empty"
        );

        let error = SedgeError::date_math("unexpected token at offset 4");
        assert_eq!(
            error.to_string(),
            "invalid date math expression: unexpected token at offset 4"
        );

        let error = SedgeError::schema("field 'title' already exists");
        assert_eq!(error.to_string(), "schema error: field 'title' already exists");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "template not found");
        let error = SedgeError::from(io_error);

        match error {
            SedgeError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }
}
