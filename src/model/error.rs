//! Errors raised when the model rejects a value.

use thiserror::Error;

/// A rejected entity construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModelError {
    #[error("{kind} requires a non-empty {field}")]
    EmptyField {
        kind: &'static str,
        field: &'static str,
    },

    #[error("invalid hash value '{value}': expected hexadecimal digits")]
    InvalidHashValue { value: String },

    #[error("invalid identifier '{id}': {reason}")]
    InvalidId { id: String, reason: String },
}
