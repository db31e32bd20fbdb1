//! Core error model.

use thiserror::Error;

/// Result type used across the shared primitives.
pub type CoreResult<T> = Result<T, CoreError>;

/// Error raised while parsing or validating shared primitives.
///
/// Keep this focused on deterministic input failures. Transport and storage
/// concerns belong to the crates that own them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// An identifier was invalid (e.g. parse failure, zero).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A resource name did not match any known collection.
    #[error("unknown resource: {0}")]
    UnknownResource(String),
}

impl CoreError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn unknown_resource(msg: impl Into<String>) -> Self {
        Self::UnknownResource(msg.into())
    }
}
