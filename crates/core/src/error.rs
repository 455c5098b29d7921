//! Domain error model.

use thiserror::Error;

/// Result type used across the client core.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Covers deterministic input failures (malformed filter arguments, bad
/// identifiers). Transport failures are modelled by the fetch layer instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. empty or unparsable).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
