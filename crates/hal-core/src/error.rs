//! Error types for HAL document construction.

use thiserror::Error;

/// Top-level result type for HAL operations.
pub type Result<T> = std::result::Result<T, HalError>;

/// Top-level error type for HAL.
#[derive(Debug, Error)]
pub enum HalError {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ArgumentError),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Construction-time validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("link href must not be empty")]
    EmptyHref,

    #[error("CURIE link name must not be empty")]
    EmptyLinkName,

    #[error("relation name must not be empty")]
    EmptyRelationName,
}

impl HalError {
    /// Returns `true` for construction-time validation failures.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, HalError::InvalidArgument(_))
    }
}
