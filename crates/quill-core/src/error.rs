//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
///
/// `InvalidId` and `NotFound` are deliberately distinct: callers react to a
/// malformed identifier by correcting their input, and to a missing record by
/// treating it as gone.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Post not found: {id}")]
    NotFound { id: String },

    #[error("Malformed post id: {0}")]
    InvalidId(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Store-level errors, propagated unchanged through the lifecycle manager.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store connection failed: {0}")]
    Connection(String),

    #[error("Store query failed: {0}")]
    Query(String),
}
