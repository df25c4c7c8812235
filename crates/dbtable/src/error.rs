//! Error types for the accessor.

use thiserror::Error;

use crate::connection::BackendError;

/// Accessor-level errors.
///
/// Backend failures are propagated unchanged; this layer never catches,
/// wraps semantically, or retries them. Degenerate no-ops (empty key
/// lists, empty batches) are **not** errors — they return `Ok(0)`.
#[derive(Debug, Error)]
pub enum DbError {
    /// Failure from the underlying statement execution.
    #[error("database error: {0}")]
    Backend(#[from] BackendError),

    /// A key-dependent operation was invoked on a row model with no
    /// primary key column. Configuration error, surfaced immediately.
    #[error("no primary key column defined for table {0}")]
    MissingPrimaryKey(&'static str),

    /// Row materialization or identity coercion failure, including a
    /// mapped column missing from the result set.
    #[error("value error: {0}")]
    Value(#[from] dbtable_core::ValueError),
}

/// Result type alias for accessor operations.
pub type Result<T> = std::result::Result<T, DbError>;
