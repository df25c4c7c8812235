//! The backend connection contract.

use dbtable_core::{Row, SqlValue};

/// Opaque error type produced by a backend driver.
pub type BackendError = Box<dyn std::error::Error + Send + Sync>;

/// A live backend connection with an optional open transaction.
///
/// The accessor borrows a handle per call and executes complete statement
/// text against it. It never commits, rolls back, or closes the handle —
/// those are caller responsibilities (see [`crate::with_commit`] for the
/// usual wrapper). A single handle must not be used concurrently from
/// more than one in-flight operation.
pub trait DbConnection {
    /// Executes a statement that produces rows.
    fn query(&mut self, sql: &str) -> Result<Vec<Row>, BackendError>;

    /// Executes a statement and returns the number of affected rows.
    fn execute(&mut self, sql: &str) -> Result<u64, BackendError>;

    /// Executes a statement and returns the first column of the first
    /// row, if any (`SELECT SCOPE_IDENTITY()` after a merge).
    fn query_scalar(&mut self, sql: &str) -> Result<Option<SqlValue>, BackendError>;

    /// Commits the open transaction.
    fn commit(&mut self) -> Result<(), BackendError>;

    /// Rolls back the open transaction.
    fn rollback(&mut self) -> Result<(), BackendError>;
}
