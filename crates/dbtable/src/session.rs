//! Commit/rollback glue around a unit of work.

use crate::connection::DbConnection;
use crate::error::Result;

/// Runs `action` against the connection, committing on success and
/// rolling back on failure.
///
/// The action's error is returned as-is; a failure of the rollback
/// itself is logged and swallowed so it cannot mask the original error.
///
/// # Example
///
/// ```ignore
/// let saved = dbtable::with_commit(&mut conn, |conn| {
///     people.save(conn, &mut person, true)?;
///     people.soft_delete(conn, &retired)?;
///     Ok(())
/// });
/// ```
pub fn with_commit<C, T, Op>(conn: &mut C, action: Op) -> Result<T>
where
    C: DbConnection,
    Op: FnOnce(&mut C) -> Result<T>,
{
    match action(conn) {
        Ok(value) => {
            conn.commit()?;
            Ok(value)
        }
        Err(err) => {
            tracing::error!(error = %err, "unit of work failed, rolling back");
            if let Err(rollback_err) = conn.rollback() {
                tracing::error!(error = %rollback_err, "rollback failed");
            }
            Err(err)
        }
    }
}
