//! Hard-delete and soft-delete statement generation.
//!
//! Soft deletes flag rows via the `[IsDeleted]` column instead of
//! removing them; hard deletes issue real DELETEs. Both come in a
//! by-keys shape (batch, IN-list from [`super::key_list`]) and a
//! by-filter shape (WHERE text from [`super::where_clause`], possibly
//! empty — the unconditioned form is deliberate pass-through).

/// Builds the batch soft-delete statement.
#[must_use]
pub fn soft_delete_by_keys(table: &str, primary_key: &str, keys: &str) -> String {
    format!("UPDATE [dbo].[{table}] SET [IsDeleted] = 1 WHERE {primary_key} IN ({keys})")
}

/// Builds the filter soft-delete statement. With empty WHERE text this
/// flags every row in the table.
#[must_use]
pub fn soft_delete_by_filter(table: &str, where_text: &str) -> String {
    format!("UPDATE [dbo].[{table}] SET [IsDeleted] = 1 {where_text}")
}

/// Builds the batch hard-delete statement.
#[must_use]
pub fn delete_by_keys(table: &str, primary_key: &str, keys: &str) -> String {
    format!("DELETE FROM [dbo].[{table}] WHERE {primary_key} IN ({keys})")
}

/// Builds the filter hard-delete statement. With empty WHERE text this
/// deletes every row in the table.
#[must_use]
pub fn delete_by_filter(table: &str, where_text: &str) -> String {
    format!("DELETE FROM [dbo].[{table}] {where_text}")
}
