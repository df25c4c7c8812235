//! SELECT statement generation.

/// Builds a `SELECT *` statement for the table.
///
/// `where_text` comes from [`super::where_clause`] and may be empty, in
/// which case the statement scans the whole table (and keeps the trailing
/// space — the statement text is a wire contract).
#[must_use]
pub fn select(table: &str, where_text: &str) -> String {
    format!("SELECT * FROM [dbo].[{table}] {where_text}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_with_where() {
        assert_eq!(
            select("Person", "WHERE Name = 'Alice'"),
            "SELECT * FROM [dbo].[Person] WHERE Name = 'Alice'"
        );
    }

    #[test]
    fn test_select_without_where_scans_table() {
        assert_eq!(select("Person", ""), "SELECT * FROM [dbo].[Person] ");
    }
}
