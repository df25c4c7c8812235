//! INSERT statement generation.

use crate::value::SqlValue;

/// Renders the column list and value list for an INSERT, in matching
/// order: `[Name], [Age]` and `'Alice', 30`.
///
/// Both lists always have the same number of entries; `values` must line
/// up with `columns` positionally.
#[must_use]
pub fn columns_and_values(columns: &[&str], values: &[SqlValue]) -> (String, String) {
    debug_assert_eq!(columns.len(), values.len());

    let column_list = columns
        .iter()
        .map(|column| format!("[{column}]"))
        .collect::<Vec<_>>()
        .join(", ");

    let value_list = values
        .iter()
        .map(SqlValue::to_sql_literal)
        .collect::<Vec<_>>()
        .join(", ");

    (column_list, value_list)
}

/// Builds a plain INSERT statement for one row.
#[must_use]
pub fn insert(table: &str, columns: &[&str], values: &[SqlValue]) -> String {
    let (column_list, value_list) = columns_and_values(columns, values);
    format!("INSERT INTO [dbo].[{table}] ({column_list}) VALUES ({value_list})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_and_values_aligned() {
        let columns = ["Name", "Age", "Active"];
        let values = [
            SqlValue::Text(String::from("Alice")),
            SqlValue::Int(30),
            SqlValue::Bool(true),
        ];

        let (cols, vals) = columns_and_values(&columns, &values);
        assert_eq!(cols, "[Name], [Age], [Active]");
        assert_eq!(vals, "'Alice', 30, 1");
        assert_eq!(cols.matches(", ").count(), vals.matches(", ").count());
    }

    #[test]
    fn test_null_value_in_list() {
        let (cols, vals) =
            columns_and_values(&["Name", "Notes"], &[SqlValue::Text(String::from("Bob")), SqlValue::Null]);
        assert_eq!(cols, "[Name], [Notes]");
        assert_eq!(vals, "'Bob', NULL");
    }

    #[test]
    fn test_insert_statement() {
        let sql = insert(
            "Person",
            &["Name", "Age"],
            &[SqlValue::Text(String::from("Alice")), SqlValue::Int(30)],
        );
        assert_eq!(
            sql,
            "INSERT INTO [dbo].[Person] ([Name], [Age]) VALUES ('Alice', 30)"
        );
    }
}
