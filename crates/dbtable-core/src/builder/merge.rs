//! MERGE (upsert) statement generation.

use crate::value::SqlValue;

/// Builds the MERGE statement used by `Save`.
///
/// A one-row `USING (SELECT ...)` projection carries the model's encoded
/// values, joined to the target on the primary key column. Matched rows
/// update every non-key column; unmatched rows insert all columns, minus
/// the key when `auto_increment_key` says the backend generates key
/// values itself. The trailing `SELECT SCOPE_IDENTITY()` hands any newly
/// assigned identity back as a scalar.
///
/// Column names are bracket-quoted in the projection and the ON clause
/// but bare in the UPDATE/INSERT branches; both are part of the wire
/// contract.
#[must_use]
pub fn merge(
    table: &str,
    columns: &[&str],
    primary_key: &str,
    values: &[SqlValue],
    auto_increment_key: bool,
) -> String {
    debug_assert_eq!(columns.len(), values.len());

    let using: Vec<String> = columns
        .iter()
        .zip(values)
        .map(|(column, value)| format!("{} as [{column}]", value.to_sql_literal()))
        .collect();

    let mut matched: Vec<String> = Vec::new();
    let mut insert_columns: Vec<String> = Vec::new();
    let mut insert_values: Vec<String> = Vec::new();

    for column in columns {
        let is_primary_key = *column == primary_key;

        if !is_primary_key {
            matched.push(format!("target.{column} = source.{column}"));
        }

        if !(is_primary_key && auto_increment_key) {
            insert_columns.push(String::from(*column));
            insert_values.push(format!("source.{column}"));
        }
    }

    format!(
        "MERGE INTO [dbo].[{table}] AS target USING (SELECT {using}) as source \
         ON target.[{primary_key}] = source.[{primary_key}] \
         WHEN MATCHED THEN UPDATE SET {matched} \
         WHEN NOT MATCHED THEN INSERT ({insert_columns}) VALUES ({insert_values}); \
         SELECT SCOPE_IDENTITY();",
        using = using.join(", "),
        matched = matched.join(", "),
        insert_columns = insert_columns.join(", "),
        insert_values = insert_values.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person_values() -> Vec<SqlValue> {
        vec![
            SqlValue::Null,
            SqlValue::Text(String::from("Alice")),
            SqlValue::Int(30),
        ]
    }

    #[test]
    fn test_merge_auto_increment_omits_key_from_insert() {
        let sql = merge("Person", &["Id", "Name", "Age"], "Id", &person_values(), true);

        assert_eq!(
            sql,
            "MERGE INTO [dbo].[Person] AS target \
             USING (SELECT NULL as [Id], 'Alice' as [Name], 30 as [Age]) as source \
             ON target.[Id] = source.[Id] \
             WHEN MATCHED THEN UPDATE SET target.Name = source.Name, target.Age = source.Age \
             WHEN NOT MATCHED THEN INSERT (Name, Age) VALUES (source.Name, source.Age); \
             SELECT SCOPE_IDENTITY();"
        );
    }

    #[test]
    fn test_merge_without_auto_increment_inserts_key() {
        let sql = merge("Person", &["Id", "Name", "Age"], "Id", &person_values(), false);

        assert!(sql.contains("WHEN NOT MATCHED THEN INSERT (Id, Name, Age) VALUES (source.Id, source.Name, source.Age);"));
        // The key column never appears in the matched update branch.
        assert!(sql.contains("WHEN MATCHED THEN UPDATE SET target.Name = source.Name, target.Age = source.Age "));
        assert!(!sql.contains("target.Id = source.Id"));
    }

    #[test]
    fn test_merge_requests_identity() {
        let sql = merge("Person", &["Id", "Name", "Age"], "Id", &person_values(), true);
        assert!(sql.ends_with("; SELECT SCOPE_IDENTITY();"));
    }
}
