//! IN-list construction for batch key deletes.

use crate::value::SqlValue;

/// Renders primary-key values as a comma-separated IN-list.
///
/// `Null` keys are dropped. Numeric kinds render unquoted; everything
/// else is single-quoted (booleans as `'1'`/`'0'`, dates in the wire
/// format). Returns `None` when no usable key survives — the caller then
/// performs no statement at all and reports zero affected rows.
#[must_use]
pub fn key_list(values: &[SqlValue]) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();

    for value in values {
        let segment = match value {
            SqlValue::Null => continue,
            SqlValue::Int(_) | SqlValue::Float(_) | SqlValue::Decimal(_) => value.to_sql_literal(),
            SqlValue::Bool(b) => format!("'{}'", u8::from(*b)),
            SqlValue::DateTime(_) | SqlValue::Text(_) => value.to_sql_literal(),
        };

        parts.push(segment);
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(key_list(&[]), None);
    }

    #[test]
    fn test_all_null_keys() {
        assert_eq!(key_list(&[SqlValue::Null, SqlValue::Null]), None);
    }

    #[test]
    fn test_numeric_keys_unquoted() {
        let keys = [SqlValue::Int(1), SqlValue::Int(2), SqlValue::Int(3)];
        assert_eq!(key_list(&keys).unwrap(), "1, 2, 3");
    }

    #[test]
    fn test_text_keys_quoted() {
        let keys = [
            SqlValue::Text(String::from("a1")),
            SqlValue::Text(String::from("b2")),
        ];
        assert_eq!(key_list(&keys).unwrap(), "'a1', 'b2'");
    }

    #[test]
    fn test_null_keys_dropped() {
        let keys = [SqlValue::Int(1), SqlValue::Null, SqlValue::Int(3)];
        assert_eq!(key_list(&keys).unwrap(), "1, 3");
    }

    #[test]
    fn test_bool_keys_quoted_as_bits() {
        let keys = [SqlValue::Bool(true), SqlValue::Bool(false)];
        assert_eq!(key_list(&keys).unwrap(), "'1', '0'");
    }
}
