//! Conjunctive WHERE clause construction from filter predicates.

use chrono::NaiveDateTime;

use crate::value::{SqlValue, DATETIME_FORMAT};

/// Builds a WHERE clause from filter predicates.
///
/// Predicates are visited in classifier order; entries whose value is
/// `Null` (unset filter fields) are skipped. Surviving predicates render
/// as `<column> = <literal>` and are joined with ` AND `. Returns the
/// empty string when nothing survives, so the caller can omit the clause
/// entirely.
///
/// Filter-specific rendering rules differ from plain literal encoding in
/// two places: booleans always compare against `1`/`0` (never `IS NULL`),
/// and dates go through [`date_filter_text`].
#[must_use]
pub fn where_clause(predicates: &[(&'static str, SqlValue)]) -> String {
    let mut parts: Vec<String> = Vec::new();

    for (column, value) in predicates {
        let segment = match value {
            SqlValue::Null => continue,
            SqlValue::DateTime(dt) => {
                format!("{column} = '{}'", date_filter_text(Some(dt)))
            }
            SqlValue::Bool(b) => format!("{column} = {}", u8::from(*b)),
            SqlValue::Int(_) | SqlValue::Float(_) | SqlValue::Decimal(_) => {
                format!("{column} = {}", value.to_sql_literal())
            }
            SqlValue::Text(s) => format!("{column} = '{s}'"),
        };

        parts.push(segment);
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", parts.join(" AND "))
    }
}

/// Renders the text inside a date predicate's quotes.
///
/// An absent underlying date degenerates to `0`, i.e. the predicate reads
/// `Column = '0'`. That fallback is carried over verbatim from the system
/// this crate is compatible with; confirm with stakeholders before
/// changing it.
#[must_use]
pub fn date_filter_text(value: Option<&NaiveDateTime>) -> String {
    match value {
        Some(dt) => dt.format(DATETIME_FORMAT).to_string(),
        None => String::from("0"),
    }
}
