//! Result rows keyed by column name.

use crate::value::SqlValue;

/// A single result row: column names paired with their values, in the
/// order the backend returned them.
///
/// Materialization reads columns by name, so extra columns in the result
/// set are simply ignored by a model that does not map them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, SqlValue)>,
}

impl Row {
    /// Creates an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column to the row.
    pub fn push(&mut self, name: impl Into<String>, value: SqlValue) {
        self.columns.push((name.into(), value));
    }

    /// Returns the value of the named column, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value)
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterates over `(name, value)` pairs in result order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.columns
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }
}

impl FromIterator<(String, SqlValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, SqlValue)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_by_name() {
        let mut row = Row::new();
        row.push("Id", SqlValue::Int(1));
        row.push("Name", SqlValue::Text(String::from("Alice")));

        assert_eq!(row.get("Id"), Some(&SqlValue::Int(1)));
        assert_eq!(row.get("Name"), Some(&SqlValue::Text(String::from("Alice"))));
        assert_eq!(row.get("Missing"), None);
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_from_iterator() {
        let row: Row = vec![(String::from("Age"), SqlValue::Int(30))]
            .into_iter()
            .collect();
        assert_eq!(row.get("Age"), Some(&SqlValue::Int(30)));
    }
}
