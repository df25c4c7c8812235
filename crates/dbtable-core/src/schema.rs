//! Schema traits connecting model types to the statement generators.
//!
//! These traits are the "field classification" contract: each model type
//! declares, once, its ordered mapped columns and (for row models) which
//! column is the primary key. They are normally implemented via
//! `#[derive(Table)]` and `#[derive(Filter)]` from `dbtable-derive`.

use crate::row::Row;
use crate::value::{SqlValue, ValueError};

/// A row model: a plain struct whose mapped fields correspond 1:1 to the
/// columns of one table.
///
/// Column order is declaration order and must be stable — generated
/// column lists and value lists depend on it. A type exposes zero or one
/// primary-key column; key-dependent operations fail fast when there is
/// none.
pub trait TableModel: Sized {
    /// The SQL table name.
    const TABLE: &'static str;

    /// Ordered list of mapped column names.
    const COLUMNS: &'static [&'static str];

    /// The primary key column name, if any.
    const PRIMARY_KEY: Option<&'static str>;

    /// Returns the values of the mapped fields, in [`Self::COLUMNS`] order.
    fn values(&self) -> Vec<SqlValue>;

    /// Returns the primary key value, or `None` when the type has no
    /// primary key column. An unset key on a keyed type is
    /// `Some(SqlValue::Null)`.
    fn primary_key_value(&self) -> Option<SqlValue>;

    /// Writes a backend-assigned identity back onto the primary key field,
    /// coercing it to the field's type. A no-op for types without a
    /// primary key column.
    fn assign_primary_key(&mut self, value: &SqlValue) -> Result<(), ValueError>;

    /// Materializes an instance from a result row, reading each mapped
    /// column by name. A mapped column missing from the row is an error;
    /// unmapped result columns are ignored.
    fn from_row(row: &Row) -> Result<Self, ValueError>;
}

/// A query filter model: a plain struct whose non-null fields become
/// equality predicates in a WHERE clause.
///
/// Every mapped field must be an `Option` so that "unset" is
/// distinguishable from a real zero/false/empty value. A filter with all
/// fields unset yields an unconditioned statement; callers own that risk.
pub trait FilterModel {
    /// Ordered list of mapped column names.
    const COLUMNS: &'static [&'static str];

    /// Returns `(column, value)` pairs for every mapped field, in
    /// [`Self::COLUMNS`] order. Unset fields carry `SqlValue::Null` and
    /// are skipped by the WHERE builder.
    fn predicates(&self) -> Vec<(&'static str, SqlValue)>;
}
