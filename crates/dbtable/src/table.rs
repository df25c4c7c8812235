//! The generic table accessor.

use std::marker::PhantomData;

use dbtable_core::builder;
use dbtable_core::{FilterModel, SqlValue, TableModel};

use crate::connection::DbConnection;
use crate::error::{DbError, Result};

/// A table accessor bound to one row model / filter model pair.
///
/// The table name, mapped column lists and primary key column are
/// resolved once at construction; instances hold no per-call state and
/// are safe to share read-only across threads, each call borrowing its
/// own connection handle.
///
/// # Example
///
/// ```ignore
/// use dbtable::{DbTable, Table, Filter};
///
/// #[derive(Table, Default, Clone)]
/// #[table(name = "Person")]
/// struct Person {
///     #[column(primary_key, name = "Id")]
///     id: Option<i64>,
///     #[column(name = "Name")]
///     name: String,
/// }
///
/// #[derive(Filter, Default)]
/// struct PersonFilter {
///     #[column(name = "Name")]
///     name: Option<String>,
/// }
///
/// let people = DbTable::<Person, PersonFilter>::new();
/// let found = people.search(&mut conn, &PersonFilter {
///     name: Some("Alice".into()),
/// })?;
/// ```
#[derive(Debug)]
pub struct DbTable<T: TableModel, F: FilterModel> {
    table: &'static str,
    columns: &'static [&'static str],
    filter_columns: &'static [&'static str],
    primary_key: Option<&'static str>,
    _marker: PhantomData<fn() -> (T, F)>,
}

impl<T: TableModel, F: FilterModel> Clone for DbTable<T, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: TableModel, F: FilterModel> Copy for DbTable<T, F> {}

impl<T: TableModel, F: FilterModel> Default for DbTable<T, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TableModel, F: FilterModel> DbTable<T, F> {
    /// Creates an accessor for the row/filter model pair.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: T::TABLE,
            columns: T::COLUMNS,
            filter_columns: F::COLUMNS,
            primary_key: T::PRIMARY_KEY,
            _marker: PhantomData,
        }
    }

    /// Returns the table name the accessor is bound to.
    #[must_use]
    pub const fn table_name(&self) -> &'static str {
        self.table
    }

    /// Returns the row model's mapped column names.
    #[must_use]
    pub const fn columns(&self) -> &'static [&'static str] {
        self.columns
    }

    /// Returns the filter model's mapped column names.
    #[must_use]
    pub const fn filter_columns(&self) -> &'static [&'static str] {
        self.filter_columns
    }

    /// Searches for all rows matching the filter's non-null fields.
    ///
    /// A filter with every field unset selects the whole table.
    pub fn search<C: DbConnection>(&self, conn: &mut C, filter: &F) -> Result<Vec<T>> {
        let where_text = builder::where_clause(&filter.predicates());
        let sql = builder::select(self.table, &where_text);
        tracing::debug!(table = self.table, sql = %sql, "search");

        let rows = conn.query(&sql)?;
        rows.iter()
            .map(|row| T::from_row(row).map_err(DbError::from))
            .collect()
    }

    /// Inserts or updates one row via a merge on the primary key.
    ///
    /// `auto_increment_key` declares that the backend generates key
    /// values, excluding the key column from the insert branch. When the
    /// backend returns a non-null identity it is coerced to the key
    /// field's type and assigned back onto `row` — the one observable
    /// side effect on caller-owned data.
    ///
    /// # Errors
    ///
    /// [`DbError::MissingPrimaryKey`] when the row model declares no
    /// primary key column: the merge join condition cannot be formed.
    pub fn save<C: DbConnection>(
        &self,
        conn: &mut C,
        row: &mut T,
        auto_increment_key: bool,
    ) -> Result<()> {
        let primary_key = self
            .primary_key
            .ok_or(DbError::MissingPrimaryKey(self.table))?;

        let sql = builder::merge(
            self.table,
            self.columns,
            primary_key,
            &row.values(),
            auto_increment_key,
        );
        tracing::debug!(table = self.table, sql = %sql, "save");

        let identity = conn.query_scalar(&sql)?;
        if let Some(value) = identity {
            if !value.is_null() {
                row.assign_primary_key(&value)?;
            }
        }

        Ok(())
    }

    /// Soft deletes a single row by primary key.
    pub fn soft_delete<C: DbConnection>(&self, conn: &mut C, row: &T) -> Result<u64> {
        self.soft_delete_many(conn, std::slice::from_ref(row))
    }

    /// Soft deletes a batch of rows by primary key.
    ///
    /// An empty batch, or a batch where no instance carries a key value,
    /// issues no statement and reports zero affected rows.
    pub fn soft_delete_many<C: DbConnection>(&self, conn: &mut C, rows: &[T]) -> Result<u64> {
        let Some((primary_key, keys)) = self.batch_keys(rows)? else {
            return Ok(0);
        };

        let sql = builder::soft_delete_by_keys(self.table, primary_key, &keys);
        tracing::debug!(table = self.table, sql = %sql, "soft delete");
        Ok(conn.execute(&sql)?)
    }

    /// Soft deletes all rows matching the filter's non-null fields.
    ///
    /// An empty filter flags **every** row in the table; that is
    /// deliberate pass-through, not validated here.
    pub fn soft_delete_where<C: DbConnection>(&self, conn: &mut C, filter: &F) -> Result<u64> {
        let where_text = builder::where_clause(&filter.predicates());
        let sql = builder::soft_delete_by_filter(self.table, &where_text);
        tracing::debug!(table = self.table, sql = %sql, "soft delete by filter");
        Ok(conn.execute(&sql)?)
    }

    /// Hard deletes a single row by primary key.
    pub fn delete<C: DbConnection>(&self, conn: &mut C, row: &T) -> Result<u64> {
        self.delete_many(conn, std::slice::from_ref(row))
    }

    /// Hard deletes a batch of rows by primary key. Same degenerate
    /// no-op rules as [`Self::soft_delete_many`].
    pub fn delete_many<C: DbConnection>(&self, conn: &mut C, rows: &[T]) -> Result<u64> {
        let Some((primary_key, keys)) = self.batch_keys(rows)? else {
            return Ok(0);
        };

        let sql = builder::delete_by_keys(self.table, primary_key, &keys);
        tracing::debug!(table = self.table, sql = %sql, "delete");
        Ok(conn.execute(&sql)?)
    }

    /// Hard deletes all rows matching the filter's non-null fields. An
    /// empty filter empties the table.
    pub fn delete_where<C: DbConnection>(&self, conn: &mut C, filter: &F) -> Result<u64> {
        let where_text = builder::where_clause(&filter.predicates());
        let sql = builder::delete_by_filter(self.table, &where_text);
        tracing::debug!(table = self.table, sql = %sql, "delete by filter");
        Ok(conn.execute(&sql)?)
    }

    /// Collects the batch's key values into an IN-list.
    ///
    /// `Ok(None)` means nothing to do (empty batch or no usable keys).
    /// A model without a primary key column is a configuration error for
    /// every keyed operation.
    fn batch_keys(&self, rows: &[T]) -> Result<Option<(&'static str, String)>> {
        if rows.is_empty() {
            return Ok(None);
        }

        let primary_key = self
            .primary_key
            .ok_or(DbError::MissingPrimaryKey(self.table))?;

        let keys: Vec<SqlValue> = rows
            .iter()
            .map(TableModel::primary_key_value)
            .map(|key| key.unwrap_or(SqlValue::Null))
            .collect();

        Ok(builder::key_list(&keys).map(|list| (primary_key, list)))
    }
}
