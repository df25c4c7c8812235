//! # dbtable-core
//!
//! Value model and T-SQL text generation for the `dbtable` accessor.
//!
//! This crate provides:
//! - [`SqlValue`] — the closed set of value kinds a column can carry
//! - [`ToSqlValue`] / [`FromSqlValue`] — conversions between Rust scalars
//!   and [`SqlValue`]
//! - [`Row`] — a result row keyed by column name
//! - [`TableModel`] / [`FilterModel`] — the schema contracts implemented by
//!   the derive macros in `dbtable-derive`
//! - [`builder`] — the statement and clause generators
//!
//! Statements are rendered as complete SQL text with values encoded inline;
//! there are no parameter placeholders. Text literals are **not** escaped
//! (see [`SqlValue::to_sql_literal`]) — this is preserved behavior from the
//! system this crate is compatible with, not a recommendation.

pub mod builder;
pub mod row;
pub mod schema;
pub mod value;

pub use row::Row;
pub use schema::{FilterModel, TableModel};
pub use value::{FromSqlValue, SqlValue, ToSqlValue, ValueError};
