//! Statement and clause generators.
//!
//! Each generator renders one complete statement shape as text; values are
//! encoded inline via [`crate::value::SqlValue::to_sql_literal`]. The
//! exact text — bracket-quoted identifiers, spacing, branch layout of the
//! MERGE — is a wire contract with deployments that inspect raw SQL, so
//! the shapes here are not free to drift.

mod delete;
mod insert;
mod keys;
mod merge;
mod select;
mod where_clause;

pub use delete::{delete_by_filter, delete_by_keys, soft_delete_by_filter, soft_delete_by_keys};
pub use insert::{columns_and_values, insert};
pub use keys::key_list;
pub use merge::merge;
pub use select::select;
pub use where_clause::where_clause;
