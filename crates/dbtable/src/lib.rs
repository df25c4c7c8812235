//! # dbtable
//!
//! A minimal object-relational mapping layer: a row model type and a
//! query filter type are turned into T-SQL text and executed against a
//! caller-supplied backend connection handle.
//!
//! There is no query planner, no prepared statements, no SQL caching,
//! no pooling and no migrations — one model pair, one table, one
//! statement per operation.
//!
//! ## Quick Start
//!
//! ```ignore
//! use dbtable::{DbTable, Filter, Table};
//!
//! #[derive(Table, Default, Clone)]
//! #[table(name = "Person")]
//! struct Person {
//!     #[column(primary_key, name = "Id")]
//!     id: Option<i64>,
//!     #[column(name = "Name")]
//!     name: String,
//!     #[column(name = "Age")]
//!     age: i64,
//! }
//!
//! #[derive(Filter, Default)]
//! struct PersonFilter {
//!     #[column(name = "Name")]
//!     name: Option<String>,
//!     #[column(name = "Age")]
//!     age: Option<i64>,
//! }
//!
//! fn example(conn: &mut impl dbtable::DbConnection) -> dbtable::Result<()> {
//!     let people = DbTable::<Person, PersonFilter>::new();
//!
//!     // SELECT * FROM [dbo].[Person] WHERE Name = 'Alice'
//!     let found = people.search(conn, &PersonFilter {
//!         name: Some("Alice".into()),
//!         ..Default::default()
//!     })?;
//!
//!     // MERGE upsert; a returned identity lands back on `person.id`.
//!     let mut person = Person { id: None, name: "Bob".into(), age: 41 };
//!     people.save(conn, &mut person, true)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Caveats carried over by design
//!
//! Values are encoded inline into statement text with no escaping of
//! embedded quotes in text literals, and an empty filter produces an
//! unconditioned statement. Both behaviors are compatibility contracts
//! with the system this crate replaces; do not feed untrusted input to
//! text-typed fields.

mod connection;
mod error;
mod session;
mod table;

pub use connection::{BackendError, DbConnection};
pub use error::{DbError, Result};
pub use session::with_commit;
pub use table::DbTable;

pub use dbtable_derive::{Filter, Table};

// Re-export commonly used types from dbtable-core.
pub use dbtable_core::{FilterModel, FromSqlValue, Row, SqlValue, TableModel, ToSqlValue, ValueError};
