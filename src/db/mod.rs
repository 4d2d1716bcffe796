//! Database module: records, schema and data access for persistent storage.
//!
//! Layout:
//! - `models.rs`: `Item` / `Store` rows and their request bodies
//! - `record.rs`: the `Record` trait describing how a type maps onto its table
//! - `repository.rs`: generic single-table CRUD over any `Record`
//! - `schema.rs`: SQL DDL for initializing the database
//! - `sqlite.rs`: connection setup and repository construction

pub mod models;
pub mod record;
pub mod repository;
pub mod schema;
pub mod sqlite;

pub use models::{Item, ItemFields, Store, StoreFields};
pub use record::Record;
pub use repository::Repository;
pub use schema::SQLITE_INIT;
pub use sqlite::{Database, SqlitePool};
