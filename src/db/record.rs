use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::Sqlite;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};

pub type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// A row type stored in its own table behind an `Id INTEGER PRIMARY KEY`.
///
/// Implementations spell out the mapping by hand: which columns exist, how a
/// row becomes `Self`, and how the writable fields are bound to a statement.
pub trait Record: Serialize + Send + Sync + Sized + 'static {
    /// Writable part of the record, as accepted in request bodies.
    type Fields: DeserializeOwned + Send + 'static;

    const TABLE: &'static str;
    /// Non-id columns, in the order `bind_fields` binds them.
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> i64;

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error>;

    fn bind_fields<'q>(fields: Self::Fields, query: SqliteQuery<'q>) -> SqliteQuery<'q>;
}
