use std::marker::PhantomData;
use std::sync::Arc;

use sqlx::sqlite::SqliteRow;
use tracing::debug;

use crate::db::record::Record;
use crate::db::sqlite::SqlitePool;
use crate::error::ApiError;

/// Statements rendered once per record type.
struct Statements {
    select_one: String,
    select_all: String,
    insert: String,
    update: String,
    delete: String,
}

impl Statements {
    fn for_record<R: Record>() -> Self {
        let table = R::TABLE;
        let returning = std::iter::once("Id")
            .chain(R::COLUMNS.iter().copied())
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = vec!["?"; R::COLUMNS.len()].join(", ");
        let assignments = R::COLUMNS
            .iter()
            .map(|c| format!("{c} = ?"))
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            select_one: format!("SELECT {returning} FROM {table} WHERE Id = ?"),
            select_all: format!("SELECT {returning} FROM {table} ORDER BY Id"),
            insert: format!(
                "INSERT INTO {table} ({}) VALUES ({placeholders}) RETURNING {returning}",
                R::COLUMNS.join(", ")
            ),
            update: format!("UPDATE {table} SET {assignments} WHERE Id = ? RETURNING {returning}"),
            delete: format!("DELETE FROM {table} WHERE Id = ? RETURNING {returning}"),
        }
    }
}

/// Single-table data access for one record type.
///
/// Every method runs exactly one statement against the pool, so each call is
/// atomic on its own and nothing spans requests.
pub struct Repository<R> {
    pool: SqlitePool,
    sql: Arc<Statements>,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for Repository<R> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            sql: self.sql.clone(),
            _record: PhantomData,
        }
    }
}

impl<R: Record> Repository<R> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            sql: Arc::new(Statements::for_record::<R>()),
            _record: PhantomData,
        }
    }

    pub async fn find(&self, id: i64) -> Result<Option<R>, ApiError> {
        let row = sqlx::query(&self.sql.select_one)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        map_optional(row)
    }

    /// All rows in id order, which is insertion order.
    pub async fn list(&self) -> Result<Vec<R>, ApiError> {
        let rows = sqlx::query(&self.sql.select_all)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .iter()
            .map(R::from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }

    /// Insert a new row; the id is assigned by SQLite.
    pub async fn insert(&self, fields: R::Fields) -> Result<R, ApiError> {
        let query = R::bind_fields(fields, sqlx::query(&self.sql.insert));
        let row = query.fetch_one(&self.pool).await?;
        let record = R::from_row(&row)?;
        debug!(table = R::TABLE, id = record.id(), "row inserted");
        Ok(record)
    }

    /// Overwrite every non-id column. `None` when no row has this id.
    pub async fn update(&self, id: i64, fields: R::Fields) -> Result<Option<R>, ApiError> {
        let query = R::bind_fields(fields, sqlx::query(&self.sql.update)).bind(id);
        let row = query.fetch_optional(&self.pool).await?;
        if row.is_some() {
            debug!(table = R::TABLE, id, "row updated");
        }
        map_optional(row)
    }

    /// Remove the row and hand back what it held. `None` when no row has this id.
    pub async fn delete(&self, id: i64) -> Result<Option<R>, ApiError> {
        let row = sqlx::query(&self.sql.delete)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        if row.is_some() {
            debug!(table = R::TABLE, id, "row deleted");
        }
        map_optional(row)
    }
}

fn map_optional<R: Record>(row: Option<SqliteRow>) -> Result<Option<R>, ApiError> {
    Ok(row.as_ref().map(R::from_row).transpose()?)
}
