use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use tracing::info;

use crate::db::models::{Item, Store};
use crate::db::repository::Repository;
use crate::db::schema::SQLITE_INIT;
use crate::error::ApiError;

pub type SqlitePool = Pool<Sqlite>;

/// Concurrent writers wait this long for the file lock before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle on the storage file. Cheap to clone; clones share the pool.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the SQLite file behind `database_url` and ensure the schema.
    pub async fn connect(database_url: &str) -> Result<Self, ApiError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .busy_timeout(BUSY_TIMEOUT);
        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
        let db = Self::new(pool);
        db.init_schema().await?;
        info!(database_url, "storage ready");
        Ok(db)
    }

    /// Private in-memory database on a single pooled connection.
    pub async fn connect_memory() -> Result<Self, ApiError> {
        let connect_opts = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(connect_opts)
            .await?;
        let db = Self::new(pool);
        db.init_schema().await?;
        Ok(db)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), ApiError> {
        // sqlx::query runs a single statement, so split the script
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub fn items(&self) -> Repository<Item> {
        Repository::new(self.pool.clone())
    }

    pub fn stores(&self) -> Repository<Store> {
        Repository::new(self.pool.clone())
    }
}
