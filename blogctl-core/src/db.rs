//! Connection pool and schema setup
//!
//! SQLite via sqlx. The pool hands out one connection per request; the
//! schema is a single table created idempotently on startup.

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Executor, Sqlite};

use crate::error::Result;

/// Default maximum connections for the pool.
/// Kept low for single-user tooling.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// `AUTOINCREMENT` keeps ids of deleted rows from being handed out again.
const CREATE_ENTRIES: &str = r#"
CREATE TABLE IF NOT EXISTS entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    text TEXT NOT NULL
)
"#;

const DROP_ENTRIES: &str = "DROP TABLE IF EXISTS entries";

/// Open (creating if needed) the SQLite database at `path`.
pub async fn create_pool(path: &Path) -> Result<SqlitePool> {
    create_pool_with_options(path, DEFAULT_MAX_CONNECTIONS).await
}

/// Open the database with an explicit connection limit.
pub async fn create_pool_with_options(path: &Path, max_connections: u32) -> Result<SqlitePool> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    tracing::debug!(path = %path.display(), max_connections, "SQLite pool opened");
    Ok(pool)
}

/// Create the `entries` table if it does not exist yet.
pub async fn init_schema<'e, E>(executor: E) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(CREATE_ENTRIES).execute(executor).await?;
    Ok(())
}

/// Drop and recreate the `entries` table, discarding every entry.
pub async fn reset_schema(pool: &SqlitePool) -> Result<()> {
    tracing::warn!("Dropping entries table");

    let mut tx = pool.begin().await?;
    sqlx::query(DROP_ENTRIES).execute(&mut *tx).await?;
    sqlx::query(CREATE_ENTRIES).execute(&mut *tx).await?;
    tx.commit().await?;

    Ok(())
}
