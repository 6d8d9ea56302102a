//! Entry repository
//!
//! `EntryStore` borrows one connection for the lifetime of a request. Every
//! mutation is a single autocommit statement, so it is durable as soon as
//! the call returns and either fully applies or not at all.

use sqlx::SqliteConnection;

use crate::error::{BlogError, Result};
use crate::models::{Entry, EntryId};

/// Number of entries shown on the front page.
pub const DEFAULT_LIST_LIMIT: u32 = 3;

/// CRUD over the `entries` table
pub struct EntryStore<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> EntryStore<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Most recent entries first, at most `limit` of them.
    pub async fn list_recent(&mut self, limit: u32) -> Result<Vec<Entry>> {
        let entries = sqlx::query_as::<_, Entry>(
            "SELECT id, title, text FROM entries ORDER BY id DESC LIMIT ?",
        )
        .bind(i64::from(limit))
        .fetch_all(&mut *self.conn)
        .await?;

        tracing::debug!(limit, count = entries.len(), "listed entries");
        Ok(entries)
    }

    /// Fetch a single entry, `NotFound` if the id was never assigned or
    /// has been deleted.
    pub async fn get(&mut self, id: EntryId) -> Result<Entry> {
        sqlx::query_as::<_, Entry>("SELECT id, title, text FROM entries WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?
            .ok_or_else(|| BlogError::not_found(id))
    }

    /// Insert a new entry; the store picks the id.
    pub async fn create(&mut self, title: &str, text: &str) -> Result<Entry> {
        let entry = sqlx::query_as::<_, Entry>(
            "INSERT INTO entries (title, text) VALUES (?, ?) RETURNING id, title, text",
        )
        .bind(title)
        .bind(text)
        .fetch_one(&mut *self.conn)
        .await?;

        tracing::debug!(id = entry.id, "created entry");
        Ok(entry)
    }

    /// Overwrite title and text. An unknown id is not an error: nothing is
    /// written and the returned entry just echoes the arguments.
    pub async fn update(&mut self, id: EntryId, title: &str, text: &str) -> Result<Entry> {
        let result = sqlx::query("UPDATE entries SET title = ?, text = ? WHERE id = ?")
            .bind(title)
            .bind(text)
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(id, "update matched no entry");
        } else {
            tracing::debug!(id, "updated entry");
        }

        Ok(Entry {
            id,
            title: title.to_owned(),
            text: text.to_owned(),
        })
    }

    /// Remove an entry. Deleting a missing id succeeds silently.
    pub async fn delete(&mut self, id: EntryId) -> Result<()> {
        let result = sqlx::query("DELETE FROM entries WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        tracing::debug!(id, rows = result.rows_affected(), "deleted entry");
        Ok(())
    }
}
