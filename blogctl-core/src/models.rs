//! Entry record as stored in the `entries` table

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Store-assigned entry identifier (SQLite rowid)
pub type EntryId = i64;

/// A single blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Entry {
    pub id: EntryId,
    pub title: String,
    pub text: String,
}
