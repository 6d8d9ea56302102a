//! blogctl-core: the entry store behind blogctl
//!
//! Owns the single `entries` table and everything needed to reach it:
//! pool/schema setup, the `EntryStore` CRUD contract and configuration.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod store;

pub use config::BlogConfig;
pub use db::{create_pool, init_schema, reset_schema};
pub use error::{BlogError, Result};
pub use models::{Entry, EntryId};
pub use store::{EntryStore, DEFAULT_LIST_LIMIT};
