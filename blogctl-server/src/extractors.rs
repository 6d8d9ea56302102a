//! Custom Axum extractors

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sqlx::pool::PoolConnection;
use sqlx::Sqlite;

use blogctl_core::{BlogError, EntryStore};

use crate::error::ApiError;
use crate::state::AppState;

/// One pooled connection for the duration of a request. It goes back to
/// the pool when the handler drops it, whatever path the handler exits by.
pub struct DbConn(pub PoolConnection<Sqlite>);

impl FromRequestParts<AppState> for DbConn {
    type Rejection = ApiError;

    async fn from_request_parts(_parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let conn = state.pool().acquire().await.map_err(BlogError::from)?;
        Ok(Self(conn))
    }
}

impl DbConn {
    pub fn store(&mut self) -> EntryStore<'_> {
        EntryStore::new(&mut self.0)
    }
}
