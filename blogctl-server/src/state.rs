//! Application state shared across handlers

use std::sync::Arc;

use sqlx::SqlitePool;

use blogctl_core::BlogConfig;

use crate::auth::Credentials;
use crate::error::ServerError;
use crate::session::SessionKey;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: SqlitePool,
    credentials: Credentials,
    sessions: SessionKey,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: &BlogConfig) -> Result<Self, ServerError> {
        let sessions = SessionKey::new(&config.secret_key)?;
        let credentials = Credentials::new(&config.username, &config.password);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                pool,
                credentials,
                sessions,
            }),
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    pub fn credentials(&self) -> &Credentials {
        &self.inner.credentials
    }

    pub fn sessions(&self) -> &SessionKey {
        &self.inner.sessions
    }
}
