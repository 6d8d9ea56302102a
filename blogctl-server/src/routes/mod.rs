//! Route handlers for blogctl-server
//!
//! Organized by concern:
//! - entries: list/view/edit/update/add/delete
//! - login: credential check and logout
//! - health: liveness probe

pub mod entries;
pub mod health;
pub mod login;

use axum::Router;

use crate::state::AppState;

/// All routes, state still unbound
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(entries::router())
        .merge(login::router())
        .merge(health::router())
}
