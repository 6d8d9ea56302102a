//! blogctl-server: HTTP front end for the entry store
//!
//! Six entry routes plus login/logout over axum. Every request borrows one
//! pooled SQLite connection; the session travels in a signed cookie.

pub mod auth;
pub mod error;
pub mod extractors;
pub mod render;
pub mod routes;
pub mod session;
pub mod state;

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use blogctl_core::{create_pool, init_schema, BlogConfig};

pub use error::{ApiError, ServerError};
pub use state::AppState;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:5000)
    pub bind_addr: SocketAddr,

    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Build the application router with all routes
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout));

    routes::router().layer(middleware).with_state(state)
}

/// Open the database, ensure the schema and serve until Ctrl+C/SIGTERM.
pub async fn serve(config: ServerConfig, blog: &BlogConfig) -> Result<(), ServerError> {
    tracing::info!(database = %blog.database.display(), "Opening database");
    let pool = create_pool(&blog.database).await?;
    init_schema(&pool).await?;

    if blog.uses_default_secrets() {
        tracing::warn!("Default password or secret key in use; set BLOGCTL_PASSWORD and BLOGCTL_SECRET_KEY");
    }

    let state = AppState::new(pool.clone(), blog)?;
    let app = build_router(state, config.request_timeout);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}
