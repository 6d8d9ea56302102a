//! Error types for blogctl-server
//!
//! `ApiError` covers request failures and renders an HTML error page with
//! the matching status. `ServerError` covers startup and shutdown.

use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use blogctl_core::{BlogError, EntryId};

use crate::render;

/// Request error with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Entry does not exist (404)
    NotFound { id: EntryId },

    /// Write attempted without a logged-in session (401)
    Unauthorized,

    /// Storage failure (500, logged)
    Database(BlogError),

    /// Anything else that should not happen (500, logged)
    Internal { message: String },

    /// Malformed form body, keeping axum's status (400/415/422)
    Form(FormRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Database(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Form(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::NotFound { id } => format!("Entry {} not found", id),
            Self::Unauthorized => "You need to log in to do that".to_string(),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                "An internal error occurred".to_string()
            }
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                "An internal error occurred".to_string()
            }
            Self::Form(rejection) => rejection.body_text(),
        };

        (status, render::error_page(status, &message)).into_response()
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        Self::Form(rejection)
    }
}

impl From<BlogError> for ApiError {
    fn from(e: BlogError) -> Self {
        match e {
            BlogError::NotFound { id } => Self::NotFound { id },
            _ => Self::Database(e),
        }
    }
}

/// Startup/serve error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database setup failed: {0}")]
    Database(#[from] BlogError),

    #[error("session key rejected")]
    SessionKey,
}
