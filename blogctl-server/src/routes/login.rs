//! Login/logout routes

use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;

use crate::error::ApiError;
use crate::render::{self, Chrome};
use crate::session::Session;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// GET /login - empty form
async fn login_form(
    State(state): State<AppState>,
    mut session: Session,
) -> Result<impl IntoResponse, ApiError> {
    let page: Html<String> = render::login_form(None, &Chrome::from_session(&mut session));
    Ok((state.sessions().commit(&session)?, page))
}

/// POST /login - check credentials; on failure the form comes back with
/// the reason
async fn login(
    State(state): State<AppState>,
    mut session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, ApiError> {
    match state.credentials().check(&form.username, &form.password) {
        Ok(()) => {
            session.log_in();
            session.flash("You were logged in");
            tracing::info!("login succeeded");
            Ok((state.sessions().commit(&session)?, Redirect::to("/")).into_response())
        }
        Err(reason) => {
            tracing::warn!(%reason, "login failed");
            let message = reason.to_string();
            let page = render::login_form(Some(&message), &Chrome::from_session(&mut session));
            Ok((state.sessions().commit(&session)?, page).into_response())
        }
    }
}

/// GET /logout
async fn logout(
    State(state): State<AppState>,
    mut session: Session,
) -> Result<impl IntoResponse, ApiError> {
    session.log_out();
    session.flash("You were logged out");
    Ok((state.sessions().commit(&session)?, Redirect::to("/")))
}

/// Session routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
}
