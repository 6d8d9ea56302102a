//! Entry routes - list, view, edit, update, add, delete

use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;

use blogctl_core::{EntryId, DEFAULT_LIST_LIMIT};

use crate::error::ApiError;
use crate::extractors::DbConn;
use crate::render::{self, Chrome};
use crate::session::{Session, SetSession};
use crate::state::AppState;

/// Title/text pair posted by the add and edit forms
#[derive(Debug, Deserialize)]
pub struct EntryForm {
    pub title: String,
    pub text: String,
}

fn require_login(session: &Session, action: &'static str) -> Result<(), ApiError> {
    if session.is_logged_in() {
        Ok(())
    } else {
        tracing::warn!(action, "rejected write from anonymous session");
        Err(ApiError::Unauthorized)
    }
}

/// GET / - newest entries
async fn list_entries(
    State(state): State<AppState>,
    mut session: Session,
    mut db: DbConn,
) -> Result<(SetSession, Html<String>), ApiError> {
    let entries = db.store().list_recent(DEFAULT_LIST_LIMIT).await?;
    let page = render::entry_list(&entries, &Chrome::from_session(&mut session));

    Ok((state.sessions().commit(&session)?, page))
}

/// GET /entries/{id} - one entry
async fn show_entry(
    State(state): State<AppState>,
    mut session: Session,
    mut db: DbConn,
    Path(id): Path<EntryId>,
) -> Result<(SetSession, Html<String>), ApiError> {
    let entry = db.store().get(id).await?;
    let page = render::entry_detail(&entry, &Chrome::from_session(&mut session));

    Ok((state.sessions().commit(&session)?, page))
}

/// GET /entries/{id}/edit - edit form, open to anonymous sessions
async fn edit_entry(
    State(state): State<AppState>,
    mut session: Session,
    mut db: DbConn,
    Path(id): Path<EntryId>,
) -> Result<(SetSession, Html<String>), ApiError> {
    let entry = db.store().get(id).await?;
    let page = render::edit_form(&entry, &Chrome::from_session(&mut session));

    Ok((state.sessions().commit(&session)?, page))
}

/// POST /entries/{id}/update - apply an edit, open to anonymous sessions
async fn update_entry(
    State(state): State<AppState>,
    mut session: Session,
    mut db: DbConn,
    Path(id): Path<EntryId>,
    Form(form): Form<EntryForm>,
) -> Result<(SetSession, Redirect), ApiError> {
    db.store().update(id, &form.title, &form.text).await?;
    tracing::info!(id, "entry edited");

    session.flash("Entry was successfully edited");
    Ok((state.sessions().commit(&session)?, Redirect::to("/")))
}

/// GET /entries/{id}/delete - requires login
async fn delete_entry(
    State(state): State<AppState>,
    mut session: Session,
    mut db: DbConn,
    Path(id): Path<EntryId>,
) -> Result<(SetSession, Redirect), ApiError> {
    require_login(&session, "delete")?;

    db.store().delete(id).await?;
    tracing::info!(id, "entry deleted");

    session.flash("Entry was successfully deleted");
    Ok((state.sessions().commit(&session)?, Redirect::to("/")))
}

/// POST /add - requires login. The body is only looked at once the
/// session is known to be logged in, so anonymous posts get 401 whatever
/// they send.
async fn add_entry(
    State(state): State<AppState>,
    mut session: Session,
    mut db: DbConn,
    form: Result<Form<EntryForm>, FormRejection>,
) -> Result<(SetSession, Redirect), ApiError> {
    require_login(&session, "add")?;
    let Form(form) = form?;

    let entry = db.store().create(&form.title, &form.text).await?;
    tracing::info!(id = entry.id, "entry posted");

    session.flash("New entry was successfully posted");
    Ok((state.sessions().commit(&session)?, Redirect::to("/")))
}

/// Entry routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_entries))
        .route("/add", post(add_entry))
        .route("/entries/{id}", get(show_entry))
        .route("/entries/{id}/edit", get(edit_entry))
        .route("/entries/{id}/update", post(update_entry))
        .route("/entries/{id}/delete", get(delete_entry))
}
