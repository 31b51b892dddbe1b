/*
 * Responsibility
 * - URL structure of the service
 * - the `/auth/` prefix is the group the session-token gate skips; keep sign-up/sign-in under it
 * - Gates are layered in app.rs, not here
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::handlers::{
    auth::{sign_in, sign_up},
    notes::{archive_note, create_note, edit_note, view_archived_notes, view_notes},
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup/", post(sign_up))
        .route("/auth/signin/", post(sign_in))
        .route("/notes/view", get(view_notes))
        .route("/notes/create/", post(create_note))
        .route("/notes/edit/", post(edit_note))
        .route("/notes/archive", get(archive_note))
        .route("/notes/getarchived", get(view_archived_notes))
}
