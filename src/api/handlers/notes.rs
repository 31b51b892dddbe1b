/*
 * Responsibility
 * - handlers under the /notes/ prefix
 * - Owner always comes from AuthUser (set by the session-token gate), never from the body
 */
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;

use crate::{
    api::{
        dto::notes::{CreateNoteRequest, EditMode, EditNoteRequest, NoteQuery, NoteResponse},
        extractors::AuthUser,
    },
    error::AppError,
    repos::note_repo::NoteRow,
    state::AppState,
};

fn notes_or_empty(rows: Vec<NoteRow>) -> Response {
    if rows.is_empty() {
        return Json(json!({"message": "No notes found."})).into_response();
    }
    let result: Vec<NoteResponse> = rows.into_iter().map(NoteResponse::from).collect();
    Json(json!({ "result": result })).into_response()
}

pub async fn view_notes(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<NoteQuery>,
) -> Response {
    let rows = state.notes.list(user_id, false, query.note_id).await;
    notes_or_empty(rows)
}

pub async fn view_archived_notes(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Response {
    let rows = state.notes.list(user_id, true, None).await;
    notes_or_empty(rows)
}

pub async fn create_note(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<CreateNoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate().map_err(AppError::invalid_request)?;

    let row = state
        .notes
        .create(user_id, req.title.trim(), req.details.as_deref())
        .await;
    debug!(%user_id, note_id = row.id, "note created");

    Ok((StatusCode::CREATED, Json(json!({"result": "Note created!"}))))
}

pub async fn edit_note(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<EditNoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let note_id = req
        .note_id
        .ok_or_else(|| AppError::invalid_request("No note_id"))?;
    let mode = req
        .mode()
        .ok_or_else(|| AppError::invalid_request("Please provide a mode, edit or delete"))?;

    let result = match mode {
        EditMode::Edit => {
            let title = req.title.as_deref().map(str::trim).unwrap_or_default();
            if title.is_empty() {
                return Err(AppError::invalid_request("title is required"));
            }
            state
                .notes
                .update(note_id, user_id, title, req.details.as_deref())
                .await
                .map(|_| "Note edited")
        }
        EditMode::Delete => state
            .notes
            .delete(note_id, user_id)
            .await
            .then_some("Note deleted."),
    };

    let result = result.ok_or_else(|| AppError::invalid_request("Note not found"))?;
    Ok(Json(json!({ "result": result })))
}

pub async fn archive_note(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<NoteQuery>,
) -> Result<impl IntoResponse, AppError> {
    let archived = match query.note_id {
        Some(note_id) => state.notes.archive(note_id, user_id).await,
        None => false,
    };
    if !archived {
        return Err(AppError::invalid_request("Note not found."));
    }

    Ok(Json(json!({"result": "Note archived!"})))
}
