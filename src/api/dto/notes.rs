/*
 * Responsibility
 * - notes request/response DTOs
 * - owner is never part of a request body; it always comes from the session identity
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repos::note_repo::NoteRow;

#[derive(Debug, Deserialize)]
pub struct NoteQuery {
    pub note_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub details: Option<String>,
}

impl CreateNoteRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("title is required");
        }
        if self.title.chars().count() > 50 {
            return Err("title must be <= 50 chars");
        }
        if let Some(details) = &self.details
            && details.chars().count() > 500
        {
            return Err("details must be <= 500 chars");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Edit,
    Delete,
}

#[derive(Debug, Deserialize)]
pub struct EditNoteRequest {
    pub note_id: Option<i64>,
    // Kept as a raw string: unknown modes get the "provide a mode" message, not a 422.
    pub mode: Option<String>,
    pub title: Option<String>,
    pub details: Option<String>,
}

impl EditNoteRequest {
    pub fn mode(&self) -> Option<EditMode> {
        match self.mode.as_deref() {
            Some("edit") => Some(EditMode::Edit),
            Some("delete") => Some(EditMode::Delete),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NoteResponse {
    pub id: i64,
    pub title: String,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<NoteRow> for NoteResponse {
    fn from(row: NoteRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            details: row.details,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
