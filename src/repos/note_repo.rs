/*
 * Responsibility
 * - notes storage (in-memory)
 * - every lookup is scoped by owner: a note is only visible to the user that created it
 */
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::services::auth::UserId;

#[derive(Debug, Clone)]
pub struct NoteRow {
    pub id: i64,
    pub user_id: UserId,
    pub title: String,
    pub details: Option<String>,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Table {
    rows: Vec<NoteRow>,
    last_id: i64,
}

#[derive(Debug, Clone, Default)]
pub struct NoteRepo {
    table: Arc<RwLock<Table>>,
}

impl NoteRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notes owned by `user_id` with the given archive state, optionally narrowed to one id.
    pub async fn list(&self, user_id: UserId, archived: bool, note_id: Option<i64>) -> Vec<NoteRow> {
        self.table
            .read()
            .await
            .rows
            .iter()
            .filter(|n| n.user_id == user_id && n.archived == archived)
            .filter(|n| note_id.is_none_or(|id| n.id == id))
            .cloned()
            .collect()
    }

    pub async fn create(&self, user_id: UserId, title: &str, details: Option<&str>) -> NoteRow {
        let mut table = self.table.write().await;
        table.last_id += 1;

        let now = Utc::now();
        let row = NoteRow {
            id: table.last_id,
            user_id,
            title: title.to_string(),
            details: details.map(str::to_string),
            archived: false,
            created_at: now,
            updated_at: now,
        };
        table.rows.push(row.clone());
        row
    }

    pub async fn update(
        &self,
        note_id: i64,
        user_id: UserId,
        title: &str,
        details: Option<&str>,
    ) -> Option<NoteRow> {
        let mut table = self.table.write().await;
        let row = table
            .rows
            .iter_mut()
            .find(|n| n.id == note_id && n.user_id == user_id)?;

        row.title = title.to_string();
        row.details = details.map(str::to_string);
        row.updated_at = Utc::now();
        Some(row.clone())
    }

    pub async fn archive(&self, note_id: i64, user_id: UserId) -> bool {
        let mut table = self.table.write().await;
        match table
            .rows
            .iter_mut()
            .find(|n| n.id == note_id && n.user_id == user_id)
        {
            Some(row) => {
                row.archived = true;
                row.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    pub async fn delete(&self, note_id: i64, user_id: UserId) -> bool {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table
            .rows
            .retain(|n| !(n.id == note_id && n.user_id == user_id));
        table.rows.len() < before
    }
}
