/*
 * Responsibility
 * - users storage (in-memory; one table keyed by numeric id)
 * - usernames are unique; inactive users are invisible to sign-in
 */
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::repos::error::{RepoError, RepoResult};
use crate::services::auth::UserId;

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: UserId,
    pub username: String,
    pub name: String,
    pub password_hash: String,
    pub active: bool,
}

#[derive(Debug, Default)]
struct Table {
    rows: Vec<UserRow>,
    last_id: i64,
}

#[derive(Debug, Clone, Default)]
pub struct UserRepo {
    table: Arc<RwLock<Table>>,
}

impl UserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(
        &self,
        username: &str,
        name: &str,
        password_hash: &str,
    ) -> RepoResult<UserRow> {
        let mut table = self.table.write().await;
        if table.rows.iter().any(|u| u.username == username) {
            return Err(RepoError::Conflict("username"));
        }

        table.last_id += 1;
        let row = UserRow {
            id: UserId(table.last_id),
            username: username.to_string(),
            name: name.to_string(),
            password_hash: password_hash.to_string(),
            active: true,
        };
        table.rows.push(row.clone());

        Ok(row)
    }

    pub async fn exists(&self, username: &str) -> bool {
        self.table
            .read()
            .await
            .rows
            .iter()
            .any(|u| u.username == username)
    }

    pub async fn find_active_by_username(&self, username: &str) -> Option<UserRow> {
        self.table
            .read()
            .await
            .rows
            .iter()
            .find(|u| u.active && u.username == username)
            .cloned()
    }

    #[cfg(test)]
    pub async fn deactivate(&self, username: &str) {
        let mut table = self.table.write().await;
        if let Some(row) = table.rows.iter_mut().find(|u| u.username == username) {
            row.active = false;
        }
    }
}
