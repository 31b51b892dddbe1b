/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 *   - service key, session token service, user/note stores
 * - Clone is cheap (Arc inside); nothing here is request-scoped
 */
use std::sync::Arc;

use crate::repos::{NoteRepo, UserRepo};
use crate::services::auth::{ServiceKey, SessionTokens};

#[derive(Clone, Debug)]
pub struct AppState {
    pub service_key: ServiceKey,
    pub tokens: Arc<SessionTokens>,
    pub users: UserRepo,
    pub notes: NoteRepo,
}

impl AppState {
    pub fn new(service_key: ServiceKey, tokens: Arc<SessionTokens>) -> Self {
        Self {
            service_key,
            tokens,
            users: UserRepo::new(),
            notes: NoteRepo::new(),
        }
    }
}
