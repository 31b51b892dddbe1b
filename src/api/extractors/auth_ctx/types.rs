/*
 * Responsibility
 * - The per-request identity slot as handlers see it
 * - Stored in request extensions, so every request carries its own copy
 */

use crate::services::auth::UserId;

/// Who the current request is acting as.
///
/// Starts `Unauthenticated` when the request enters the pipeline and is set to
/// `Authenticated` at most once, by the session-token gate. Routes exempt from the gate
/// (the `/auth/` group) keep `Unauthenticated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestIdentity {
    #[default]
    Unauthenticated,
    Authenticated(UserId),
}

impl RequestIdentity {
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Self::Authenticated(id) => Some(*id),
            Self::Unauthenticated => None,
        }
    }
}
