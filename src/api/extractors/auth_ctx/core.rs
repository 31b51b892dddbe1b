use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::UserId;

use super::RequestIdentity;

/// The identity slot is always readable; a missing extension means nothing authenticated
/// this request.
impl<S> FromRequestParts<S> for RequestIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestIdentity>()
            .copied()
            .unwrap_or_default())
    }
}

/// Extractor for handlers that need an authenticated user.
/// Rejects with 401 when the session-token gate did not set an identity (exempt route,
/// or the gate is not wired in front of the handler).
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub UserId);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(identity) = RequestIdentity::from_request_parts(parts, state).await;
        identity
            .user_id()
            .map(AuthUser)
            .ok_or(AppError::AuthHeaderMissing)
    }
}
