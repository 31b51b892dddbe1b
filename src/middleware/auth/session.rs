//! Session-token gate: second stage, runs only for requests the service-key gate accepted.
//!
//! - Paths under `/auth/` skip this gate entirely (sign-up / sign-in must work without a token).
//! - Everything else needs `Authorization: Bearer <token>`; the token is verified by
//!   `SessionTokens` and its subject is written into the request's `RequestIdentity`.
//! - Each failure becomes exactly one `AppError`; nothing passes through unverified.

use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::{self, Next},
    response::Response,
};
use tracing::{debug, warn};

use crate::api::extractors::RequestIdentity;
use crate::error::AppError;
use crate::middleware::auth::service_key::RequestStart;
use crate::services::auth::SessionTokens;
use crate::state::AppState;

pub const AUTH_ROUTE_PREFIX: &str = "/auth/";

pub fn is_exempt(path: &str) -> bool {
    path.starts_with(AUTH_ROUTE_PREFIX)
}

/// Second whitespace-separated word of the Authorization header.
///
/// The scheme word itself is not checked, only that a credential follows it.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .split_whitespace()
        .nth(1)
}

pub fn check(
    tokens: &SessionTokens,
    path: &str,
    headers: &HeaderMap,
) -> Result<RequestIdentity, AppError> {
    if is_exempt(path) {
        return Ok(RequestIdentity::Unauthenticated);
    }

    let token = bearer_token(headers).ok_or(AppError::AuthHeaderMissing)?;
    let claims = tokens.verify(token)?;

    Ok(RequestIdentity::Authenticated(claims.sub))
}

/// Put the session-token gate in front of `router`.
/// It must sit inside the service-key gate (applied before it).
pub fn apply(router: Router, state: AppState) -> Router {
    router.layer(middleware::from_fn_with_state(state, session_middleware))
}

async fn session_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = match check(&state.tokens, req.uri().path(), req.headers()) {
        Ok(identity) => identity,
        Err(err) => {
            let elapsed_us = req
                .extensions()
                .get::<RequestStart>()
                .map(|RequestStart(at)| at.elapsed().as_micros() as u64);
            warn!(
                kind = err.kind(),
                method = %req.method(),
                path = %req.uri().path(),
                elapsed_us,
                "request rejected by session token gate"
            );
            return Err(err);
        }
    };

    if let Some(user_id) = identity.user_id() {
        debug!(%user_id, "session token verified");
    }

    // middleware -> extractor handoff
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::HeaderValue;
    use jsonwebtoken::Algorithm;

    use super::*;
    use crate::services::auth::{UserId, clock::FixedClock, codec::TokenCodec};

    const T: i64 = 1_700_000_000;
    const W: u64 = 600;

    fn tokens(clock: &FixedClock) -> SessionTokens {
        SessionTokens::new(
            TokenCodec::new(b"secret", Algorithm::HS256),
            "notes-gate".to_string(),
            W,
            Arc::new(clock.clone()),
        )
    }

    fn auth_header(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn auth_group_is_exempt_whatever_the_header() {
        let clock = FixedClock::at(T);
        let tokens = tokens(&clock);

        for headers in [
            HeaderMap::new(),
            auth_header("Bearer"),
            auth_header("Bearer garbage"),
        ] {
            assert_eq!(
                check(&tokens, "/auth/signin/", &headers),
                Ok(RequestIdentity::Unauthenticated)
            );
        }
        assert!(is_exempt("/auth/signup/"));
        assert!(is_exempt("/auth/anything-new"));
        assert!(!is_exempt("/auth"));
        assert!(!is_exempt("/notes/view"));
    }

    #[test]
    fn bearer_extraction_takes_second_part() {
        assert_eq!(bearer_token(&auth_header("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(bearer_token(&auth_header("Bearer   spaced")), Some("spaced"));
        assert_eq!(bearer_token(&auth_header("Bearer")), None);
        assert_eq!(bearer_token(&auth_header("")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn missing_or_malformed_header_is_rejected() {
        let clock = FixedClock::at(T);
        let tokens = tokens(&clock);

        for headers in [HeaderMap::new(), auth_header("Bearer"), auth_header("token")] {
            assert_eq!(
                check(&tokens, "/notes/view", &headers),
                Err(AppError::AuthHeaderMissing)
            );
        }
    }

    #[test]
    fn valid_token_sets_identity() {
        let clock = FixedClock::at(T);
        let tokens = tokens(&clock);
        let issued = tokens.issue(UserId(77)).unwrap();

        let identity = check(
            &tokens,
            "/notes/view",
            &auth_header(&format!("Bearer {}", issued.token)),
        )
        .unwrap();
        assert_eq!(identity, RequestIdentity::Authenticated(UserId(77)));
    }

    #[test]
    fn verification_failures_are_distinguished() {
        let clock = FixedClock::at(T);
        let tokens = tokens(&clock);
        let issued = tokens.issue(UserId(1)).unwrap();
        let bearer = auth_header(&format!("Bearer {}", issued.token));

        clock.set(T + W as i64 + 1);
        assert_eq!(
            check(&tokens, "/notes/view", &bearer),
            Err(AppError::TokenExpired)
        );

        assert_eq!(
            check(&tokens, "/notes/view", &auth_header("Bearer not-a-jwt")),
            Err(AppError::TokenDecodeError)
        );

        clock.set(T);
        let foreign = SessionTokens::new(
            TokenCodec::new(b"other-secret", Algorithm::HS256),
            "notes-gate".to_string(),
            W,
            Arc::new(clock.clone()),
        )
        .issue(UserId(1))
        .unwrap();
        assert_eq!(
            check(
                &tokens,
                "/notes/view",
                &auth_header(&format!("Bearer {}", foreign.token))
            ),
            Err(AppError::TokenInvalid)
        );
    }
}
