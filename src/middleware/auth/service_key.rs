//! Service-key gate: first stage in front of every request.
//!
//! - `/` is served the landing page without looking at any header.
//! - Everything else must carry `key: <API_KEY>`; absent, empty, non-UTF-8 or different
//!   values are all the same rejection (400 "Api Key Invalid.").
//! - On acceptance the request gets its own empty identity slot and a start instant,
//!   and the latency is logged once the downstream response is ready.

use std::time::Instant;

use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderMap, HeaderName},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use tracing::{info, warn};

use crate::api::{extractors::RequestIdentity, landing};
use crate::error::AppError;
use crate::services::auth::ServiceKey;
use crate::state::AppState;

pub const SERVICE_KEY_HEADER: HeaderName = HeaderName::from_static("key");

/// Instant the request entered the gate pipeline.
#[derive(Debug, Clone, Copy)]
pub struct RequestStart(pub Instant);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCheck {
    /// Root path: answer with the landing page, skip every other stage.
    Landing,
    Accepted,
}

pub fn check(key: &ServiceKey, path: &str, headers: &HeaderMap) -> Result<KeyCheck, AppError> {
    if path == "/" {
        return Ok(KeyCheck::Landing);
    }

    let presented = headers
        .get(SERVICE_KEY_HEADER)
        .map(|v| v.as_bytes())
        .unwrap_or_default();

    if key.matches(presented) {
        Ok(KeyCheck::Accepted)
    } else {
        Err(AppError::KeyMissingOrInvalid)
    }
}

/// Put the service-key gate in front of `router`. Apply it last so it runs first.
pub fn apply(router: Router, state: AppState) -> Router {
    router.layer(middleware::from_fn_with_state(state, service_key_middleware))
}

async fn service_key_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let started = Instant::now();

    match check(&state.service_key, req.uri().path(), req.headers()) {
        Ok(KeyCheck::Landing) => return landing::page().into_response(),
        Ok(KeyCheck::Accepted) => {}
        Err(err) => {
            warn!(
                kind = err.kind(),
                method = %req.method(),
                path = %req.uri().path(),
                "request rejected by service key gate"
            );
            return err.into_response();
        }
    }

    req.extensions_mut().insert(RequestStart(started));
    req.extensions_mut().insert(RequestIdentity::Unauthenticated);

    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let response = next.run(req).await;

    info!(
        %method,
        %path,
        status = response.status().as_u16(),
        latency_ms = started.elapsed().as_millis() as u64,
        "request completed"
    );

    response
}
