//! Test harness: the fully layered router over fabricated keys and a fixed clock.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use http_body_util::BodyExt;
use jsonwebtoken::Algorithm;
use serde_json::Value;
use tower::ServiceExt;

use crate::app::build_router;
use crate::middleware::auth::service_key::SERVICE_KEY_HEADER;
use crate::services::auth::{
    ServiceKey, SessionTokens, UserId, clock::FixedClock, codec::TokenCodec,
};
use crate::state::AppState;

pub const KEY: &str = "abc123";
pub const T: i64 = 1_700_000_000;
pub const W: u64 = 3_600;

pub struct Harness {
    pub clock: FixedClock,
    pub state: AppState,
    router: Router,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    pub fn new() -> Self {
        Self::with_secret(b"test-secret")
    }

    pub fn with_secret(secret: &[u8]) -> Self {
        let clock = FixedClock::at(T);
        let tokens = SessionTokens::new(
            TokenCodec::new(secret, Algorithm::HS256),
            "notes-gate".to_string(),
            W,
            Arc::new(clock.clone()),
        );
        let state = AppState::new(ServiceKey::new(KEY), Arc::new(tokens));
        let router = build_router(state.clone());

        Self {
            clock,
            state,
            router,
        }
    }

    pub fn token_for(&self, user_id: i64) -> String {
        self.state.tokens.issue(UserId(user_id)).unwrap().token
    }

    /// Registers `username` (password "pw") through the API and returns a fresh session token.
    pub async fn signed_in(&self, username: &str) -> String {
        let (status, _) = self
            .send(
                Method::POST,
                "/auth/signup/",
                Some(KEY),
                None,
                Some(serde_json::json!({
                    "username": username,
                    "name": username,
                    "password": "pw",
                    "confirm_password": "pw"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self
            .send(
                Method::POST,
                "/auth/signin/",
                Some(KEY),
                None,
                Some(serde_json::json!({"username": username, "password": "pw"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    fn request(
        method: Method,
        uri: &str,
        key: Option<&str>,
        bearer: Option<&str>,
        body: Option<Value>,
    ) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(key) = key {
            builder = builder.header(SERVICE_KEY_HEADER, key);
        }
        if let Some(bearer) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {bearer}"));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    pub async fn send_response(&self, method: Method, uri: &str, key: Option<&str>) -> Response {
        self.router
            .clone()
            .oneshot(Self::request(method, uri, key, None, None))
            .await
            .unwrap()
    }

    /// Sends a request and returns the status with the body parsed as JSON
    /// (non-JSON bodies come back as a JSON string).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        key: Option<&str>,
        bearer: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(Self::request(method, uri, key, bearer, body))
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, body)
    }

    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        key: Option<&str>,
    ) -> (StatusCode, String, String) {
        let response = self.send_response(method, uri, key).await;

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, content_type, String::from_utf8_lossy(&bytes).into_owned())
    }
}
