/// Factory: build the auth services from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{
    ServiceKey, SessionTokens, clock::SystemClock, codec::TokenCodec,
};

pub fn build_session_tokens(config: &Config) -> Arc<SessionTokens> {
    let codec = TokenCodec::new(config.jwt_secret.as_bytes(), config.jwt_algorithm);

    Arc::new(SessionTokens::new(
        codec,
        config.auth_issuer.clone(),
        config.access_token_ttl_seconds,
        Arc::new(SystemClock),
    ))
}

pub fn build_service_key(config: &Config) -> ServiceKey {
    ServiceKey::new(config.api_key.as_str())
}
