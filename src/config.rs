/*
 * Responsibility
 * - Load settings from the environment (API_KEY, JWT_*, PORT, ...)
 * - Validate them; anything missing or malformed fails startup
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use jsonwebtoken::Algorithm;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<&str>) -> Self {
        match raw.unwrap_or("development").to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

pub const DEFAULT_ISSUER: &str = "notes-gate";
// 8 hours
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 8 * 60 * 60;

pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // Static service key every non-landing request must present in the `key` header.
    pub api_key: String,

    pub jwt_secret: String,
    pub jwt_algorithm: Algorithm,
    pub auth_issuer: String,
    pub access_token_ttl_seconds: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Secrets stay out of logs
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("jwt_algorithm", &self.jwt_algorithm)
            .field("auth_issuer", &self.auth_issuer)
            .field("access_token_ttl_seconds", &self.access_token_ttl_seconds)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        let api_key = required(&lookup, "API_KEY")?;
        let jwt_secret = required(&lookup, "JWT_SECRET")?;

        let jwt_algorithm = match lookup("JWT_ALGORITHM") {
            Some(raw) => parse_hmac_algorithm(&raw)?,
            None => Algorithm::HS256,
        };

        let auth_issuer = lookup("AUTH_ISSUER")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_ISSUER.to_string());

        let access_token_ttl_seconds = match lookup("ACCESS_TOKEN_TTL_SECONDS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|ttl| *ttl > 0)
                .ok_or(ConfigError::Invalid("ACCESS_TOKEN_TTL_SECONDS"))?,
            None => DEFAULT_TOKEN_TTL_SECONDS,
        };

        Ok(Self {
            addr,
            app_env,
            api_key,
            jwt_secret,
            jwt_algorithm,
            auth_issuer,
            access_token_ttl_seconds,
        })
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).ok_or(ConfigError::Missing(key))?;
    if value.is_empty() {
        return Err(ConfigError::Invalid(key));
    }
    Ok(value)
}

/// The signing secret is shared between issuer and verifier, so only the HMAC family is usable.
fn parse_hmac_algorithm(raw: &str) -> Result<Algorithm, ConfigError> {
    match Algorithm::from_str(raw.trim()) {
        Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => Ok(alg),
        _ => Err(ConfigError::Invalid("JWT_ALGORITHM")),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn minimal_environment_uses_defaults() {
        let config = load(&[("API_KEY", "abc123"), ("JWT_SECRET", "s3cret")]).unwrap();

        assert_eq!(config.api_key, "abc123");
        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.jwt_algorithm, Algorithm::HS256);
        assert_eq!(config.auth_issuer, DEFAULT_ISSUER);
        assert_eq!(config.access_token_ttl_seconds, DEFAULT_TOKEN_TTL_SECONDS);
    }

    #[test]
    fn missing_service_key_is_fatal() {
        let err = load(&[("JWT_SECRET", "s3cret")]).unwrap_err();
        assert_eq!(err, ConfigError::Missing("API_KEY"));
        assert_eq!(err.to_string(), "missing configuration: API_KEY");
    }

    #[test]
    fn empty_service_key_is_rejected() {
        let err = load(&[("API_KEY", ""), ("JWT_SECRET", "s3cret")]).unwrap_err();
        assert_eq!(err, ConfigError::Invalid("API_KEY"));
        assert_eq!(err.to_string(), "invalid configuration: API_KEY");
    }

    #[test]
    fn missing_signing_secret_is_fatal() {
        let err = load(&[("API_KEY", "abc123")]).unwrap_err();
        assert_eq!(err, ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn asymmetric_algorithms_are_refused() {
        let err = load(&[
            ("API_KEY", "abc123"),
            ("JWT_SECRET", "s3cret"),
            ("JWT_ALGORITHM", "RS256"),
        ])
        .unwrap_err();
        assert_eq!(err, ConfigError::Invalid("JWT_ALGORITHM"));

        let config = load(&[
            ("API_KEY", "abc123"),
            ("JWT_SECRET", "s3cret"),
            ("JWT_ALGORITHM", "HS512"),
        ])
        .unwrap();
        assert_eq!(config.jwt_algorithm, Algorithm::HS512);
    }

    #[test]
    fn zero_ttl_is_invalid() {
        let err = load(&[
            ("API_KEY", "abc123"),
            ("JWT_SECRET", "s3cret"),
            ("ACCESS_TOKEN_TTL_SECONDS", "0"),
        ])
        .unwrap_err();
        assert_eq!(err, ConfigError::Invalid("ACCESS_TOKEN_TTL_SECONDS"));
    }

    #[test]
    fn production_env_is_recognised() {
        let config = load(&[
            ("API_KEY", "abc123"),
            ("JWT_SECRET", "s3cret"),
            ("APP_ENV", "PROD"),
            ("PORT", "8080"),
        ])
        .unwrap();
        assert!(config.app_env.is_production());
        assert_eq!(config.addr.port(), 8080);
    }
}
