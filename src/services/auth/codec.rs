use std::str::FromStr;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::services::auth::claims::SessionClaims;

/// Why a presented token was refused.
///
/// The three cases share one decode-and-validate pass but are reported separately,
/// because clients see different messages for each.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// Signature is good but `exp` has passed.
    #[error("token expired")]
    Expired,
    /// The compact serialization itself could not be parsed.
    #[error("token could not be decoded: {0}")]
    Decode(String),
    /// Parsed fine but failed signature / algorithm / claim checks.
    #[error("token rejected: {0}")]
    Invalid(String),
}

fn classify(err: jsonwebtoken::errors::Error, token: &str) -> TokenError {
    match err.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::Json(_) => match unsupported_algorithm(token) {
            Some(alg) => TokenError::Invalid(format!("unsupported algorithm: {}", alg)),
            None => TokenError::Decode(err.to_string()),
        },
        ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Utf8(_) => {
            TokenError::Decode(err.to_string())
        }
        _ => TokenError::Invalid(err.to_string()),
    }
}

/// The `alg` of a well-formed JSON header that names no algorithm the library knows
/// (`none`, `HS1`, ...). jsonwebtoken reports those as JSON errors; they are a
/// mismatch with the expected algorithm, not an unreadable token.
fn unsupported_algorithm(token: &str) -> Option<String> {
    let segment = token.split('.').next()?;
    let bytes = URL_SAFE_NO_PAD.decode(segment).ok()?;
    let header: Value = serde_json::from_slice(&bytes).ok()?;
    let alg = header.as_object()?.get("alg")?.as_str()?;

    Algorithm::from_str(alg).is_err().then(|| alg.to_string())
}

/// HMAC JWT sign/verify with a shared secret.
///
/// - Key material is not printable via Debug.
/// - Time-based claims are checked against the `now` passed by the caller, not the
///   library's own clock.
#[derive(Clone)]
pub struct TokenCodec {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl TokenCodec {
    pub fn new(secret: &[u8], algorithm: Algorithm) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();
        validation.leeway = 0;

        Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn sign(&self, claims: &SessionClaims) -> Result<String, jsonwebtoken::errors::Error> {
        let mut header = Header::new(self.algorithm);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, claims, &self.encoding_key)
    }

    /// Decode and validate `token` as of `now` (seconds since epoch).
    ///
    /// Order: structure, algorithm + signature, claim shape, `exp`, `nbf`.
    /// A token is still valid at `now == exp`.
    pub fn verify(&self, token: &str, now: i64) -> Result<SessionClaims, TokenError> {
        // Decode into a loose map first so a bad claim shape is reported as Invalid,
        // not confused with a payload that is not JSON at all.
        let data = jsonwebtoken::decode::<Map<String, Value>>(
            token,
            &self.decoding_key,
            &self.validation,
        )
        .map_err(|e| classify(e, token))?;

        let claims: SessionClaims = serde_json::from_value(Value::Object(data.claims))
            .map_err(|e| TokenError::Invalid(format!("malformed claims: {}", e)))?;

        if now > claims.exp {
            return Err(TokenError::Expired);
        }
        if claims.nbf > now {
            return Err(TokenError::Invalid("token not yet valid".to_string()));
        }

        Ok(claims)
    }
}
