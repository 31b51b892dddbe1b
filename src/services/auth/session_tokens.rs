use std::sync::Arc;

use tracing::error;

use crate::error::AppError;
use crate::services::auth::{
    claims::{SessionClaims, UserId},
    clock::Clock,
    codec::{TokenCodec, TokenError},
};

/// A freshly minted session token and the claims inside it.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: SessionClaims,
}

/// Issues and verifies session tokens for one issuer.
///
/// - Issuance is called by the sign-in flow only.
/// - Verification is called by the session-token gate.
/// - Each call reads the clock exactly once.
#[derive(Clone)]
pub struct SessionTokens {
    codec: TokenCodec,
    issuer: String,
    ttl_seconds: u64,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for SessionTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokens")
            .field("codec", &self.codec)
            .field("issuer", &self.issuer)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl SessionTokens {
    pub fn new(codec: TokenCodec, issuer: String, ttl_seconds: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            codec,
            issuer,
            ttl_seconds,
            clock,
        }
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    pub fn issue(&self, user_id: UserId) -> Result<IssuedToken, AppError> {
        let now = self.clock.now();
        let claims = SessionClaims::new(user_id, &self.issuer, now, self.ttl_seconds);

        let token = self.codec.sign(&claims).map_err(|e| {
            error!(error = %e, user_id = %user_id, "failed to sign session token");
            AppError::Internal
        })?;

        Ok(IssuedToken { token, claims })
    }

    /// Verify a bearer token and check it came from this issuer.
    ///
    /// Expiry wins over an issuer mismatch, since `exp` is checked inside the codec.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let now = self.clock.now();
        let claims = self.codec.verify(token, now)?;

        if claims.iss != self.issuer {
            return Err(TokenError::Invalid(format!(
                "unexpected issuer {:?}",
                claims.iss
            )));
        }

        Ok(claims)
    }
}
