/*
 * Responsibility
 * - Password hashing primitive used by sign-up / sign-in only (the gates never touch it)
 * - bcrypt, run on the blocking pool so a slow hash never stalls the async workers
 */
use tracing::error;

use crate::error::AppError;

#[cfg(not(test))]
const COST: u32 = bcrypt::DEFAULT_COST;
// bcrypt's minimum cost; keeps the test suite fast.
#[cfg(test)]
const COST: u32 = 4;

pub async fn hash(plaintext: &str) -> Result<String, AppError> {
    let plaintext = plaintext.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, COST))
        .await
        .map_err(|e| {
            error!(error = %e, "password hashing task failed");
            AppError::Internal
        })?
        .map_err(|e| {
            error!(error = %e, "failed to hash password");
            AppError::Internal
        })
}

/// Malformed stored values never verify.
pub async fn verify(plaintext: &str, stored: &str) -> bool {
    let (plaintext, stored) = (plaintext.to_owned(), stored.to_owned());
    tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &stored))
        .await
        .map(|result| result.unwrap_or(false))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify() {
        let stored = hash("hunter2").await.unwrap();
        assert!(stored.starts_with("$2b$04$"));
        assert!(verify("hunter2", &stored).await);
        assert!(!verify("hunter3", &stored).await);
    }

    #[tokio::test]
    async fn salts_differ_between_hashes() {
        assert_ne!(hash("same").await.unwrap(), hash("same").await.unwrap());
    }

    #[tokio::test]
    async fn malformed_stored_values_never_verify() {
        for stored in ["", "$2b$", "$2b$04$short", "sha256$00$00", "plain-text"] {
            assert!(!verify("anything", stored).await, "{stored:?}");
        }
    }
}
