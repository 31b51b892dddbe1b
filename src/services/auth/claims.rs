//! Session token claims and the principal identifier they carry.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Internal user id (numeric primary key of the users table).
///
/// On the wire it is written as a decimal string (`"sub": "42"`); reading also accepts a
/// bare JSON integer so tokens minted with a numeric `sub` keep verifying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for UserId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct UserIdVisitor;

        impl Visitor<'_> for UserIdVisitor {
            type Value = UserId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a numeric user id as string or integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<UserId, E> {
                v.parse::<i64>()
                    .map(UserId)
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<UserId, E> {
                Ok(UserId(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<UserId, E> {
                i64::try_from(v)
                    .map(UserId)
                    .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
            }
        }

        deserializer.deserialize_any(UserIdVisitor)
    }
}

/// Payload signed into every session token.
///
/// Tokens minted here always satisfy `nbf <= iat < exp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: UserId,
    pub iss: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}

impl SessionClaims {
    pub fn new(sub: UserId, issuer: &str, now: i64, ttl_seconds: u64) -> Self {
        Self {
            sub,
            iss: issuer.to_string(),
            iat: now,
            nbf: now,
            exp: now.saturating_add_unsigned(ttl_seconds),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn new_claims_hold_validity_window() {
        let claims = SessionClaims::new(UserId(7), "notes-gate", 1_000, 3_600);
        assert_eq!(claims.iat, 1_000);
        assert!(claims.nbf <= claims.iat);
        assert!(claims.iat < claims.exp);
        assert_eq!(claims.exp, 4_600);
    }

    #[test]
    fn subject_is_written_as_string() {
        let claims = SessionClaims::new(UserId(42), "iss", 10, 5);
        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["sub"], json!("42"));
    }

    #[test]
    fn subject_accepts_string_or_integer() {
        let from_str: UserId = serde_json::from_value(json!("19")).unwrap();
        let from_int: UserId = serde_json::from_value(json!(19)).unwrap();
        assert_eq!(from_str, UserId(19));
        assert_eq!(from_int, UserId(19));
    }

    #[test]
    fn non_numeric_subject_is_refused() {
        assert!(serde_json::from_value::<UserId>(json!("alice")).is_err());
        assert!(serde_json::from_value::<UserId>(json!(1.5)).is_err());
        assert!(serde_json::from_value::<UserId>(json!(null)).is_err());
    }
}
