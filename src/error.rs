/*
 * Responsibility
 * - Application-wide AppError (gate rejections + handler errors)
 * - IntoResponse: one status + `{"message": ...}` body per variant
 * - TokenError (codec classification) -> AppError
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::codec::TokenError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("Api Key Invalid.")]
    KeyMissingOrInvalid,
    #[error("No Authorization token provided")]
    AuthHeaderMissing,
    #[error("Signature has expired.")]
    TokenExpired,
    #[error("Error decoding signature.")]
    TokenDecodeError,
    #[error("Incorrect authentication token.")]
    TokenInvalid,

    #[error("{0}")]
    InvalidRequest(String),
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::KeyMissingOrInvalid
            | AppError::TokenDecodeError
            | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::AuthHeaderMissing | AppError::TokenExpired | AppError::TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short stable name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::KeyMissingOrInvalid => "key_missing_or_invalid",
            AppError::AuthHeaderMissing => "auth_header_missing",
            AppError::TokenExpired => "token_expired",
            AppError::TokenDecodeError => "token_decode_error",
            AppError::TokenInvalid => "token_invalid",
            AppError::InvalidRequest(_) => "invalid_request",
            AppError::Internal => "internal",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Expired => AppError::TokenExpired,
            TokenError::Decode(_) => AppError::TokenDecodeError,
            TokenError::Invalid(_) => AppError::TokenInvalid,
        }
    }
}
