/*
 * Responsibility
 * - POST /auth/signup/, POST /auth/signin/
 * - Reached without a session token (the `/auth/` group is exempt from the token gate)
 * - Sign-in is the only caller of token issuance
 */
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use tracing::info;

use crate::{
    api::dto::auth::{SignInRequest, SignInResponse, SignUpRequest, UserDetails},
    error::AppError,
    repos::error::RepoError,
    services::password,
    state::AppState,
};

const USERNAME_TAKEN: &str = "Please choose another username.";
const UNKNOWN_USER: &str = "User does not exist.";

pub async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> Result<impl IntoResponse, AppError> {
    let username = req.username.trim();
    if state.users.exists(username).await {
        return Err(AppError::invalid_request(USERNAME_TAKEN));
    }
    req.validate().map_err(AppError::invalid_request)?;

    let password_hash = password::hash(&req.password).await?;
    let row = state
        .users
        .create(username, req.name.trim(), &password_hash)
        .await
        .map_err(|e| match e {
            RepoError::Conflict(_) => AppError::invalid_request(USERNAME_TAKEN),
        })?;

    info!(user_id = %row.id, "user signed up");

    Ok((
        StatusCode::CREATED,
        Json(json!({"result": "Signed up successfully."})),
    ))
}

/// Unknown user, inactive user and wrong password all get the same terminal 400.
pub async fn sign_in(
    State(state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> Result<Json<SignInResponse>, AppError> {
    let Some(user) = state
        .users
        .find_active_by_username(req.username.trim())
        .await
    else {
        return Err(AppError::invalid_request(UNKNOWN_USER));
    };
    if !password::verify(&req.password, &user.password_hash).await {
        return Err(AppError::invalid_request(UNKNOWN_USER));
    }

    let issued = state.tokens.issue(user.id)?;

    info!(user_id = %user.id, exp = issued.claims.exp, "session token issued");

    Ok(Json(SignInResponse {
        message: "Signed in successfully.",
        user_details: UserDetails {
            id: user.id.0,
            name: user.name,
        },
        token: issued.token,
        expires_in: state.tokens.ttl_seconds(),
    }))
}
