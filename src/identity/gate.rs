//! Auth gate: resolves `Authorization: Bearer <token>` to a stored user.
//! Every failure maps to 401 at the boundary; the variants stay distinct
//! for logging and tests.

use axum::http::HeaderMap;

use crate::error::{ApiError, AuthError};
use crate::model::User;
use crate::security;
use crate::server::AppState;

/// Extract the bearer token from the Authorization header.
///
/// A header without the `Bearer ` prefix is passed through as-is and left
/// to signature verification to reject.
pub fn bearer_token(headers: &HeaderMap) -> Result<String, AuthError> {
    let Some(value) = headers.get("authorization") else {
        return Err(AuthError::MissingHeader);
    };
    let raw = value.to_str().map_err(|_| AuthError::InvalidToken)?;
    let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token.to_string())
}

/// Resolve the caller or fail with 401. On success the full user record is
/// returned for downstream ownership checks and profile reads.
pub fn require_user(state: &AppState, headers: &HeaderMap) -> Result<User, ApiError> {
    let token = bearer_token(headers)?;
    let user_id = security::verify_token(&state.auth.secret, &token)?;
    state
        .store
        .user(user_id)
        .ok_or(ApiError::Auth(AuthError::UserNotFound))
}
