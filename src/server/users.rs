//! User routes: registration and login (email or phone), the caller's
//! profile and listings, and favorite toggling/resolution.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::identity;
use crate::model::{Listing, Profile, User};
use crate::security;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct PhoneLoginRequest {
    pub phone: String,
    pub password: String,
}

/// Issued on register and login: the bearer token plus the
/// credential-stripped account view.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: Profile,
}

fn issue_response(state: &AppState, user: &User) -> ApiResult<AuthResponse> {
    let token = security::issue_token(&state.auth.secret, user.id, state.auth.token_ttl_hours)?;
    Ok(AuthResponse {
        token,
        user: user.profile(),
    })
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let password_hash = security::hash_password(&req.password)?;
    let user = state
        .store
        .create_user(User::new(req.name, req.email, req.phone, password_hash))?;
    info!(user = %user.id, "user registered");
    Ok((StatusCode::CREATED, Json(issue_response(&state, &user)?)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let user = state
        .store
        .user_by_email(&req.email)
        .ok_or_else(ApiError::user_not_found)?;
    if !security::verify_password(&user.password_hash, &req.password) {
        return Err(ApiError::InvalidPassword);
    }
    Ok(Json(issue_response(&state, &user)?))
}

pub async fn login_phone(
    State(state): State<AppState>,
    Json(req): Json<PhoneLoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let user = state
        .store
        .user_by_phone(&req.phone)
        .ok_or_else(ApiError::user_not_found)?;
    if !security::verify_password(&user.password_hash, &req.password) {
        return Err(ApiError::InvalidPassword);
    }
    Ok(Json(issue_response(&state, &user)?))
}

pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Json<Profile>> {
    let user = identity::require_user(&state, &headers)?;
    Ok(Json(user.profile()))
}

pub async fn my_listings(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<Listing>>> {
    let user = identity::require_user(&state, &headers)?;
    Ok(Json(state.store.listings_of(user.id)))
}

pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(listing_id): Path<Uuid>,
    headers: HeaderMap,
) -> ApiResult<Json<Value>> {
    let user = identity::require_user(&state, &headers)?;
    let favorites = state
        .store
        .toggle_favorite(user.id, listing_id)
        .ok_or_else(ApiError::user_not_found)?;
    Ok(Json(json!({ "favorites": favorites })))
}

pub async fn favorites(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<Listing>>> {
    let user = identity::require_user(&state, &headers)?;
    Ok(Json(state.store.resolve_listings(&user.favorites)))
}
