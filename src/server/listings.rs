//! Listing routes: public promotion-slot reads, creation with the free
//! discover window, and owner-gated update/delete/promote.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::model::{CreateListing, Listing, ListingUpdate, PromotionType};
use crate::promotion;
use crate::server::AppState;
use crate::{identity, promotion::Receipt};

pub async fn featured(State(state): State<AppState>) -> Json<Vec<Listing>> {
    Json(promotion::featured(&state.store.active_listings(), Utc::now()))
}

pub async fn discover(State(state): State<AppState>) -> Json<Vec<Listing>> {
    Json(promotion::discover(&state.store.active_listings(), Utc::now()))
}

pub async fn spotlight(State(state): State<AppState>) -> Json<Vec<Listing>> {
    Json(promotion::spotlight(&state.store.active_listings(), Utc::now()))
}

pub async fn all_active(State(state): State<AppState>) -> Json<Vec<Listing>> {
    Json(state.store.active_listings())
}

pub async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Listing>> {
    state
        .store
        .listing(id)
        .map(Json)
        .ok_or_else(ApiError::listing_not_found)
}

pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateListing>,
) -> ApiResult<(StatusCode, Json<Listing>)> {
    let user = identity::require_user(&state, &headers)?;
    let missing = payload.missing_fields();
    if !missing.is_empty() {
        return Err(ApiError::MissingFields(missing));
    }
    let mut listing = payload.into_listing(user.id, Utc::now());
    promotion::auto_promote_new(&mut listing);
    state.store.save_listing(listing.clone());
    info!(listing = %listing.id, owner = %user.id, "listing created");
    Ok((StatusCode::CREATED, Json(listing)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(patch): Json<ListingUpdate>,
) -> ApiResult<Json<Listing>> {
    let user = identity::require_user(&state, &headers)?;
    let listing = state.store.listing(id).ok_or_else(ApiError::listing_not_found)?;
    identity::ensure_owner(&listing, &user)?;
    let (updated, _) = state
        .store
        .update_listing(id, |l| {
            patch.apply(l);
            l.updated_at = Utc::now();
        })
        .ok_or_else(ApiError::listing_not_found)?;
    Ok(Json(updated))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> ApiResult<Json<Value>> {
    let user = identity::require_user(&state, &headers)?;
    let listing = state.store.listing(id).ok_or_else(ApiError::listing_not_found)?;
    identity::ensure_owner(&listing, &user)?;
    state.store.remove_listing(id);
    info!(listing = %id, owner = %user.id, "listing deleted");
    Ok(Json(json!({ "message": "listing deleted" })))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoteRequest {
    /// Requested tier by wire name; validated against the price table.
    pub promotion_type: Option<String>,
    /// Days the promotion runs; defaults to 7.
    pub duration: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoteResponse {
    pub message: &'static str,
    pub listing: Listing,
    pub cost: u32,
    pub duration: i64,
}

pub async fn promote(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(req): Json<PromoteRequest>,
) -> ApiResult<Json<PromoteResponse>> {
    let user = identity::require_user(&state, &headers)?;
    let listing = state.store.listing(id).ok_or_else(ApiError::listing_not_found)?;
    identity::ensure_owner(&listing, &user)?;

    let tier: PromotionType = req
        .promotion_type
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(|_| ApiError::InvalidPromotionType)?;

    let now = Utc::now();
    let (updated, outcome) = state
        .store
        .update_listing(id, |l| promotion::promote(l, tier, req.duration, now))
        .ok_or_else(ApiError::listing_not_found)?;
    let Receipt { cost, duration } = outcome?;
    info!(listing = %id, tier = ?tier, duration, "promotion purchased");
    Ok(Json(PromoteResponse {
        message: "promotion purchased",
        listing: updated,
        cost,
        duration,
    }))
}
