//!
//! pazar HTTP server
//! -----------------
//! This module defines the Axum-based HTTP API for the marketplace.
//!
//! Responsibilities:
//! - Construct the store handle and shared application state at startup.
//! - Mount the listing routes (public reads, owner-gated mutations,
//!   promotion purchase) and the user routes (register/login, profile,
//!   favorites).
//! - Surface the unified error taxonomy as JSON `{"message": ...}` bodies.
//!
//! Bearer-token resolution lives in `identity`; selection and promotion
//! logic lives in `promotion`. Handlers stay thin over those modules.

use std::net::SocketAddr;

use anyhow::Context;
use axum::routing::{get, post};
use axum::Router;
use tracing::info;

use crate::store::SharedStore;

pub mod listings;
pub mod users;

/// Token signing configuration shared by login issuance and the auth gate.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub token_ttl_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: "pazar-dev-secret".to_string(),
            token_ttl_hours: 24,
        }
    }
}

/// Shared server state injected into all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub auth: AuthConfig,
}

/// Mount every route onto a router bound to the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "pazar ok" }))
        .route("/listings/featured", get(listings::featured))
        .route("/listings/discover", get(listings::discover))
        .route("/listings/spotlight", get(listings::spotlight))
        .route("/listings", get(listings::all_active).post(listings::create))
        .route(
            "/listings/{id}",
            get(listings::fetch)
                .patch(listings::update)
                .delete(listings::remove),
        )
        .route("/listings/{id}/promote", post(listings::promote))
        .route("/users/register", post(users::register))
        .route("/users/login", post(users::login))
        .route("/users/login-phone", post(users::login_phone))
        .route("/users/me", get(users::me))
        .route("/users/me/listings", get(users::my_listings))
        .route("/users/favorites/{listing_id}", post(users::toggle_favorite))
        .route("/users/favorites", get(users::favorites))
        .with_state(state)
}

/// Start the pazar HTTP server bound to the given port. The store handle is
/// constructed here and owned by the router state; it is torn down when the
/// server future resolves.
pub async fn run_with_config(http_port: u16, auth: AuthConfig) -> anyhow::Result<()> {
    let state = AppState {
        store: SharedStore::new(),
        auth,
    };
    let app = router(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", http_port)
        .parse()
        .with_context(|| format!("invalid http port: {}", http_port))?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Convenience entry point reading configuration from the environment
/// (PAZAR_HTTP_PORT, PAZAR_TOKEN_SECRET, PAZAR_TOKEN_TTL_HOURS).
pub async fn run() -> anyhow::Result<()> {
    let http_port = std::env::var("PAZAR_HTTP_PORT")
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(5000);
    let mut auth = AuthConfig::default();
    if let Ok(secret) = std::env::var("PAZAR_TOKEN_SECRET") {
        if !secret.trim().is_empty() {
            auth.secret = secret;
        }
    }
    if let Some(ttl) = std::env::var("PAZAR_TOKEN_TTL_HOURS")
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
    {
        auth.token_ttl_hours = ttl;
    }
    run_with_config(http_port, auth).await
}
