//! Shared helpers for the integration tests: state construction, account
//! seeding and authenticated header assembly.
#![allow(dead_code)] // not every test crate uses every helper

use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::Json;

use pazar::model::{CreateListing, Listing, Profile};
use pazar::server::users::{AuthResponse, RegisterRequest};
use pazar::server::{listings, users, AppState, AuthConfig};
use pazar::store::SharedStore;

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn test_state() -> AppState {
    AppState {
        store: SharedStore::new(),
        auth: AuthConfig {
            secret: TEST_SECRET.to_string(),
            token_ttl_hours: 24,
        },
    }
}

pub fn bearer_headers(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        "authorization",
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
    );
    headers
}

/// Register an account through the handler and return its token + profile.
pub async fn register_user(state: &AppState, name: &str, email: &str) -> (String, Profile) {
    let (status, Json(resp)) = users::register(
        State(state.clone()),
        Json(RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: "correct horse".to_string(),
            phone: None,
        }),
    )
    .await
    .expect("register should succeed");
    assert_eq!(status, StatusCode::CREATED);
    let AuthResponse { token, user } = resp;
    (token, user)
}

pub fn listing_payload(title: &str) -> CreateListing {
    CreateListing {
        title: Some(title.to_string()),
        description: Some("well kept".to_string()),
        price: Some(1500.0),
        location: Some("Izmir".to_string()),
        main_category: Some("vehicles".to_string()),
        sub_category: Some("cars".to_string()),
        ..Default::default()
    }
}

/// Create a listing through the handler as the given caller.
pub async fn create_listing(state: &AppState, token: &str, title: &str) -> Listing {
    let (status, Json(listing)) = listings::create(
        State(state.clone()),
        bearer_headers(token),
        Json(listing_payload(title)),
    )
    .await
    .expect("create should succeed");
    assert_eq!(status, StatusCode::CREATED);
    listing
}
