//! End-to-end promotion lifecycle: free discover window on creation, paid
//! tier purchase with receipt, slot queries reflecting the transition.

mod common;

use axum::extract::{Path, State};
use axum::Json;
use chrono::{Duration, Utc};

use common::{bearer_headers, create_listing, register_user, test_state};
use pazar::error::ApiError;
use pazar::model::PromotionType;
use pazar::promotion;
use pazar::server::listings::{self, PromoteRequest};

#[tokio::test]
async fn new_listing_gets_free_discover_window() {
    let state = test_state();
    let (token, _) = register_user(&state, "A", "a@example.com").await;
    let listing = create_listing(&state, &token, "fresh listing").await;

    assert_eq!(listing.promotion_type, PromotionType::KesfetFree);
    assert!(listing.featured);
    assert_eq!(
        listing.featured_until,
        Some(listing.created_at + Duration::hours(24))
    );

    // present in discover now, absent from the promoted subset a day later
    let snapshot = state.store.active_listings();
    let now = Utc::now();
    assert!(promotion::discover(&snapshot, now).iter().any(|l| l.id == listing.id));
    assert!(promotion::currently_promoted(
        &listing,
        PromotionType::KesfetFree,
        now + Duration::hours(1)
    ));
    assert!(!promotion::currently_promoted(
        &listing,
        PromotionType::KesfetFree,
        now + Duration::hours(25)
    ));
}

#[tokio::test]
async fn purchasing_vitrin_prices_and_schedules_the_promotion() {
    let state = test_state();
    let (token, _) = register_user(&state, "A", "a@example.com").await;
    let listing = create_listing(&state, &token, "boosted").await;

    let before = Utc::now();
    let Json(resp) = listings::promote(
        State(state.clone()),
        Path(listing.id),
        bearer_headers(&token),
        Json(PromoteRequest {
            promotion_type: Some("vitrin".into()),
            duration: Some(7),
        }),
    )
    .await
    .expect("promotion should succeed");

    assert_eq!(resp.cost, 25);
    assert_eq!(resp.duration, 7);
    assert_eq!(resp.listing.promotion_type, PromotionType::Vitrin);
    assert!(resp.listing.featured);
    let until = resp.listing.featured_until.expect("expiry must be set");
    let expected = before + Duration::days(7);
    assert!((until - expected).abs() < Duration::seconds(5));

    // surfaces in the featured slot, not in spotlight
    let snapshot = state.store.active_listings();
    let now = Utc::now();
    assert!(promotion::featured(&snapshot, now).iter().any(|l| l.id == listing.id));
    assert!(promotion::spotlight(&snapshot, now).is_empty());
}

#[tokio::test]
async fn repromotion_overwrites_tier_and_duration() {
    let state = test_state();
    let (token, _) = register_user(&state, "A", "a@example.com").await;
    let listing = create_listing(&state, &token, "upgraded").await;

    let Json(first) = listings::promote(
        State(state.clone()),
        Path(listing.id),
        bearer_headers(&token),
        Json(PromoteRequest {
            promotion_type: Some("kesfet".into()),
            duration: Some(3),
        }),
    )
    .await
    .unwrap();
    assert_eq!(first.cost, 50);
    assert_eq!(first.duration, 3);

    let Json(second) = listings::promote(
        State(state.clone()),
        Path(listing.id),
        bearer_headers(&token),
        Json(PromoteRequest {
            promotion_type: Some("spotlight".into()),
            duration: None,
        }),
    )
    .await
    .unwrap();
    assert_eq!(second.cost, 100);
    assert_eq!(second.duration, promotion::DEFAULT_DURATION_DAYS);
    assert_eq!(second.listing.promotion_type, PromotionType::Spotlight);

    let snapshot = state.store.active_listings();
    let now = Utc::now();
    assert!(promotion::spotlight(&snapshot, now).iter().any(|l| l.id == listing.id));
    assert!(promotion::featured(&snapshot, now).is_empty());
    // spotlight listings are not part of the discover promoted pool; with
    // one active listing the feed still reaches it through backfill
    let feed = promotion::discover(&snapshot, now);
    assert_eq!(feed.len(), 1);
}

#[tokio::test]
async fn unknown_and_unpurchasable_tiers_are_400() {
    let state = test_state();
    let (token, _) = register_user(&state, "A", "a@example.com").await;
    let listing = create_listing(&state, &token, "cannot boost").await;

    for tier in ["gold", "kesfet_free", "none", ""] {
        let err = listings::promote(
            State(state.clone()),
            Path(listing.id),
            bearer_headers(&token),
            Json(PromoteRequest {
                promotion_type: Some(tier.into()),
                duration: None,
            }),
        )
        .await
        .unwrap_err();
        assert!(
            matches!(err, ApiError::InvalidPromotionType),
            "tier {tier:?} should be rejected"
        );
        assert_eq!(err.http_status(), 400);
    }

    // missing type field behaves the same
    let err = listings::promote(
        State(state.clone()),
        Path(listing.id),
        bearer_headers(&token),
        Json(PromoteRequest::default()),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::InvalidPromotionType));

    // failed purchases never touched the promotion state
    let Json(current) = listings::fetch(State(state.clone()), Path(listing.id))
        .await
        .unwrap();
    assert_eq!(current.promotion_type, PromotionType::KesfetFree);
}
