//!
//! Promotion engine
//! ----------------
//! Ranking and selection for the paid-visibility surfaces (featured,
//! discover, spotlight) and the state transitions that promote a listing.
//! All selection functions are pure over a snapshot of listings and an
//! explicit `now`, so ordering and expiry behavior are directly testable.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::model::{Listing, ListingStatus, PromotionType};

pub const FEATURED_LIMIT: usize = 12;
pub const DISCOVER_LIMIT: usize = 20;
pub const SPOTLIGHT_LIMIT: usize = 5;
/// Days a purchased promotion runs when the buyer does not pick a duration.
pub const DEFAULT_DURATION_DAYS: i64 = 7;
/// Free discover window granted to every new listing.
pub const FREE_WINDOW_HOURS: i64 = 24;

/// Fixed price table. `kesfet_free` and `none` are not purchasable.
pub fn price_of(promotion: PromotionType) -> Option<u32> {
    match promotion {
        PromotionType::Vitrin => Some(25),
        PromotionType::Kesfet => Some(50),
        PromotionType::Spotlight => Some(100),
        PromotionType::None | PromotionType::KesfetFree => None,
    }
}

/// A promotion slot is live while the listing is active, flagged featured,
/// and its expiry is unset (indefinite) or still in the future.
fn promotion_live(listing: &Listing, now: DateTime<Utc>) -> bool {
    listing.status == ListingStatus::Active
        && listing.featured
        && listing.featured_until.map_or(true, |until| until >= now)
}

/// Whether `listing` currently occupies a promoted slot of type `promotion`.
pub fn currently_promoted(listing: &Listing, promotion: PromotionType, now: DateTime<Utc>) -> bool {
    listing.promotion_type == promotion && promotion_live(listing, now)
}

fn slot(listings: &[Listing], promotion: PromotionType, limit: usize, now: DateTime<Utc>) -> Vec<Listing> {
    let mut out: Vec<Listing> = listings
        .iter()
        .filter(|l| currently_promoted(l, promotion, now))
        .cloned()
        .collect();
    out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    out.truncate(limit);
    out
}

/// Vitrin slot: newest first, at most 12.
pub fn featured(listings: &[Listing], now: DateTime<Utc>) -> Vec<Listing> {
    slot(listings, PromotionType::Vitrin, FEATURED_LIMIT, now)
}

/// Spotlight slot: newest first, at most 5.
pub fn spotlight(listings: &[Listing], now: DateTime<Utc>) -> Vec<Listing> {
    slot(listings, PromotionType::Spotlight, SPOTLIGHT_LIMIT, now)
}

/// Discover feed: live kesfet and kesfet_free listings, paid placements
/// first and newest first within each tier. When fewer than 20 qualify,
/// the feed is backfilled with the most recent active listings not already
/// present. Never exceeds 20 entries, never repeats an id.
pub fn discover(listings: &[Listing], now: DateTime<Utc>) -> Vec<Listing> {
    let mut promoted: Vec<Listing> = listings
        .iter()
        .filter(|l| {
            promotion_live(l, now)
                && matches!(
                    l.promotion_type,
                    PromotionType::Kesfet | PromotionType::KesfetFree
                )
        })
        .cloned()
        .collect();
    promoted.sort_by(|a, b| {
        a.promotion_type
            .discover_rank()
            .cmp(&b.promotion_type.discover_rank())
            .then(b.created_at.cmp(&a.created_at))
    });

    if promoted.len() >= DISCOVER_LIMIT {
        promoted.truncate(DISCOVER_LIMIT);
        return promoted;
    }

    let taken: HashSet<Uuid> = promoted.iter().map(|l| l.id).collect();
    let mut backfill: Vec<Listing> = listings
        .iter()
        .filter(|l| l.status == ListingStatus::Active && !taken.contains(&l.id))
        .cloned()
        .collect();
    backfill.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    backfill.truncate(DISCOVER_LIMIT - promoted.len());
    promoted.extend(backfill);
    promoted
}

/// Outcome of a promotion purchase: the looked-up price and the effective
/// duration in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub cost: u32,
    pub duration: i64,
}

/// Purchase transition. Overwrites any prior promotion state (no stacking,
/// no refund accounting); a promoted listing can be re-promoted to another
/// tier or duration. Fails without mutating when the type is not in the
/// price table.
pub fn promote(
    listing: &mut Listing,
    promotion: PromotionType,
    duration_days: Option<i64>,
    now: DateTime<Utc>,
) -> Result<Receipt, ApiError> {
    let Some(cost) = price_of(promotion) else {
        return Err(ApiError::InvalidPromotionType);
    };
    let duration = duration_days.unwrap_or(DEFAULT_DURATION_DAYS);
    listing.featured = true;
    listing.promotion_type = promotion;
    listing.featured_until = Some(now + Duration::days(duration));
    listing.updated_at = now;
    Ok(Receipt { cost, duration })
}

/// Every new listing gets one day in the discover feed at no cost,
/// regardless of caller preference.
pub fn auto_promote_new(listing: &mut Listing) {
    listing.featured = true;
    listing.promotion_type = PromotionType::KesfetFree;
    listing.featured_until = Some(listing.created_at + Duration::hours(FREE_WINDOW_HOURS));
}
