//!
//! pazar listing store
//! -------------------
//! In-memory record storage for users and listings with find/sort/limit/save
//! semantics. The public API centers around `SharedStore`, a cloneable handle
//! over an `Arc<RwLock<...>>` that is constructed once at startup and passed
//! into the server state; there is no process-global store.
//!
//! Key responsibilities:
//! - User accounts: insert with uniqueness checks on email and phone,
//!   lookup by id/email/phone.
//! - Listings: save, fetch, closure-based update under the write guard,
//!   delete, recency-ordered scans.
//! - Favorites: atomic membership toggle on the user record. The toggle is
//!   a store-level set-add/set-remove, so concurrent toggles from the same
//!   user cannot lose an update.
//!
//! No lock is ever held across an `.await`; all methods are synchronous and
//! short-lived.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::model::{Listing, ListingStatus, User};

#[derive(Default)]
struct StoreInner {
    users: HashMap<Uuid, User>,
    listings: HashMap<Uuid, Listing>,
}

/// Thread-safe store handle shared across request handlers.
#[derive(Clone, Default)]
pub struct SharedStore(Arc<RwLock<StoreInner>>);

impl SharedStore {
    pub fn new() -> Self {
        Self::default()
    }

    // --- users ---

    /// Insert a new account, rejecting duplicate email or phone. The checks
    /// and the insert happen under one write guard.
    pub fn create_user(&self, user: User) -> ApiResult<User> {
        let mut inner = self.0.write();
        if inner
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(ApiError::DuplicateEmail);
        }
        if let Some(phone) = user.phone.as_deref() {
            if inner
                .users
                .values()
                .any(|u| u.phone.as_deref() == Some(phone))
            {
                return Err(ApiError::DuplicatePhone);
            }
        }
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    pub fn user(&self, id: Uuid) -> Option<User> {
        self.0.read().users.get(&id).cloned()
    }

    pub fn user_by_email(&self, email: &str) -> Option<User> {
        self.0
            .read()
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    pub fn user_by_phone(&self, phone: &str) -> Option<User> {
        self.0
            .read()
            .users
            .values()
            .find(|u| u.phone.as_deref() == Some(phone))
            .cloned()
    }

    /// Atomic favorite toggle: removes the listing id if present, appends it
    /// otherwise. Returns the resulting favorites list, or None when the
    /// user no longer exists.
    pub fn toggle_favorite(&self, user_id: Uuid, listing_id: Uuid) -> Option<Vec<Uuid>> {
        let mut inner = self.0.write();
        let user = inner.users.get_mut(&user_id)?;
        if let Some(pos) = user.favorites.iter().position(|id| *id == listing_id) {
            user.favorites.remove(pos);
        } else {
            user.favorites.push(listing_id);
        }
        Some(user.favorites.clone())
    }

    // --- listings ---

    pub fn save_listing(&self, listing: Listing) {
        self.0.write().listings.insert(listing.id, listing);
    }

    pub fn listing(&self, id: Uuid) -> Option<Listing> {
        self.0.read().listings.get(&id).cloned()
    }

    /// Apply `f` to the stored listing under the write guard and return the
    /// updated record together with the closure's output. Returns None when
    /// the listing does not exist (it may have been deleted since a prior
    /// read).
    pub fn update_listing<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Listing) -> T,
    ) -> Option<(Listing, T)> {
        let mut inner = self.0.write();
        let listing = inner.listings.get_mut(&id)?;
        let out = f(listing);
        Some((listing.clone(), out))
    }

    pub fn remove_listing(&self, id: Uuid) -> bool {
        self.0.write().listings.remove(&id).is_some()
    }

    /// All active listings, newest first.
    pub fn active_listings(&self) -> Vec<Listing> {
        let mut out: Vec<Listing> = self
            .0
            .read()
            .listings
            .values()
            .filter(|l| l.status == ListingStatus::Active)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }

    /// Every listing owned by `owner`, regardless of status, newest first.
    pub fn listings_of(&self, owner: Uuid) -> Vec<Listing> {
        let mut out: Vec<Listing> = self
            .0
            .read()
            .listings
            .values()
            .filter(|l| l.owner == owner)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }

    /// Resolve listing references to full records, preserving input order and
    /// skipping ids that no longer resolve.
    pub fn resolve_listings(&self, ids: &[Uuid]) -> Vec<Listing> {
        let inner = self.0.read();
        ids.iter()
            .filter_map(|id| inner.listings.get(id).cloned())
            .collect()
    }
}
