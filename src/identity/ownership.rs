//! Ownership guard: mutation rights are bound to the listing's creator.

use crate::error::ApiError;
use crate::model::{Listing, User};

/// Allow a mutation iff the caller created the listing. There is no
/// role-based override. Callers must check listing existence first so a
/// 404 is never reported as a 403.
pub fn ensure_owner(listing: &Listing, caller: &User) -> Result<(), ApiError> {
    if listing.owner == caller.id {
        Ok(())
    } else {
        Err(ApiError::NotOwner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CreateListing;
    use chrono::Utc;

    #[test]
    fn only_the_exact_owner_passes() {
        let owner = User::new("a".into(), "a@x.com".into(), None, "phc".into());
        let other = User::new("b".into(), "b@x.com".into(), None, "phc".into());
        let listing = CreateListing {
            title: Some("t".into()),
            description: Some("d".into()),
            price: Some(1.0),
            location: Some("l".into()),
            main_category: Some("m".into()),
            sub_category: Some("s".into()),
            ..Default::default()
        }
        .into_listing(owner.id, Utc::now());

        assert!(ensure_owner(&listing, &owner).is_ok());
        assert!(matches!(
            ensure_owner(&listing, &other),
            Err(ApiError::NotOwner)
        ));
    }
}
