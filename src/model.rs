//! Domain records: listings with their category-specific detail variants,
//! promotion state, and user accounts. Wire format is camelCase to match
//! the public API; alternate-language field names from older clients are
//! accepted as input aliases and collapse onto the canonical attributes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Visibility tier assigned to a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionType {
    None,
    Vitrin,
    Kesfet,
    KesfetFree,
    Spotlight,
}

impl PromotionType {
    /// Sort key for the discover feed: paid placements rank ahead of free ones.
    pub fn discover_rank(self) -> u8 {
        match self {
            PromotionType::Kesfet => 0,
            PromotionType::KesfetFree => 1,
            _ => 2,
        }
    }
}

impl std::str::FromStr for PromotionType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(PromotionType::None),
            "vitrin" => Ok(PromotionType::Vitrin),
            "kesfet" => Ok(PromotionType::Kesfet),
            "kesfet_free" => Ok(PromotionType::KesfetFree),
            "spotlight" => Ok(PromotionType::Spotlight),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Active,
    Sold,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    Fixed,
    Negotiable,
}

impl Default for PriceType {
    fn default() -> Self {
        PriceType::Fixed
    }
}

/// Seller contact details shown on a listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Category-specific attributes. Exactly one variant applies per listing;
/// the `kind` tag selects it on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListingDetails {
    Vehicle(VehicleDetails),
    Property(PropertyDetails),
    UsedItem(UsedItemDetails),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDetails {
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub series: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub fuel: Option<String>,
    #[serde(default)]
    pub transmission: Option<String>,
    #[serde(default)]
    pub mileage: Option<i64>,
    #[serde(default)]
    pub body_type: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub damage_record: Option<String>,
    #[serde(default)]
    pub exchange: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetails {
    #[serde(default, alias = "نوع_العقار")]
    pub property_type: Option<String>,
    #[serde(default, alias = "نوع_الإعلان")]
    pub listing_type: Option<String>,
    #[serde(default, alias = "المساحة")]
    pub area: Option<f64>,
    #[serde(default, alias = "عدد_الغرف")]
    pub room_count: Option<String>,
    #[serde(default, alias = "عمر_البناء")]
    pub building_age: Option<String>,
    #[serde(default, alias = "الطابق")]
    pub floor: Option<i32>,
    #[serde(default, alias = "عدد_الطوابق")]
    pub total_floors: Option<i32>,
    #[serde(default, alias = "التدفئة")]
    pub heating: Option<String>,
    #[serde(default, alias = "مفروش")]
    pub furnished: Option<String>,
    #[serde(default)]
    pub balcony: Option<bool>,
    #[serde(default)]
    pub elevator: Option<bool>,
    #[serde(default)]
    pub parking: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsedItemDetails {
    #[serde(default, alias = "itemCondition", alias = "حالة_المنتج")]
    pub condition: Option<String>,
    #[serde(default, alias = "العلامة_التجارية")]
    pub brand: Option<String>,
    #[serde(default, alias = "الموديل")]
    pub model: Option<String>,
    #[serde(default, alias = "الشحن_متاح")]
    pub shipping_available: Option<String>,
    #[serde(default, alias = "الضمان")]
    pub warranty_status: Option<String>,
    #[serde(default, alias = "إمكانية_المقايضة")]
    pub exchange_possible: Option<String>,
}

/// A classified listing. `created_at` is authoritative for recency
/// ordering; promotion fields are written only by the promotion engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub price_type: PriceType,
    pub location: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub main_category: String,
    pub sub_category: String,
    #[serde(default)]
    pub details: Option<ListingDetails>,
    #[serde(default)]
    pub contact: Option<Contact>,
    pub owner: Uuid,
    pub status: ListingStatus,
    pub featured: bool,
    pub featured_until: Option<DateTime<Utc>>,
    pub promotion_type: PromotionType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registered account. The password hash never leaves the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, skip_serializing)]
    pub password_hash: String,
    #[serde(default)]
    pub favorites: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: String, phone: Option<String>, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            phone,
            password_hash,
            favorites: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Credential-stripped view returned by the API.
    pub fn profile(&self) -> Profile {
        Profile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            favorites: self.favorites.clone(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub favorites: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Creation payload. Required fields are optional here so that every
/// absent one can be reported back by name instead of failing on the
/// first.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListing {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub location: Option<String>,
    pub main_category: Option<String>,
    pub sub_category: Option<String>,
    #[serde(default)]
    pub price_type: Option<PriceType>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub details: Option<ListingDetails>,
    #[serde(default)]
    pub contact: Option<Contact>,
}

impl CreateListing {
    /// Names of required fields that are absent or blank, in a fixed order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        let blank = |s: &Option<String>| s.as_deref().map(str::trim).unwrap_or("").is_empty();
        if blank(&self.title) {
            missing.push("title");
        }
        if blank(&self.description) {
            missing.push("description");
        }
        if self.price.is_none() {
            missing.push("price");
        }
        if blank(&self.location) {
            missing.push("location");
        }
        if blank(&self.main_category) {
            missing.push("mainCategory");
        }
        if blank(&self.sub_category) {
            missing.push("subCategory");
        }
        missing
    }

    /// Build the stored record. Promotion state starts unpromoted; the
    /// promotion engine assigns the free discover window right after.
    pub fn into_listing(self, owner: Uuid, now: DateTime<Utc>) -> Listing {
        Listing {
            id: Uuid::new_v4(),
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            price: self.price.unwrap_or_default(),
            price_type: self.price_type.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            images: self.images,
            main_category: self.main_category.unwrap_or_default(),
            sub_category: self.sub_category.unwrap_or_default(),
            details: self.details,
            contact: self.contact,
            owner,
            status: ListingStatus::Active,
            featured: false,
            featured_until: None,
            promotion_type: PromotionType::None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// PATCH payload: a field merge over the stored listing. Identity, owner,
/// creation time and promotion state are not mergeable.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub price_type: Option<PriceType>,
    pub location: Option<String>,
    pub images: Option<Vec<String>>,
    pub main_category: Option<String>,
    pub sub_category: Option<String>,
    pub details: Option<ListingDetails>,
    pub contact: Option<Contact>,
    pub status: Option<ListingStatus>,
}

impl ListingUpdate {
    pub fn apply(self, listing: &mut Listing) {
        if let Some(v) = self.title {
            listing.title = v;
        }
        if let Some(v) = self.description {
            listing.description = v;
        }
        if let Some(v) = self.price {
            listing.price = v;
        }
        if let Some(v) = self.price_type {
            listing.price_type = v;
        }
        if let Some(v) = self.location {
            listing.location = v;
        }
        if let Some(v) = self.images {
            listing.images = v;
        }
        if let Some(v) = self.main_category {
            listing.main_category = v;
        }
        if let Some(v) = self.sub_category {
            listing.sub_category = v;
        }
        if let Some(v) = self.details {
            listing.details = Some(v);
        }
        if let Some(v) = self.contact {
            listing.contact = Some(v);
        }
        if let Some(v) = self.status {
            listing.status = v;
        }
    }
}
