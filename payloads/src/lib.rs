pub mod api_client;
pub mod detail;
pub mod draft;
pub mod gallery;
pub mod requests;
pub mod responses;

pub use api_client::{APIClient, ClientError};
pub use detail::{DetailDialog, DetailEvent};
pub use draft::{ChangedFields, FormDraft, PropertyDraft, PropertyField};
pub use gallery::ImageGallery;

use derive_more::{Display, FromStr};
use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Base of the CDN used for listings without any uploaded images.
pub const PLACEHOLDER_IMAGE_BASE: &str =
    "https://cdn.altcademy.com/assets/images/medium/airbnb_clone";

/// Deterministic stand-in image for a property with no uploads, keyed by
/// `property_id - 1`.
pub fn placeholder_image_url(property_id: PropertyId) -> String {
    format!("{PLACEHOLDER_IMAGE_BASE}/{}.jpg", property_id.0 - 1)
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    FromStr,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct PropertyId(pub i64);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    FromStr,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct BookingId(pub i64);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    FromStr,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct ImageId(pub i64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyImage {
    pub url: String,
}

/// A user as embedded in property and booking responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub username: String,
}

/// A listing as returned by the property endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub title: String,
    pub description: String,
    pub city: String,
    pub country: String,
    pub property_type: String,
    pub price_per_night: Decimal,
    pub max_guests: u32,
    pub bedrooms: u32,
    pub beds: u32,
    pub baths: u32,
    #[serde(default)]
    pub images: Vec<PropertyImage>,
    pub user: UserRef,
    #[serde(default)]
    pub amenities: Option<String>,
    #[serde(default)]
    pub policies: Option<String>,
    #[serde(default)]
    pub neighborhood: Option<String>,
}

impl Property {
    /// Whether the given session user owns this listing. Only used to gate
    /// UI; the server enforces ownership on its own.
    pub fn is_owned_by(&self, username: Option<&str>) -> bool {
        username.is_some_and(|username| username == self.user.username)
    }

    /// URL of the image at `index`, or the placeholder when there are no
    /// uploaded images.
    pub fn image_url(&self, index: usize) -> String {
        image_or_placeholder(&self.images, index, self.id)
    }

    pub fn location(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }
}

/// The property as embedded in a booking response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookedProperty {
    pub property_id: PropertyId,
    pub title: String,
    pub city: String,
    pub country: String,
    /// Host username
    pub username: String,
    pub price_per_night: Decimal,
    pub bedrooms: u32,
    pub beds: u32,
    pub baths: u32,
    #[serde(default)]
    pub images: Vec<PropertyImage>,
}

impl BookedProperty {
    pub fn image_url(&self) -> String {
        image_or_placeholder(&self.images, 0, self.property_id)
    }

    pub fn location(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }

    /// Nightly rate annotation shown next to the total, e.g. `($120/day)`.
    pub fn rate_annotation(&self) -> String {
        format!("(${}/day)", self.price_per_night)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Charge {
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub start_date: Date,
    pub end_date: Date,
    pub property: BookedProperty,
    pub user: UserRef,
    #[serde(default)]
    pub charges: Vec<Charge>,
}

impl Booking {
    /// The amount of the first charge with any fractional part dropped.
    pub fn total_cost(&self) -> Option<Decimal> {
        self.charges
            .first()
            .map(|charge| charge.amount.trunc().normalize())
    }

    /// Display string for the total, e.g. `$150.00`, or `pending` if no
    /// charge has been recorded yet.
    pub fn total_cost_display(&self) -> String {
        match self.total_cost() {
            Some(total) => format!("${total}.00"),
            None => "pending".to_string(),
        }
    }
}

fn image_or_placeholder(
    images: &[PropertyImage],
    index: usize,
    property_id: PropertyId,
) -> String {
    if images.is_empty() {
        return placeholder_image_url(property_id);
    }
    images[index % images.len()].url.clone()
}
