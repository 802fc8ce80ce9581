//! In-memory store for the property API
//!
//! ## Design Decisions
//!
//! ### Single lock
//! - All records live behind one `parking_lot::Mutex`. Every operation takes
//!   the lock for a short synchronous section and never holds it across an
//!   `.await`, so handlers stay cheap and ordering between concurrent
//!   requests is simply lock order.
//!
//! ### Sequential ids
//! - Property, booking and image ids are sequential integers starting at 1,
//!   matching the wire format the client expects (the placeholder image for
//!   a listing without uploads is keyed by `id - 1`).
//!
//! ### Ownership
//! - Each property records the username that created it. Updates and
//!   deletes from anyone else fail with `StoreError::NotOwner`; bookings can
//!   only be read back by the guest that made them.
//!
//! ### Audit log
//! - Every property mutation appends an `AuditEntry` listing the fields that
//!   were submitted, which makes partial updates observable from tests and
//!   the dev server logs.

use std::collections::{BTreeMap, HashMap};

use derive_more::Display;
use parking_lot::Mutex;
use payloads::{BookingId, ImageId, PropertyDraft, PropertyField, PropertyId};
use rust_decimal::Decimal;
use secrecy::SecretBox;

pub mod booking;
pub mod login;
pub mod property;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Property not found")]
    PropertyNotFound,
    #[error("Booking not found")]
    BookingNotFound,
    #[error("Image not found")]
    ImageNotFound,
    #[error("Only the owner of this property can change it")]
    NotOwner,
    #[error("Only the guest who made this booking can view it")]
    NotGuest,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Username already taken")]
    UsernameTaken,
    #[error("Missing or invalid value for {0}")]
    InvalidField(PropertyField),
    #[error("Check-out must be after check-in")]
    InvalidDateRange,
    #[error("Total price for this stay is too large")]
    TotalTooLarge,
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AuditAction {
    Created,
    Updated,
    Deleted,
}

/// A record of one property mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub action: AuditAction,
    pub property_id: PropertyId,
    pub username: String,
    /// Fields present in the submitted form, in field order.
    pub fields: Vec<PropertyField>,
}

#[derive(Debug, Clone)]
pub(crate) struct PropertyRecord {
    pub owner: String,
    /// Scalar values only; uploads are moved into the image table.
    pub details: PropertyDraft,
    pub image_ids: Vec<ImageId>,
}

#[derive(Debug, Clone)]
pub(crate) struct BookingRecord {
    pub property_id: PropertyId,
    pub guest: String,
    pub start_date: jiff::civil::Date,
    pub end_date: jiff::civil::Date,
    pub charges: Vec<Decimal>,
}

/// An uploaded image as served from `/api/images/{id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Default)]
pub(crate) struct Inner {
    pub accounts: HashMap<String, SecretBox<String>>,
    pub properties: BTreeMap<PropertyId, PropertyRecord>,
    pub bookings: BTreeMap<BookingId, BookingRecord>,
    pub images: BTreeMap<ImageId, StoredImage>,
    pub audit_log: Vec<AuditEntry>,
    last_property_id: i64,
    last_booking_id: i64,
    last_image_id: i64,
}

impl Inner {
    pub fn next_property_id(&mut self) -> PropertyId {
        self.last_property_id += 1;
        PropertyId(self.last_property_id)
    }

    pub fn next_booking_id(&mut self) -> BookingId {
        self.last_booking_id += 1;
        BookingId(self.last_booking_id)
    }

    pub fn next_image_id(&mut self) -> ImageId {
        self.last_image_id += 1;
        ImageId(self.last_image_id)
    }

    pub fn property(
        &self,
        property_id: &PropertyId,
    ) -> Result<&PropertyRecord, StoreError> {
        self.properties
            .get(property_id)
            .ok_or(StoreError::PropertyNotFound)
    }
}

/// Shared application state. Cheap to share behind `web::Data`.
pub struct Store {
    pub(crate) inner: Mutex<Inner>,
    /// Origin used to build absolute image URLs.
    public_url: Mutex<String>,
}

impl Store {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            public_url: Mutex::new(String::new()),
        }
    }

    /// Set the origin that image URLs in responses are built from.
    pub fn set_public_url(&self, public_url: impl Into<String>) {
        *self.public_url.lock() = public_url.into();
    }

    pub(crate) fn image_url(&self, image_id: &ImageId) -> String {
        format!("{}/api/images/{image_id}", self.public_url.lock())
    }

    /// A copy of every property mutation so far, oldest first.
    pub fn audit_log(&self) -> Vec<AuditEntry> {
        self.inner.lock().audit_log.clone()
    }

    pub fn image(&self, image_id: &ImageId) -> Result<StoredImage, StoreError> {
        self.inner
            .lock()
            .images
            .get(image_id)
            .cloned()
            .ok_or(StoreError::ImageNotFound)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
