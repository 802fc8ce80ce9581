//! Client-side drafts of a property listing.
//!
//! A [`PropertyDraft`] holds typed values for every editable field of a
//! listing. The create view submits the whole draft; the edit view records
//! which fields were touched in a [`ChangedFields`] set and submits only
//! those. Both paths go through [`FormPart`]s, the transport-neutral form of
//! the Rails-style multipart body (`property[title]`, `property[images][]`).

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::Property;

/// Listing types offered by the property form. Values outside this list are
/// accepted from the server and displayed as-is.
pub const PROPERTY_TYPES: &[&str] = &[
    "apartment",
    "house",
    "condominium",
    "townhouse",
    "loft",
    "villa",
    "cabin",
    "cottage",
    "bungalow",
    "other",
];

/// An editable attribute of a listing.
///
/// `id` and `user` are deliberately absent: they never parse from a field
/// name, so they can never be marked as changed or submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PropertyField {
    Title,
    Description,
    PricePerNight,
    City,
    Country,
    PropertyType,
    MaxGuests,
    Bedrooms,
    Beds,
    Baths,
    Images,
    Amenities,
    Policies,
    Neighborhood,
}

impl PropertyField {
    pub const ALL: [PropertyField; 14] = [
        Self::Title,
        Self::Description,
        Self::PricePerNight,
        Self::City,
        Self::Country,
        Self::PropertyType,
        Self::MaxGuests,
        Self::Bedrooms,
        Self::Beds,
        Self::Baths,
        Self::Images,
        Self::Amenities,
        Self::Policies,
        Self::Neighborhood,
    ];

    /// Fields the create view initializes and checks for completeness.
    pub const REQUIRED: [PropertyField; 11] = [
        Self::Title,
        Self::Description,
        Self::PricePerNight,
        Self::City,
        Self::Country,
        Self::PropertyType,
        Self::MaxGuests,
        Self::Bedrooms,
        Self::Beds,
        Self::Baths,
        Self::Images,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::PricePerNight => "price_per_night",
            Self::City => "city",
            Self::Country => "country",
            Self::PropertyType => "property_type",
            Self::MaxGuests => "max_guests",
            Self::Bedrooms => "bedrooms",
            Self::Beds => "beds",
            Self::Baths => "baths",
            Self::Images => "images",
            Self::Amenities => "amenities",
            Self::Policies => "policies",
            Self::Neighborhood => "neighborhood",
        }
    }

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::PricePerNight
                | Self::MaxGuests
                | Self::Bedrooms
                | Self::Beds
                | Self::Baths
        )
    }

    /// Name of the multipart part carrying this field. Images are a
    /// repeated part.
    pub fn form_name(&self) -> String {
        match self {
            Self::Images => "property[images][]".to_string(),
            _ => format!("property[{}]", self.as_str()),
        }
    }
}

impl fmt::Display for PropertyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not an editable property field")]
pub struct UnknownField(pub String);

impl FromStr for PropertyField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// The set of fields touched since the draft was loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangedFields(BTreeSet<PropertyField>);

impl ChangedFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, field: PropertyField) {
        self.0.insert(field);
    }

    /// Mark a field by its input name. Names that are not editable fields
    /// (including `id` and `user`) are ignored. Returns whether the name was
    /// recognized.
    pub fn mark_name(&mut self, name: &str) -> bool {
        match name.parse::<PropertyField>() {
            Ok(field) => {
                self.mark(field);
                true
            }
            Err(_) => false,
        }
    }

    pub fn contains(&self, field: PropertyField) -> bool {
        self.0.contains(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = PropertyField> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<PropertyField> for ChangedFields {
    fn from_iter<I: IntoIterator<Item = PropertyField>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A file chosen in the image input, read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File(ImageUpload),
}

/// One part of a multipart property submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub value: FormValue,
}

impl FormPart {
    fn text(field: PropertyField, value: impl Into<String>) -> Self {
        Self {
            name: field.form_name(),
            value: FormValue::Text(value.into()),
        }
    }

    fn file(upload: &ImageUpload) -> Self {
        Self {
            name: PropertyField::Images.form_name(),
            value: FormValue::File(upload.clone()),
        }
    }

    /// The text value, if this is not a file part.
    pub fn text_value(&self) -> Option<&str> {
        match &self.value {
            FormValue::Text(text) => Some(text),
            FormValue::File(_) => None,
        }
    }
}

/// Typed values for every editable field of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDraft {
    pub title: String,
    pub description: String,
    pub price_per_night: Decimal,
    pub city: String,
    pub country: String,
    pub property_type: String,
    pub max_guests: u32,
    pub bedrooms: u32,
    pub beds: u32,
    pub baths: u32,
    pub images: Vec<ImageUpload>,
    pub amenities: String,
    pub policies: String,
    pub neighborhood: String,
}

impl Default for PropertyDraft {
    /// Create-mode defaults: numbers start at one, text and images empty.
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            price_per_night: Decimal::ONE,
            city: String::new(),
            country: String::new(),
            property_type: String::new(),
            max_guests: 1,
            bedrooms: 1,
            beds: 1,
            baths: 1,
            images: Vec::new(),
            amenities: String::new(),
            policies: String::new(),
            neighborhood: String::new(),
        }
    }
}

impl From<&Property> for PropertyDraft {
    /// Seed an edit draft. Existing images stay on the server; the draft only
    /// carries replacement uploads.
    fn from(property: &Property) -> Self {
        Self {
            title: property.title.clone(),
            description: property.description.clone(),
            price_per_night: property.price_per_night,
            city: property.city.clone(),
            country: property.country.clone(),
            property_type: property.property_type.clone(),
            max_guests: property.max_guests,
            bedrooms: property.bedrooms,
            beds: property.beds,
            baths: property.baths,
            images: Vec::new(),
            amenities: property.amenities.clone().unwrap_or_default(),
            policies: property.policies.clone().unwrap_or_default(),
            neighborhood: property.neighborhood.clone().unwrap_or_default(),
        }
    }
}

impl PropertyDraft {
    /// Store a raw input value. Numeric inputs that fail to parse become
    /// zero, which leaves the draft incomplete.
    pub fn set_text(&mut self, field: PropertyField, raw: &str) {
        let count = || raw.trim().parse::<u32>().unwrap_or(0);
        match field {
            PropertyField::Title => self.title = raw.to_string(),
            PropertyField::Description => self.description = raw.to_string(),
            PropertyField::PricePerNight => {
                self.price_per_night =
                    raw.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO)
            }
            PropertyField::City => self.city = raw.to_string(),
            PropertyField::Country => self.country = raw.to_string(),
            PropertyField::PropertyType => {
                self.property_type = raw.to_string()
            }
            PropertyField::MaxGuests => self.max_guests = count(),
            PropertyField::Bedrooms => self.bedrooms = count(),
            PropertyField::Beds => self.beds = count(),
            PropertyField::Baths => self.baths = count(),
            // Image selections replace `images` directly.
            PropertyField::Images => {}
            PropertyField::Amenities => self.amenities = raw.to_string(),
            PropertyField::Policies => self.policies = raw.to_string(),
            PropertyField::Neighborhood => {
                self.neighborhood = raw.to_string()
            }
        }
    }

    /// The value of a scalar field as it is submitted. `None` for images.
    pub fn text_value(&self, field: PropertyField) -> Option<String> {
        let value = match field {
            PropertyField::Title => self.title.clone(),
            PropertyField::Description => self.description.clone(),
            PropertyField::PricePerNight => {
                self.price_per_night.normalize().to_string()
            }
            PropertyField::City => self.city.clone(),
            PropertyField::Country => self.country.clone(),
            PropertyField::PropertyType => self.property_type.clone(),
            PropertyField::MaxGuests => self.max_guests.to_string(),
            PropertyField::Bedrooms => self.bedrooms.to_string(),
            PropertyField::Beds => self.beds.to_string(),
            PropertyField::Baths => self.baths.to_string(),
            PropertyField::Images => return None,
            PropertyField::Amenities => self.amenities.clone(),
            PropertyField::Policies => self.policies.clone(),
            PropertyField::Neighborhood => self.neighborhood.clone(),
        };
        Some(value)
    }

    /// Whether a single field holds a usable value: non-empty text, a
    /// non-zero number, or at least one image.
    pub fn is_filled(&self, field: PropertyField) -> bool {
        match field {
            PropertyField::PricePerNight => !self.price_per_night.is_zero(),
            PropertyField::MaxGuests => self.max_guests != 0,
            PropertyField::Bedrooms => self.bedrooms != 0,
            PropertyField::Beds => self.beds != 0,
            PropertyField::Baths => self.baths != 0,
            PropertyField::Images => !self.images.is_empty(),
            _ => self
                .text_value(field)
                .is_some_and(|value| !value.is_empty()),
        }
    }

    /// True only when every required field is filled. A listing with a
    /// legitimate zero (e.g. no bathrooms) reports incomplete.
    pub fn is_complete(&self) -> bool {
        PropertyField::REQUIRED
            .iter()
            .all(|field| self.is_filled(*field))
    }

    /// Parts for a create request: every required field, optional details
    /// only when filled, one part per image.
    pub fn create_parts(&self) -> Vec<FormPart> {
        PropertyField::ALL
            .into_iter()
            .filter(|field| field.is_required() || self.is_filled(*field))
            .flat_map(|field| self.parts_for(field))
            .collect()
    }

    /// Parts for an update request: exactly the changed fields.
    pub fn changed_parts(&self, changed: &ChangedFields) -> Vec<FormPart> {
        changed
            .iter()
            .flat_map(|field| self.parts_for(field))
            .collect()
    }

    fn parts_for(&self, field: PropertyField) -> Vec<FormPart> {
        match field {
            PropertyField::Images => {
                self.images.iter().map(FormPart::file).collect()
            }
            _ => self
                .text_value(field)
                .map(|value| FormPart::text(field, value))
                .into_iter()
                .collect(),
        }
    }
}

/// A change coming from the property form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftInput {
    Text {
        field: PropertyField,
        value: String,
    },
    Images {
        uploads: Vec<ImageUpload>,
        /// Local object URL of the first selected file.
        preview: Option<String>,
    },
}

impl DraftInput {
    pub fn field(&self) -> PropertyField {
        match self {
            Self::Text { field, .. } => *field,
            Self::Images { .. } => PropertyField::Images,
        }
    }
}

/// Form state shared by the create and edit views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    pub property: PropertyDraft,
    pub changed: ChangedFields,
    pub preview_image: Option<String>,
    /// Numeric inputs exactly as typed, so a cleared or half-typed number is
    /// shown as entered instead of its parsed value.
    typed: BTreeMap<PropertyField, String>,
}

impl FormDraft {
    /// A fresh create-mode draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// An edit-mode draft seeded from a fetched listing, with nothing
    /// marked as changed.
    pub fn for_property(property: &Property) -> Self {
        Self {
            property: PropertyDraft::from(property),
            changed: ChangedFields::new(),
            preview_image: None,
            typed: BTreeMap::new(),
        }
    }

    /// Apply a form change and mark its field.
    pub fn apply(&mut self, input: DraftInput) {
        self.changed.mark(input.field());
        match input {
            DraftInput::Text { field, value } => {
                self.property.set_text(field, &value);
                if field.is_numeric() {
                    self.typed.insert(field, value);
                }
            }
            DraftInput::Images { uploads, preview } => {
                self.property.images = uploads;
                self.preview_image = preview;
            }
        }
    }

    /// What the form input shows: typed text for numbers that were edited,
    /// otherwise the draft's value.
    pub fn display_value(&self, field: PropertyField) -> Option<String> {
        self.typed
            .get(&field)
            .cloned()
            .or_else(|| self.property.text_value(field))
    }

    pub fn is_complete(&self) -> bool {
        self.property.is_complete()
    }

    pub fn create_parts(&self) -> Vec<FormPart> {
        self.property.create_parts()
    }

    pub fn update_parts(&self) -> Vec<FormPart> {
        self.property.changed_parts(&self.changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::property_with_images;
    use rust_decimal::dec;

    fn upload(name: &str) -> ImageUpload {
        ImageUpload {
            file_name: name.to_string(),
            content_type: "image/png".to_string(),
            data: vec![0x89, 0x50, 0x4e, 0x47],
        }
    }

    fn complete_draft() -> PropertyDraft {
        let mut draft = PropertyDraft::default();
        for (field, value) in [
            (PropertyField::Title, "Cabin in the woods"),
            (PropertyField::Description, "Quiet and warm"),
            (PropertyField::City, "Bergen"),
            (PropertyField::Country, "Norway"),
            (PropertyField::PropertyType, "cabin"),
        ] {
            draft.set_text(field, value);
        }
        draft.images = vec![upload("front.png")];
        draft
    }

    fn names(parts: &[FormPart]) -> Vec<&str> {
        parts.iter().map(|part| part.name.as_str()).collect()
    }

    #[test]
    fn field_names_round_trip_except_identity_fields() {
        for field in PropertyField::ALL {
            assert_eq!(field.as_str().parse::<PropertyField>(), Ok(field));
        }
        assert!("id".parse::<PropertyField>().is_err());
        assert!("user".parse::<PropertyField>().is_err());
    }

    #[test]
    fn create_defaults() {
        let draft = PropertyDraft::default();
        assert_eq!(draft.price_per_night, Decimal::ONE);
        assert_eq!(
            (draft.max_guests, draft.bedrooms, draft.beds, draft.baths),
            (1, 1, 1, 1)
        );
        assert!(draft.title.is_empty());
        assert!(draft.images.is_empty());
        assert!(!draft.is_complete());
    }

    #[test]
    fn completeness_requires_every_required_field() {
        let draft = complete_draft();
        assert!(draft.is_complete());

        for field in PropertyField::REQUIRED {
            let mut missing = draft.clone();
            match field {
                PropertyField::Images => missing.images.clear(),
                _ => missing.set_text(field, ""),
            }
            assert!(!missing.is_complete(), "{field} should be required");
        }
    }

    #[test]
    fn zero_baths_reports_incomplete() {
        let mut draft = complete_draft();
        draft.set_text(PropertyField::Baths, "0");
        assert_eq!(draft.baths, 0);
        assert!(!draft.is_complete());
    }

    #[test]
    fn unparsable_numbers_become_zero() {
        let mut draft = complete_draft();
        draft.set_text(PropertyField::PricePerNight, "cheap");
        assert!(draft.price_per_night.is_zero());
        assert!(!draft.is_complete());

        draft.set_text(PropertyField::PricePerNight, " 95.50 ");
        assert_eq!(draft.price_per_night, dec!(95.50));
        assert!(draft.is_complete());
    }

    #[test]
    fn optional_details_do_not_affect_completeness() {
        let mut draft = complete_draft();
        draft.set_text(PropertyField::Neighborhood, "");
        draft.set_text(PropertyField::Amenities, "");
        assert!(draft.is_complete());
    }

    #[test]
    fn create_price_is_submitted_number_parsed() {
        let mut form = FormDraft::new();
        form.property = complete_draft();
        form.apply(DraftInput::Text {
            field: PropertyField::PricePerNight,
            value: "120".to_string(),
        });

        let parts = form.create_parts();
        let price = parts
            .iter()
            .find(|part| part.name == "property[price_per_night]")
            .and_then(FormPart::text_value);
        assert_eq!(price, Some("120"));

        form.apply(DraftInput::Text {
            field: PropertyField::PricePerNight,
            value: "120.00".to_string(),
        });
        let parts = form.create_parts();
        let price = parts
            .iter()
            .find(|part| part.name == "property[price_per_night]")
            .and_then(FormPart::text_value);
        assert_eq!(price, Some("120"));
    }

    #[test]
    fn cleared_number_stays_blank_but_counts_as_missing() {
        let mut form = FormDraft::new();
        form.property = complete_draft();
        form.apply(DraftInput::Text {
            field: PropertyField::Baths,
            value: String::new(),
        });

        assert_eq!(form.display_value(PropertyField::Baths).as_deref(), Some(""));
        assert!(!form.is_complete());
        let baths = form
            .create_parts()
            .into_iter()
            .find(|part| part.name == "property[baths]");
        assert_eq!(baths.as_ref().and_then(FormPart::text_value), Some("0"));

        form.apply(DraftInput::Text {
            field: PropertyField::PricePerNight,
            value: "12.".to_string(),
        });
        assert_eq!(
            form.display_value(PropertyField::PricePerNight).as_deref(),
            Some("12.")
        );
        assert_eq!(
            form.display_value(PropertyField::Bedrooms).as_deref(),
            Some("1")
        );
    }

    #[test]
    fn create_submits_full_draft_with_repeated_images() {
        let mut draft = complete_draft();
        draft.images.push(upload("back.png"));
        draft.set_text(PropertyField::Neighborhood, "Bryggen");

        let parts = draft.create_parts();
        assert_eq!(
            names(&parts),
            vec![
                "property[title]",
                "property[description]",
                "property[price_per_night]",
                "property[city]",
                "property[country]",
                "property[property_type]",
                "property[max_guests]",
                "property[bedrooms]",
                "property[beds]",
                "property[baths]",
                "property[images][]",
                "property[images][]",
                "property[neighborhood]",
            ]
        );
        assert!(matches!(
            &parts[10].value,
            FormValue::File(file) if file.file_name == "front.png"
        ));
    }

    #[test]
    fn update_contains_exactly_changed_fields() {
        let property = property_with_images(&["/a.jpg"]);
        let mut form = FormDraft::for_property(&property);
        assert!(form.update_parts().is_empty());

        for value in ["N", "Ne", "New title"] {
            form.apply(DraftInput::Text {
                field: PropertyField::Title,
                value: value.to_string(),
            });
        }
        form.apply(DraftInput::Text {
            field: PropertyField::Baths,
            value: "2".to_string(),
        });
        assert!(!form.changed.mark_name("id"));
        assert!(!form.changed.mark_name("user"));

        let parts = form.update_parts();
        assert_eq!(names(&parts), vec!["property[title]", "property[baths]"]);
        assert_eq!(parts[0].text_value(), Some("New title"));
        assert_eq!(parts[1].text_value(), Some("2"));
    }

    #[test]
    fn image_change_sends_each_upload_and_sets_preview() {
        let property = property_with_images(&[]);
        let mut form = FormDraft::for_property(&property);
        form.apply(DraftInput::Images {
            uploads: vec![upload("one.png"), upload("two.png")],
            preview: Some("blob:preview".to_string()),
        });

        assert_eq!(form.preview_image.as_deref(), Some("blob:preview"));
        assert!(form.changed.contains(PropertyField::Images));
        assert_eq!(
            names(&form.update_parts()),
            vec!["property[images][]", "property[images][]"]
        );
    }

    #[test]
    fn edit_draft_is_seeded_from_property() {
        let mut property = property_with_images(&["/a.jpg"]);
        property.neighborhood = Some("Alfama".to_string());
        let form = FormDraft::for_property(&property);

        assert_eq!(form.property.title, property.title);
        assert_eq!(form.property.price_per_night, dec!(120));
        assert_eq!(form.property.neighborhood, "Alfama");
        assert!(form.property.images.is_empty());
        assert!(form.changed.is_empty());
    }
}
