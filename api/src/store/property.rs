use std::collections::BTreeMap;

use payloads::draft::ImageUpload;
use payloads::{Property, PropertyImage, UserRef};
use rust_decimal::dec;

use super::*;

/// Values submitted in a property form, keyed by field. Only fields that
/// appeared in the request are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyParams {
    pub values: BTreeMap<PropertyField, String>,
    pub images: Vec<ImageUpload>,
}

impl PropertyParams {
    /// Submitted fields in field order.
    pub fn fields(&self) -> Vec<PropertyField> {
        let mut fields: Vec<_> = self.values.keys().copied().collect();
        if !self.images.is_empty() {
            fields.push(PropertyField::Images);
            fields.sort();
        }
        fields
    }
}

pub fn create_property(
    owner: &str,
    params: PropertyParams,
    store: &Store,
) -> Result<Property, StoreError> {
    let mut details = PropertyDraft::default();
    apply_values(&mut details, &params.values)?;
    for field in PropertyField::REQUIRED {
        if field == PropertyField::Images {
            continue;
        }
        if !params.values.contains_key(&field) || !details.is_filled(field) {
            return Err(StoreError::InvalidField(field));
        }
    }

    let fields = params.fields();
    let mut inner = store.inner.lock();
    let property_id = inner.next_property_id();
    let image_ids = insert_images(&mut inner, params.images);
    let record = PropertyRecord {
        owner: owner.to_string(),
        details,
        image_ids,
    };
    let property = to_payload(property_id, &record, store);
    inner.properties.insert(property_id, record);
    inner.audit_log.push(AuditEntry {
        action: AuditAction::Created,
        property_id,
        username: owner.to_string(),
        fields,
    });
    Ok(property)
}

pub fn get_property(
    property_id: &PropertyId,
    store: &Store,
) -> Result<Property, StoreError> {
    let inner = store.inner.lock();
    let record = inner.property(property_id)?;
    Ok(to_payload(*property_id, record, store))
}

/// Apply a partial update. Fields absent from `params` keep their value;
/// submitted images replace the existing ones.
pub fn update_property(
    property_id: &PropertyId,
    actor: &str,
    params: PropertyParams,
    store: &Store,
) -> Result<Property, StoreError> {
    let mut inner = store.inner.lock();
    let record = inner.property(property_id)?;
    if record.owner != actor {
        return Err(StoreError::NotOwner);
    }

    let mut details = record.details.clone();
    apply_values(&mut details, &params.values)?;
    for field in params.values.keys() {
        if field.is_required() && !details.is_filled(*field) {
            return Err(StoreError::InvalidField(*field));
        }
    }

    let fields = params.fields();
    let new_image_ids = if params.images.is_empty() {
        None
    } else {
        Some(insert_images(&mut inner, params.images))
    };

    let record = inner
        .properties
        .get_mut(property_id)
        .ok_or(StoreError::PropertyNotFound)?;
    record.details = details;
    let replaced = match new_image_ids {
        Some(ids) => std::mem::replace(&mut record.image_ids, ids),
        None => Vec::new(),
    };
    let property = to_payload(*property_id, record, store);

    for image_id in replaced {
        inner.images.remove(&image_id);
    }
    inner.audit_log.push(AuditEntry {
        action: AuditAction::Updated,
        property_id: *property_id,
        username: actor.to_string(),
        fields,
    });
    Ok(property)
}

/// Remove a listing along with its images and bookings.
pub fn delete_property(
    property_id: &PropertyId,
    actor: &str,
    store: &Store,
) -> Result<(), StoreError> {
    let mut inner = store.inner.lock();
    if inner.property(property_id)?.owner != actor {
        return Err(StoreError::NotOwner);
    }
    let record = inner
        .properties
        .remove(property_id)
        .ok_or(StoreError::PropertyNotFound)?;
    for image_id in &record.image_ids {
        inner.images.remove(image_id);
    }
    inner
        .bookings
        .retain(|_, booking| booking.property_id != *property_id);
    inner.audit_log.push(AuditEntry {
        action: AuditAction::Deleted,
        property_id: *property_id,
        username: actor.to_string(),
        fields: Vec::new(),
    });
    Ok(())
}

/// Highest nightly rate a listing may ask for.
pub const MAX_PRICE_PER_NIGHT: Decimal = dec!(1_000_000);

/// Parse submitted text into the draft. Unlike the browser form, numbers
/// that fail to parse are rejected rather than stored as zero.
fn apply_values(
    details: &mut PropertyDraft,
    values: &BTreeMap<PropertyField, String>,
) -> Result<(), StoreError> {
    for (field, raw) in values {
        let numeric = match field {
            PropertyField::PricePerNight => {
                raw.trim().parse::<Decimal>().is_ok_and(|price| {
                    (price.is_sign_positive() || price.is_zero())
                        && price <= MAX_PRICE_PER_NIGHT
                })
            }
            PropertyField::MaxGuests
            | PropertyField::Bedrooms
            | PropertyField::Beds
            | PropertyField::Baths => raw.trim().parse::<u32>().is_ok(),
            _ => true,
        };
        if !numeric {
            return Err(StoreError::InvalidField(*field));
        }
        details.set_text(*field, raw);
    }
    Ok(())
}

fn insert_images(inner: &mut Inner, uploads: Vec<ImageUpload>) -> Vec<ImageId> {
    uploads
        .into_iter()
        .map(|upload| {
            let image_id = inner.next_image_id();
            inner.images.insert(
                image_id,
                StoredImage {
                    content_type: upload.content_type,
                    data: upload.data,
                },
            );
            image_id
        })
        .collect()
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

pub(crate) fn to_payload(
    property_id: PropertyId,
    record: &PropertyRecord,
    store: &Store,
) -> Property {
    let details = &record.details;
    Property {
        id: property_id,
        title: details.title.clone(),
        description: details.description.clone(),
        city: details.city.clone(),
        country: details.country.clone(),
        property_type: details.property_type.clone(),
        price_per_night: details.price_per_night,
        max_guests: details.max_guests,
        bedrooms: details.bedrooms,
        beds: details.beds,
        baths: details.baths,
        images: record
            .image_ids
            .iter()
            .map(|image_id| PropertyImage {
                url: store.image_url(image_id),
            })
            .collect(),
        user: UserRef {
            username: record.owner.clone(),
        },
        amenities: non_empty(&details.amenities),
        policies: non_empty(&details.policies),
        neighborhood: non_empty(&details.neighborhood),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    fn params(pairs: &[(PropertyField, &str)]) -> PropertyParams {
        PropertyParams {
            values: pairs
                .iter()
                .map(|(field, value)| (*field, value.to_string()))
                .collect(),
            images: Vec::new(),
        }
    }

    fn listing() -> PropertyParams {
        params(&[
            (PropertyField::Title, "Harbour flat"),
            (PropertyField::Description, "Two rooms over the water"),
            (PropertyField::PricePerNight, "88.5"),
            (PropertyField::City, "Oslo"),
            (PropertyField::Country, "Norway"),
            (PropertyField::PropertyType, "apartment"),
            (PropertyField::MaxGuests, "3"),
            (PropertyField::Bedrooms, "2"),
            (PropertyField::Beds, "2"),
            (PropertyField::Baths, "1"),
        ])
    }

    fn png(name: &str) -> ImageUpload {
        ImageUpload {
            file_name: name.to_string(),
            content_type: "image/png".to_string(),
            data: name.as_bytes().to_vec(),
        }
    }

    #[test]
    fn create_requires_every_scalar_field() {
        let store = Store::new();
        for field in PropertyField::REQUIRED {
            if field == PropertyField::Images {
                continue;
            }
            let mut partial = listing();
            partial.values.remove(&field);
            assert!(matches!(
                create_property("alice", partial, &store),
                Err(StoreError::InvalidField(missing)) if missing == field
            ));
        }
        assert!(store.audit_log().is_empty());
    }

    #[test]
    fn create_rejects_malformed_numbers() {
        let store = Store::new();
        let mut listing = listing();
        listing
            .values
            .insert(PropertyField::Bedrooms, "several".to_string());
        assert!(matches!(
            create_property("alice", listing, &store),
            Err(StoreError::InvalidField(PropertyField::Bedrooms))
        ));
    }

    #[test]
    fn create_rejects_prices_above_the_cap() -> anyhow::Result<()> {
        let store = Store::new();
        let mut listing = listing();
        listing.values.insert(
            PropertyField::PricePerNight,
            "79228162514264337593543950335".to_string(),
        );
        assert!(matches!(
            create_property("alice", listing.clone(), &store),
            Err(StoreError::InvalidField(PropertyField::PricePerNight))
        ));

        listing
            .values
            .insert(PropertyField::PricePerNight, "1000000".to_string());
        let created = create_property("alice", listing, &store)?;
        assert_eq!(created.price_per_night, MAX_PRICE_PER_NIGHT);
        Ok(())
    }

    #[test]
    fn ids_are_sequential_and_images_resolve() -> anyhow::Result<()> {
        let store = Store::new();
        store.set_public_url("http://localhost:8000");

        let first = create_property("alice", listing(), &store)?;
        let mut with_images = listing();
        with_images.images = vec![png("a.png"), png("b.png")];
        let second = create_property("alice", with_images, &store)?;

        assert_eq!(first.id, PropertyId(1));
        assert_eq!(second.id, PropertyId(2));
        assert!(first.images.is_empty());
        assert_eq!(
            second.images[1].url,
            "http://localhost:8000/api/images/2"
        );
        assert_eq!(store.image(&ImageId(2))?.data, b"b.png".to_vec());
        assert_eq!(second.price_per_night, dec!(88.5));
        assert_eq!(second.user.username, "alice");
        assert_eq!(second.neighborhood, None);
        Ok(())
    }

    #[test]
    fn update_changes_only_submitted_fields() -> anyhow::Result<()> {
        let store = Store::new();
        let created = create_property("alice", listing(), &store)?;

        let updated = update_property(
            &created.id,
            "alice",
            params(&[
                (PropertyField::Title, "Harbour loft"),
                (PropertyField::Neighborhood, "Aker Brygge"),
            ]),
            &store,
        )?;

        assert_eq!(updated.title, "Harbour loft");
        assert_eq!(updated.neighborhood.as_deref(), Some("Aker Brygge"));
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.price_per_night, created.price_per_night);

        let log = store.audit_log();
        assert_eq!(log.len(), 2);
        assert_eq!(log[1].action, AuditAction::Updated);
        assert_eq!(
            log[1].fields,
            vec![PropertyField::Title, PropertyField::Neighborhood]
        );
        Ok(())
    }

    #[test]
    fn image_update_replaces_previous_images() -> anyhow::Result<()> {
        let store = Store::new();
        let mut with_images = listing();
        with_images.images = vec![png("old.png")];
        let created = create_property("alice", with_images, &store)?;

        let replacement = PropertyParams {
            values: BTreeMap::new(),
            images: vec![png("new.png")],
        };
        let updated =
            update_property(&created.id, "alice", replacement, &store)?;

        assert_eq!(updated.images.len(), 1);
        assert!(matches!(
            store.image(&ImageId(1)),
            Err(StoreError::ImageNotFound)
        ));
        assert_eq!(store.image(&ImageId(2))?.data, b"new.png".to_vec());
        Ok(())
    }

    #[test]
    fn only_the_owner_may_change_a_listing() -> anyhow::Result<()> {
        let store = Store::new();
        let created = create_property("alice", listing(), &store)?;

        assert!(matches!(
            update_property(
                &created.id,
                "bob",
                params(&[(PropertyField::Title, "Mine now")]),
                &store,
            ),
            Err(StoreError::NotOwner)
        ));
        assert!(matches!(
            delete_property(&created.id, "bob", &store),
            Err(StoreError::NotOwner)
        ));
        assert_eq!(get_property(&created.id, &store)?.title, "Harbour flat");
        Ok(())
    }

    #[test]
    fn delete_removes_listing() -> anyhow::Result<()> {
        let store = Store::new();
        let created = create_property("alice", listing(), &store)?;
        delete_property(&created.id, "alice", &store)?;

        assert!(matches!(
            get_property(&created.id, &store),
            Err(StoreError::PropertyNotFound)
        ));
        assert!(matches!(
            delete_property(&created.id, "alice", &store),
            Err(StoreError::PropertyNotFound)
        ));
        Ok(())
    }
}
