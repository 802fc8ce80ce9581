use payloads::requests::NewBooking;
use payloads::{BookedProperty, Booking, Charge, PropertyImage, UserRef};

use super::*;

/// Book a stay and record a single charge of nights times the nightly rate.
pub fn create_booking(
    guest: &str,
    details: &NewBooking,
    store: &Store,
) -> Result<Booking, StoreError> {
    let mut inner = store.inner.lock();
    let price_per_night =
        inner.property(&details.property_id)?.details.price_per_night;
    if details.nights().is_none() {
        return Err(StoreError::InvalidDateRange);
    }
    let total = details
        .total_price(price_per_night)
        .ok_or(StoreError::TotalTooLarge)?;

    let booking_id = inner.next_booking_id();
    let record = BookingRecord {
        property_id: details.property_id,
        guest: guest.to_string(),
        start_date: details.start_date,
        end_date: details.end_date,
        charges: vec![total],
    };
    let booking = to_payload(booking_id, &record, &inner, store)?;
    inner.bookings.insert(booking_id, record);
    Ok(booking)
}

/// Read back a booking. Only the guest who made it may see it.
pub fn get_booking(
    booking_id: &BookingId,
    actor: &str,
    store: &Store,
) -> Result<Booking, StoreError> {
    let inner = store.inner.lock();
    let record = inner
        .bookings
        .get(booking_id)
        .ok_or(StoreError::BookingNotFound)?;
    if record.guest != actor {
        return Err(StoreError::NotGuest);
    }
    to_payload(*booking_id, record, &inner, store)
}

fn to_payload(
    booking_id: BookingId,
    record: &BookingRecord,
    inner: &Inner,
    store: &Store,
) -> Result<Booking, StoreError> {
    let property = inner.property(&record.property_id)?;
    Ok(Booking {
        id: booking_id,
        start_date: record.start_date,
        end_date: record.end_date,
        property: BookedProperty {
            property_id: record.property_id,
            title: property.details.title.clone(),
            city: property.details.city.clone(),
            country: property.details.country.clone(),
            username: property.owner.clone(),
            price_per_night: property.details.price_per_night,
            bedrooms: property.details.bedrooms,
            beds: property.details.beds,
            baths: property.details.baths,
            images: property
                .image_ids
                .iter()
                .map(|image_id| PropertyImage {
                    url: store.image_url(image_id),
                })
                .collect(),
        },
        user: UserRef {
            username: record.guest.clone(),
        },
        charges: record
            .charges
            .iter()
            .map(|amount| Charge { amount: *amount })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::property::{
        PropertyParams, create_property, delete_property,
    };
    use jiff::civil::date;
    use rust_decimal::dec;

    fn listed(store: &Store) -> anyhow::Result<PropertyId> {
        let values = [
            (PropertyField::Title, "Dune house"),
            (PropertyField::Description, "Steps from the beach"),
            (PropertyField::PricePerNight, "150"),
            (PropertyField::City, "Skagen"),
            (PropertyField::Country, "Denmark"),
            (PropertyField::PropertyType, "house"),
            (PropertyField::MaxGuests, "6"),
            (PropertyField::Bedrooms, "3"),
            (PropertyField::Beds, "4"),
            (PropertyField::Baths, "2"),
        ]
        .into_iter()
        .map(|(field, value)| (field, value.to_string()))
        .collect();
        let params = PropertyParams {
            values,
            images: Vec::new(),
        };
        Ok(create_property("alice", params, store)?.id)
    }

    #[test]
    fn booking_records_one_charge_for_the_stay() -> anyhow::Result<()> {
        let store = Store::new();
        let property_id = listed(&store)?;
        let stay = NewBooking {
            property_id,
            start_date: date(2025, 7, 1),
            end_date: date(2025, 7, 4),
        };

        let booking = create_booking("bob", &stay, &store)?;
        assert_eq!(booking.id, BookingId(1));
        assert_eq!(booking.user.username, "bob");
        assert_eq!(booking.property.username, "alice");
        assert_eq!(booking.charges, vec![Charge { amount: dec!(450) }]);
        assert_eq!(booking.total_cost_display(), "$450.00");

        assert_eq!(get_booking(&booking.id, "bob", &store)?, booking);
        Ok(())
    }

    #[test]
    fn bookings_are_private_to_the_guest() -> anyhow::Result<()> {
        let store = Store::new();
        let property_id = listed(&store)?;
        let stay = NewBooking {
            property_id,
            start_date: date(2025, 7, 1),
            end_date: date(2025, 7, 2),
        };
        let booking = create_booking("bob", &stay, &store)?;

        assert!(matches!(
            get_booking(&booking.id, "alice", &store),
            Err(StoreError::NotGuest)
        ));
        assert!(matches!(
            get_booking(&BookingId(99), "bob", &store),
            Err(StoreError::BookingNotFound)
        ));
        Ok(())
    }

    #[test]
    fn rejects_empty_stays_and_unknown_listings() -> anyhow::Result<()> {
        let store = Store::new();
        let property_id = listed(&store)?;
        let same_day = NewBooking {
            property_id,
            start_date: date(2025, 7, 1),
            end_date: date(2025, 7, 1),
        };
        assert!(matches!(
            create_booking("bob", &same_day, &store),
            Err(StoreError::InvalidDateRange)
        ));

        let unknown = NewBooking {
            property_id: PropertyId(42),
            ..same_day
        };
        assert!(matches!(
            create_booking("bob", &unknown, &store),
            Err(StoreError::PropertyNotFound)
        ));
        Ok(())
    }

    #[test]
    fn overflowing_total_is_rejected_and_store_stays_usable()
    -> anyhow::Result<()> {
        let store = Store::new();
        let property_id = listed(&store)?;
        // Bypass the cap that property forms enforce.
        if let Some(record) = store.inner.lock().properties.get_mut(&property_id)
        {
            record.details.price_per_night = Decimal::MAX;
        }
        let stay = NewBooking {
            property_id,
            start_date: date(2025, 1, 1),
            end_date: date(2025, 1, 3),
        };
        assert!(matches!(
            create_booking("bob", &stay, &store),
            Err(StoreError::TotalTooLarge)
        ));

        assert!(store.inner.lock().bookings.is_empty());
        Ok(())
    }

    #[test]
    fn deleting_a_listing_removes_its_bookings() -> anyhow::Result<()> {
        let store = Store::new();
        let property_id = listed(&store)?;
        let stay = NewBooking {
            property_id,
            start_date: date(2025, 7, 1),
            end_date: date(2025, 7, 3),
        };
        let booking = create_booking("bob", &stay, &store)?;

        delete_property(&property_id, "alice", &store)?;
        assert!(matches!(
            get_booking(&booking.id, "bob", &store),
            Err(StoreError::BookingNotFound)
        ));
        Ok(())
    }
}
