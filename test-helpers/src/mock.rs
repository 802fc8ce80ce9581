//! Demo listings for the development server.
//!
//! Alice hosts two listings, one with uploaded images and one that falls
//! back to the placeholder image. Bob hosts a cabin and has booked Alice's
//! loft, so the booking confirmation page has something to show.

use crate::{TestApp, fill_draft, image_upload, property_draft_a};
use anyhow::Result;
use payloads::draft::DraftInput;
use payloads::{Booking, FormDraft, Property, PropertyField};

pub struct DevDataset {
    pub loft: Property,
    pub townhouse: Property,
    pub cabin: Property,
    pub bob_booking: Booking,
}

impl DevDataset {
    /// Create the accounts, listings and booking. Leaves nobody logged in.
    pub async fn create(app: &TestApp) -> Result<Self> {
        tracing::info!("👤 Creating accounts (alice, bob)");
        app.create_alice_and_bob().await?;

        tracing::info!("🏠 Creating alice's listings");
        let mut loft_draft = property_draft_a();
        loft_draft.apply(DraftInput::Images {
            uploads: vec![
                image_upload("loft-living-room.png"),
                image_upload("loft-bedroom.png"),
                image_upload("loft-balcony.png"),
            ],
            preview: None,
        });
        fill_draft(
            &mut loft_draft,
            &[
                (PropertyField::Amenities, "Wifi, washer, espresso machine"),
                (PropertyField::Policies, "No smoking. Quiet after 22:00."),
                (PropertyField::Neighborhood, "Jordaan, near the tram"),
            ],
        );
        let loft = app.client.create_property(&loft_draft).await?;
        let townhouse =
            app.client.create_property(&townhouse_draft()).await?;

        tracing::info!("🏕️ Creating bob's listing and booking");
        app.login_bob().await?;
        let cabin = app.client.create_property(&cabin_draft()).await?;
        let bob_booking = app.create_test_booking(loft.id).await?;
        app.client.logout().await?;

        Ok(Self {
            loft,
            townhouse,
            cabin,
            bob_booking,
        })
    }

    /// Print a summary of the created test data
    pub fn print_summary(&self) {
        tracing::info!("📋 Available test data:");
        tracing::info!("   🔑 alice / supersecret, bob / bobspw");
        for property in [&self.loft, &self.townhouse, &self.cabin] {
            tracing::info!(
                "   🏠 /property/{} - {} ({}), host {}, {} image(s)",
                property.id,
                property.title,
                property.location(),
                property.user.username,
                property.images.len()
            );
        }
        tracing::info!(
            "   🧾 /booking/{}/success - bob's stay at {}, total {}",
            self.bob_booking.id,
            self.bob_booking.property.title,
            self.bob_booking.total_cost_display()
        );
    }
}

/// A listing without uploads, shown with the placeholder image.
fn townhouse_draft() -> FormDraft {
    let mut draft = FormDraft::new();
    fill_draft(
        &mut draft,
        &[
            (PropertyField::Title, "Family townhouse with garden"),
            (PropertyField::Description, "Three floors, quiet street"),
            (PropertyField::PricePerNight, "210"),
            (PropertyField::City, "Utrecht"),
            (PropertyField::Country, "Netherlands"),
            (PropertyField::PropertyType, "townhouse"),
            (PropertyField::MaxGuests, "6"),
            (PropertyField::Bedrooms, "3"),
            (PropertyField::Beds, "4"),
            (PropertyField::Baths, "2"),
        ],
    );
    draft
}

fn cabin_draft() -> FormDraft {
    let mut draft = FormDraft::new();
    fill_draft(
        &mut draft,
        &[
            (PropertyField::Title, "Lakeside cabin"),
            (PropertyField::Description, "Wood stove and a private jetty"),
            (PropertyField::PricePerNight, "95.50"),
            (PropertyField::City, "Mora"),
            (PropertyField::Country, "Sweden"),
            (PropertyField::PropertyType, "cabin"),
            (PropertyField::MaxGuests, "4"),
            (PropertyField::Bedrooms, "2"),
            (PropertyField::Beds, "3"),
            (PropertyField::Baths, "1"),
        ],
    );
    draft.apply(DraftInput::Images {
        uploads: vec![image_upload("cabin.png")],
        preview: None,
    });
    draft
}
