use jiff::civil::date;
use payloads::requests::NewBooking;
use payloads::{BookingId, PropertyId};
use reqwest::StatusCode;
use rust_decimal::dec;
use test_helpers::{assert_status_code, spawn_app, stay_a};

#[tokio::test]
async fn guest_books_and_views_confirmation() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_and_bob().await?;
    let property = app.create_test_property().await?;

    app.login_bob().await?;
    let booking = app.create_test_booking(property.id).await?;
    assert_eq!(booking.user.username, "bob");
    assert_eq!(booking.property.property_id, property.id);
    assert_eq!(booking.property.username, "alice");
    assert_eq!(booking.total_cost(), Some(dec!(240)));
    assert_eq!(booking.total_cost_display(), "$240.00");
    assert_eq!(booking.property.rate_annotation(), "($120/day)");
    assert_eq!(booking.property.image_url(), property.images[0].url);

    let fetched = app.client.get_booking(&booking.id).await?;
    assert_eq!(fetched, booking);

    Ok(())
}

#[tokio::test]
async fn booking_is_private_to_its_guest() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_and_bob().await?;
    let property = app.create_test_property().await?;
    app.login_bob().await?;
    let booking = app.create_test_booking(property.id).await?;

    app.login_alice().await?;
    assert_status_code(
        app.client.get_booking(&booking.id).await,
        StatusCode::FORBIDDEN,
    );

    app.client.logout().await?;
    assert_status_code(
        app.client.get_booking(&booking.id).await,
        StatusCode::UNAUTHORIZED,
    );

    app.login_bob().await?;
    assert_status_code(
        app.client.get_booking(&BookingId(999)).await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}

#[tokio::test]
async fn invalid_bookings_are_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_alice_and_bob().await?;
    let property = app.create_test_property().await?;

    let backwards = NewBooking {
        property_id: property.id,
        start_date: date(2025, 6, 3),
        end_date: date(2025, 6, 1),
    };
    assert_status_code(
        app.client.create_booking(&backwards).await,
        StatusCode::BAD_REQUEST,
    );
    assert_status_code(
        app.client.create_booking(&stay_a(PropertyId(404))).await,
        StatusCode::NOT_FOUND,
    );

    app.client.logout().await?;
    assert_status_code(
        app.client.create_booking(&stay_a(property.id)).await,
        StatusCode::UNAUTHORIZED,
    );

    Ok(())
}
