use actix_identity::Identity;
use actix_web::{HttpResponse, get, post, web};
use payloads::BookingId;
use payloads::requests::CreateBooking;
use payloads::responses::BookingEnvelope;

use crate::store::{self, Store};

use super::{APIError, get_username};

#[tracing::instrument(
    skip(user, store),
    fields(username=tracing::field::Empty),
    ret
)]
#[post("/bookings")]
pub async fn create_booking(
    user: Option<Identity>,
    details: web::Json<CreateBooking>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let username = get_username(user)?;
    let booking =
        store::booking::create_booking(&username, &details.booking, &store)?;
    Ok(HttpResponse::Ok().json(BookingEnvelope { booking }))
}

#[tracing::instrument(
    skip(user, store),
    fields(username=tracing::field::Empty),
    ret
)]
#[get("/bookings/{booking_id}")]
pub async fn get_booking(
    user: Option<Identity>,
    booking_id: web::Path<BookingId>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let username = get_username(user)?;
    let booking = store::booking::get_booking(&booking_id, &username, &store)?;
    Ok(HttpResponse::Ok().json(BookingEnvelope { booking }))
}
