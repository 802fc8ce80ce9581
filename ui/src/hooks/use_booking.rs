use payloads::{Booking, BookingId};
use yew::prelude::*;

use super::{FetchHookReturn, use_fetch};
use crate::get_api_client;

#[hook]
pub fn use_booking(booking_id: BookingId) -> FetchHookReturn<Booking> {
    use_fetch("Failed to load booking", booking_id, move || async move {
        get_api_client().get_booking(&booking_id).await
    })
}
