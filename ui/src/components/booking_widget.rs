use jiff::civil::Date;
use payloads::PropertyId;
use payloads::requests::NewBooking;
use rust_decimal::Decimal;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::components::LoginPrompt;
use crate::hooks::use_push_route;
use crate::{Route, State, get_api_client, report_error};

#[derive(Properties, PartialEq)]
pub struct BookingWidgetProps {
    pub property_id: PropertyId,
    pub price_per_night: Decimal,
    pub logged_in: bool,
}

/// Pick a date range, see the total, and book the stay.
#[function_component]
pub fn BookingWidget(props: &BookingWidgetProps) -> Html {
    let (_, dispatch) = use_store::<State>();
    let push_route = use_push_route();
    let start_date = use_state(|| None::<Date>);
    let end_date = use_state(|| None::<Date>);
    let is_submitting = use_state(|| false);

    let booking = match (*start_date, *end_date) {
        (Some(start_date), Some(end_date)) => Some(NewBooking {
            property_id: props.property_id,
            start_date,
            end_date,
        }),
        _ => None,
    };
    let nights = booking.as_ref().and_then(NewBooking::nights);
    let total = booking
        .as_ref()
        .and_then(|booking| booking.total_price(props.price_per_night));

    let date_input = |state: UseStateHandle<Option<Date>>| {
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            // An empty or partially typed date clears the selection.
            state.set(input.value().parse::<Date>().ok());
        })
    };
    let on_start_change = date_input(start_date.clone());
    let on_end_change = date_input(end_date.clone());

    let on_book = {
        let booking = booking.clone();
        let is_submitting = is_submitting.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(booking) = booking.clone() else {
                return;
            };
            if booking.nights().is_none() || *is_submitting {
                return;
            }
            let is_submitting = is_submitting.clone();
            let push_route = push_route.clone();
            let dispatch = dispatch.clone();

            is_submitting.set(true);
            yew::platform::spawn_local(async move {
                match get_api_client().create_booking(&booking).await {
                    Ok(booking) => {
                        tracing::info!("Created booking {}", booking.id);
                        push_route
                            .emit(Route::BookingSuccess { id: booking.id });
                    }
                    Err(e) => {
                        report_error(&dispatch, "Failed to book", &e);
                        is_submitting.set(false);
                    }
                }
            });
        })
    };

    let input_class = "w-full px-3 py-2 border border-neutral-300 \
                       dark:border-neutral-600 rounded-md bg-white \
                       dark:bg-neutral-700 text-neutral-900 \
                       dark:text-neutral-100";

    html! {
        <div class="p-6 rounded-lg border border-neutral-200
                    dark:border-neutral-700 shadow-sm space-y-4">
            <p class="text-lg">
                <span class="font-semibold">
                    {format!("${}", props.price_per_night)}
                </span>
                {" per night"}
            </p>

            if props.logged_in {
                <div class="grid grid-cols-2 gap-3">
                    <label class="text-sm text-neutral-700 dark:text-neutral-300">
                        {"Check-in"}
                        <input
                            type="date"
                            onchange={on_start_change}
                            class={input_class}
                        />
                    </label>
                    <label class="text-sm text-neutral-700 dark:text-neutral-300">
                        {"Check-out"}
                        <input
                            type="date"
                            onchange={on_end_change}
                            class={input_class}
                        />
                    </label>
                </div>

                if let (Some(nights), Some(total)) = (nights, total) {
                    <p class="text-sm text-neutral-700 dark:text-neutral-300">
                        {format!(
                            "${} × {} {} = ${}",
                            props.price_per_night,
                            nights,
                            if nights == 1 { "night" } else { "nights" },
                            total,
                        )}
                    </p>
                } else if nights.is_some() {
                    <p class="text-sm text-red-600 dark:text-red-400">
                        {"Total price for this stay is too large"}
                    </p>
                } else if booking.is_some() {
                    <p class="text-sm text-red-600 dark:text-red-400">
                        {"Check-out must be after check-in"}
                    </p>
                }

                <button
                    onclick={on_book}
                    disabled={total.is_none() || *is_submitting}
                    class="w-full py-2 px-4 rounded-md text-sm font-medium
                           text-white bg-rose-600 hover:bg-rose-700
                           disabled:opacity-50 disabled:cursor-not-allowed"
                >
                    {if *is_submitting { "Booking..." } else { "Book" }}
                </button>
            } else {
                <LoginPrompt action="to book this property" />
            }
        </div>
    }
}
