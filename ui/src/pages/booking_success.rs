use payloads::BookingId;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::components::LoginPrompt;
use crate::hooks::{FetchState, use_authentication, use_booking, use_title};

#[derive(Properties, PartialEq)]
pub struct Props {
    pub booking_id: BookingId,
}

#[function_component]
pub fn BookingSuccessPage(props: &Props) -> Html {
    use_title("Booking confirmed");
    let authenticated = use_authentication();
    let booking_hook = use_booking(props.booking_id);

    if let FetchState::Fetched(status) = &authenticated
        && status.username().is_none()
    {
        return html! { <LoginPrompt action="to see your booking" /> };
    }

    booking_hook.render("booking", |booking| {
        let property = &booking.property;
        html! {
            <div class="max-w-3xl mx-auto space-y-6">
                <h1 class="text-3xl font-bold">
                    {format!("Thank You {}!", booking.user.username)}
                </h1>
                <p class="text-neutral-600 dark:text-neutral-400">
                    {"Your trip to "}
                    <Link<Route>
                        to={Route::PropertyDetail { id: property.property_id }}
                        classes="font-medium underline"
                    >
                        {&property.title}
                    </Link<Route>>
                    {" is booked."}
                </p>

                <img
                    src={property.image_url()}
                    alt={property.title.clone()}
                    class="w-full h-72 object-cover rounded-lg"
                />

                <dl class="grid grid-cols-1 sm:grid-cols-2 gap-4">
                    <div>
                        <dt class="text-sm text-neutral-500">{"Location"}</dt>
                        <dd>{property.location()}</dd>
                    </div>
                    <div>
                        <dt class="text-sm text-neutral-500">{"Host"}</dt>
                        <dd>{&property.username}</dd>
                    </div>
                    <div>
                        <dt class="text-sm text-neutral-500">{"Check-in"}</dt>
                        <dd>{booking.start_date.to_string()}</dd>
                    </div>
                    <div>
                        <dt class="text-sm text-neutral-500">{"Check-out"}</dt>
                        <dd>{booking.end_date.to_string()}</dd>
                    </div>
                </dl>

                <p class="text-lg">
                    <span class="font-semibold">
                        {format!("Total Cost: {}", booking.total_cost_display())}
                    </span>
                    {" "}
                    <span class="text-neutral-500">{property.rate_annotation()}</span>
                </p>

                <p class="text-neutral-700 dark:text-neutral-300">
                    {format!(
                        "{} bedrooms · {} beds · {} baths",
                        property.bedrooms, property.beds, property.baths,
                    )}
                </p>
            </div>
        }
    })
}
