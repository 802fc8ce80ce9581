use crate::Route;
use yew::prelude::*;
use yew_router::prelude::*;

/// Navigate to a route and scroll to the top, without reloading the page.
///
/// Views use this after a create or delete instead of `location.href`.
#[hook]
pub fn use_push_route() -> Callback<Route> {
    let navigator = use_navigator();
    Callback::from(move |route: Route| {
        let Some(navigator) = &navigator else {
            tracing::error!("No router available to navigate to {route:?}");
            return;
        };
        navigator.push(&route);
        if let Some(window) = web_sys::window() {
            window.scroll_to_with_x_and_y(0.0, 0.0);
        }
    })
}
