use payloads::{APIClient, BookingId, PropertyId};
use yew::prelude::*;
use yew_router::prelude::*;

mod components;
mod hooks;
mod logs;
mod pages;
mod state;

pub use state::{State, report_error};

use components::layout::MainLayout;
use pages::{
    BookingSuccessPage, HomePage, LoginPage, NotFoundPage, PropertyCreatePage,
    PropertyDetailPage,
};

// Global API client - configurable via environment or same-origin fallback
pub fn get_api_client() -> APIClient {
    // Try environment variable first (set at build time)
    let address = option_env!("BACKEND_URL")
        .map(|url| url.to_string())
        .or_else(|| {
            web_sys::window().and_then(|window| window.location().origin().ok())
        })
        .unwrap_or_default();

    APIClient {
        address,
        inner_client: reqwest::Client::new(),
    }
}

#[function_component]
pub fn App() -> Html {
    use_memo((), |_| logs::init_logging());
    html! {
        <BrowserRouter>
            <MainLayout>
                <Switch<Route> render={switch} />
            </MainLayout>
        </BrowserRouter>
    }
}

#[derive(Clone, Debug, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/property/new")]
    PropertyCreate,
    #[at("/property/:id")]
    PropertyDetail { id: PropertyId },
    #[at("/booking/:id/success")]
    BookingSuccess { id: BookingId },
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <HomePage /> },
        Route::Login => html! { <LoginPage /> },
        Route::PropertyCreate => html! { <PropertyCreatePage /> },
        Route::PropertyDetail { id } => {
            html! { <PropertyDetailPage property_id={id} /> }
        }
        Route::BookingSuccess { id } => {
            html! { <BookingSuccessPage booking_id={id} /> }
        }
        Route::NotFound => html! { <NotFoundPage /> },
    }
}
