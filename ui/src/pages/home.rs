use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::hooks::use_title;

#[function_component]
pub fn HomePage() -> Html {
    use_title("Staybook");
    html! {
        <div class="text-center py-16 space-y-6">
            <h1 class="text-4xl font-bold">{"Find a place to stay"}</h1>
            <p class="text-neutral-600 dark:text-neutral-400">
                {"Have a spare room or a whole home? List it in a few minutes."}
            </p>
            <Link<Route>
                to={Route::PropertyCreate}
                classes="inline-block px-6 py-3 rounded-md text-white bg-rose-600 hover:bg-rose-700"
            >
                {"Host a property"}
            </Link<Route>>
        </div>
    }
}
