use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[function_component]
pub fn Header() -> Html {
    html! {
        <header class="bg-white dark:bg-neutral-800 border-b border-neutral-200 dark:border-neutral-700">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <Link<Route> to={Route::Home} classes="text-xl font-semibold text-rose-600">
                        {"Staybook"}
                    </Link<Route>>
                    <Link<Route> to={Route::PropertyCreate} classes="text-sm font-medium text-neutral-700 dark:text-neutral-300 hover:underline">
                        {"Host a property"}
                    </Link<Route>>
                </div>
            </div>
        </header>
    }
}
