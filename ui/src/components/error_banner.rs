use yew::prelude::*;
use yewdux::prelude::*;

use crate::State;

/// Shows the last reported request failure until dismissed.
#[function_component]
pub fn ErrorBanner() -> Html {
    let (state, dispatch) = use_store::<State>();

    let Some(message) = state.error_message.clone() else {
        return html! {};
    };

    let on_dismiss = dispatch.reduce_mut_callback(|state| state.clear_error());

    html! {
        <div
            role="alert"
            class="mb-6 p-4 rounded-md bg-red-50 dark:bg-red-900/20 border
                   border-red-200 dark:border-red-800 flex justify-between
                   items-start gap-4"
        >
            <p class="text-sm text-red-700 dark:text-red-400">{message}</p>
            <button
                onclick={on_dismiss}
                class="text-sm font-medium text-red-700 dark:text-red-400
                       hover:underline"
            >
                {"Dismiss"}
            </button>
        </div>
    }
}
