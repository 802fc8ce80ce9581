use payloads::requests;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::hooks::{use_push_route, use_title};
use crate::{Route, State, get_api_client, report_error};

/// Where to go after logging in: the route named by the `redirect_url` query
/// parameter, else home.
fn redirect_target() -> Route {
    let search = web_sys::window()
        .and_then(|window| window.location().search().ok())
        .unwrap_or_default();
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "redirect_url")
        .and_then(|(_, path)| Route::recognize(path))
        .unwrap_or(Route::Home)
}

/// Development sign-in against the session endpoint. Navigates back to
/// `redirect_url` afterwards, whose page checks the session again on mount.
#[function_component]
pub fn LoginPage() -> Html {
    use_title("Log in");
    let (_, dispatch) = use_store::<State>();
    let push_route = use_push_route();
    let username_ref = use_node_ref();
    let password_ref = use_node_ref();
    let is_loading = use_state(|| false);

    let on_submit = {
        let username_ref = username_ref.clone();
        let password_ref = password_ref.clone();
        let is_loading = is_loading.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let (Some(username), Some(password)) = (
                username_ref.cast::<HtmlInputElement>(),
                password_ref.cast::<HtmlInputElement>(),
            ) else {
                return;
            };
            let credentials = requests::LoginCredentials {
                username: username.value(),
                password: password.value(),
            };
            let is_loading = is_loading.clone();
            let dispatch = dispatch.clone();
            let push_route = push_route.clone();

            is_loading.set(true);
            yew::platform::spawn_local(async move {
                match get_api_client().login(&credentials).await {
                    Ok(()) => push_route.emit(redirect_target()),
                    Err(e) => {
                        report_error(&dispatch, "Failed to log in", &e);
                        is_loading.set(false);
                    }
                }
            });
        })
    };

    let input_class = "w-full px-3 py-2 border border-neutral-300 \
                       dark:border-neutral-600 rounded-md shadow-sm bg-white \
                       dark:bg-neutral-700 text-neutral-900 \
                       dark:text-neutral-100";

    html! {
        <div class="flex items-center justify-center min-h-[60vh]">
            <form onsubmit={on_submit} class="max-w-md w-full space-y-6 p-8 rounded-lg shadow-md bg-white dark:bg-neutral-800">
                <h1 class="text-2xl font-bold text-center">{"Log in"}</h1>
                <div>
                    <label for="username" class="block text-sm font-medium mb-2">
                        {"Username"}
                    </label>
                    <input
                        ref={username_ref}
                        type="text"
                        id="username"
                        autocomplete="username"
                        required={true}
                        class={input_class}
                    />
                </div>
                <div>
                    <label for="password" class="block text-sm font-medium mb-2">
                        {"Password"}
                    </label>
                    <input
                        ref={password_ref}
                        type="password"
                        id="password"
                        autocomplete="current-password"
                        required={true}
                        class={input_class}
                    />
                </div>
                <button
                    type="submit"
                    disabled={*is_loading}
                    class="w-full py-2 px-4 rounded-md text-sm font-medium text-white bg-neutral-900 hover:bg-neutral-800 disabled:opacity-50"
                >
                    {if *is_loading { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}
