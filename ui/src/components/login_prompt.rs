use yew::prelude::*;

/// Link to the login page that returns to the current path afterwards.
pub fn login_url() -> String {
    let path = web_sys::window()
        .and_then(|window| window.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string());
    format!("/login?redirect_url={path}")
}

#[derive(Properties, PartialEq)]
pub struct LoginPromptProps {
    /// What the user needs to log in for, e.g. "to host a property"
    pub action: AttrValue,
}

#[function_component]
pub fn LoginPrompt(props: &LoginPromptProps) -> Html {
    html! {
        <div class="p-6 rounded-lg border border-neutral-200
                    dark:border-neutral-700 text-center">
            <p class="text-neutral-700 dark:text-neutral-300">
                {"Please "}
                <a
                    href={login_url()}
                    class="font-medium text-neutral-900 dark:text-neutral-100
                           underline"
                >
                    {"log in"}
                </a>
                {" "}{&props.action}{"."}
            </p>
        </div>
    }
}
