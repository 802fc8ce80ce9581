use payloads::responses::Authenticated;
use yew::prelude::*;

use super::FetchState;
use crate::get_api_client;

/// Check whether the session is logged in, and as whom.
///
/// Any failure, including a network error, counts as logged out.
#[hook]
pub fn use_authentication() -> FetchState<Authenticated> {
    let authenticated = use_state(|| FetchState::NotFetched);

    {
        let authenticated = authenticated.clone();
        use_effect_with((), move |_| {
            yew::platform::spawn_local(async move {
                let api_client = get_api_client();
                let status = match api_client.authenticated().await {
                    Ok(status) => status,
                    Err(e) => {
                        tracing::debug!("Authentication check failed: {e}");
                        Authenticated::logged_out()
                    }
                };
                authenticated.set(FetchState::Fetched(status));
            });
        });
    }

    (*authenticated).clone()
}
