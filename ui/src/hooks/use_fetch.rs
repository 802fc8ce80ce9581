use payloads::ClientError;
use std::future::Future;
use std::rc::Rc;
use yew::prelude::*;
use yewdux::prelude::*;

use super::FetchState;
use crate::{State, report_error};

/// Generic fetch hook return type
pub struct FetchHookReturn<T> {
    pub data: FetchState<T>,
    pub is_loading: bool,
    pub refetch: Callback<()>,
}

impl<T: Clone> FetchHookReturn<T> {
    /// Render the loading placeholder until data has been fetched, then
    /// call `render_fn`.
    ///
    /// A failed fetch has already been reported through the error banner
    /// and leaves the placeholder in place.
    pub fn render<F>(&self, context: &str, render_fn: F) -> Html
    where
        F: Fn(&T) -> Html,
    {
        match self.data.as_ref() {
            None => html! {
                <div class="text-center py-12">
                    <p class="text-neutral-600 dark:text-neutral-400">
                        {format!("Loading {}...", context)}
                    </p>
                </div>
            },
            Some(data) => render_fn(data),
        }
    }
}

/// Generic fetch hook composer.
///
/// Automatically fetches on mount and when `deps` change, and provides
/// refetch capability. The fetch function captures its dependencies from
/// the closure; `deps` is used only for dependency tracking.
///
/// Errors are reported with `context` and do not clear previously fetched
/// data.
///
/// # Example
///
/// ```rust,ignore
/// #[hook]
/// pub fn use_property(id: PropertyId) -> FetchHookReturn<Property> {
///     use_fetch("Failed to load property", id, move || async move {
///         get_api_client().get_property(&id).await
///     })
/// }
/// ```
#[hook]
pub fn use_fetch<T, D, F, Fut>(
    context: &'static str,
    deps: D,
    fetch_fn: F,
) -> FetchHookReturn<T>
where
    T: Clone + 'static,
    D: PartialEq + Clone + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, ClientError>> + 'static,
{
    let (_, dispatch) = use_store::<State>();
    let data = use_state(|| FetchState::NotFetched);
    let is_loading = use_state(|| false);

    let refetch = {
        let data = data.clone();
        let is_loading = is_loading.clone();
        let fetch_fn = Rc::new(fetch_fn);

        use_callback(deps.clone(), move |_, _| {
            let data = data.clone();
            let is_loading = is_loading.clone();
            let fetch_fn = fetch_fn.clone();
            let dispatch = dispatch.clone();

            yew::platform::spawn_local(async move {
                is_loading.set(true);
                match fetch_fn().await {
                    Ok(result) => data.set(FetchState::Fetched(result)),
                    Err(e) => report_error(&dispatch, context, &e),
                }
                is_loading.set(false);
            });
        })
    };

    // Auto-fetch on mount and when deps change
    {
        let refetch = refetch.clone();
        let data = data.clone();
        use_effect_with(deps, move |_| {
            data.set(FetchState::NotFetched);
            refetch.emit(());
        });
    }

    FetchHookReturn {
        data: (*data).clone(),
        is_loading: *is_loading,
        refetch: Callback::from(move |_| refetch.emit(())),
    }
}
