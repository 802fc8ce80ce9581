use payloads::draft::DraftInput;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::components::{
    DraftAction, DraftState, FormMode, LoginPrompt, PropertyForm,
};
use crate::hooks::{FetchState, use_authentication, use_push_route, use_title};
use crate::{Route, State, get_api_client, report_error};

#[function_component]
pub fn PropertyCreatePage() -> Html {
    use_title("Host a property");
    let authenticated = use_authentication();

    match authenticated {
        FetchState::NotFetched => html! {
            <div class="text-center py-12">
                <p class="text-neutral-600 dark:text-neutral-400">
                    {"Loading..."}
                </p>
            </div>
        },
        FetchState::Fetched(status) if status.username().is_none() => html! {
            <LoginPrompt action="to host a property" />
        },
        FetchState::Fetched(_) => html! { <CreatePropertyForm /> },
    }
}

#[function_component]
fn CreatePropertyForm() -> Html {
    let (_, dispatch) = use_store::<State>();
    let push_route = use_push_route();
    let draft = use_reducer(DraftState::default);
    let is_submitting = use_state(|| false);

    let on_input = {
        let draft = draft.dispatcher();
        Callback::from(move |input: DraftInput| {
            draft.dispatch(DraftAction::Input(input))
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let is_submitting = is_submitting.clone();
        Callback::from(move |_| {
            if !draft.draft.is_complete() || *is_submitting {
                return;
            }
            let draft = draft.draft.clone();
            let is_submitting = is_submitting.clone();
            let push_route = push_route.clone();
            let dispatch = dispatch.clone();

            is_submitting.set(true);
            yew::platform::spawn_local(async move {
                match get_api_client().create_property(&draft).await {
                    Ok(property) => {
                        tracing::info!("Created property {}", property.id);
                        push_route.emit(Route::Home);
                    }
                    Err(e) => {
                        report_error(
                            &dispatch,
                            "Failed to create property",
                            &e,
                        );
                        is_submitting.set(false);
                    }
                }
            });
        })
    };

    html! {
        <div class="max-w-2xl mx-auto space-y-6">
            <h1 class="text-2xl font-bold">{"Host a property"}</h1>
            <PropertyForm
                mode={FormMode::Create}
                draft={draft.draft.clone()}
                on_input={on_input}
                on_submit={on_submit}
                submitting={*is_submitting}
            />
        </div>
    }
}
