use std::rc::Rc;

use payloads::draft::DraftInput;
use payloads::{
    DetailDialog, DetailEvent, FormDraft, ImageGallery as GalleryPosition,
    Property, PropertyId,
};
use yew::prelude::*;
use yewdux::prelude::*;

use crate::components::{
    BookingWidget, ConfirmationModal, DraftAction, DraftState, FormMode,
    ImageGallery, Modal, PropertyForm,
};
use crate::hooks::{
    use_authentication, use_property, use_push_route, use_title,
};
use crate::{Route, State, get_api_client, report_error};

#[derive(Properties, PartialEq)]
pub struct Props {
    pub property_id: PropertyId,
}

/// Dialog state for the page. Requests start from effects keyed on the
/// in-flight flags, so repeated clicks send one request.
#[derive(Default, PartialEq)]
struct DialogState(DetailDialog);

impl Reducible for DialogState {
    type Action = DetailEvent;

    fn reduce(self: Rc<Self>, event: Self::Action) -> Rc<Self> {
        let next = self.0.apply(event);
        if next == self.0 {
            self
        } else {
            Rc::new(Self(next))
        }
    }
}

#[function_component]
pub fn PropertyDetailPage(props: &Props) -> Html {
    let property_id = props.property_id;
    let property_hook = use_property(property_id);
    // Fetched alongside the property; the page does not wait for it.
    let authenticated = use_authentication();
    let (_, dispatch) = use_store::<State>();
    let push_route = use_push_route();

    let gallery = use_state(GalleryPosition::new);
    let dialog = use_reducer(DialogState::default);
    let edit_draft = use_reducer(DraftState::default);

    let title = property_hook
        .data
        .as_ref()
        .map(|property| property.title.clone())
        .unwrap_or_else(|| "Property".to_string());
    use_title(&title);

    let username = authenticated
        .as_ref()
        .and_then(|status| status.username().map(str::to_string));

    let open_edit = {
        let dialog = dialog.dispatcher();
        let edit_draft = edit_draft.dispatcher();
        Callback::from(move |property: Property| {
            let draft = FormDraft::for_property(&property);
            edit_draft.dispatch(DraftAction::Reset(draft));
            dialog.dispatch(DetailEvent::OpenEdit);
        })
    };

    let open_delete = {
        let dialog = dialog.dispatcher();
        Callback::from(move |_: MouseEvent| {
            dialog.dispatch(DetailEvent::OpenDelete)
        })
    };

    let close_dialog = {
        let dialog = dialog.dispatcher();
        Callback::from(move |_: ()| dialog.dispatch(DetailEvent::Close))
    };

    let on_edit_input = {
        let edit_draft = edit_draft.dispatcher();
        Callback::from(move |input: DraftInput| {
            edit_draft.dispatch(DraftAction::Input(input))
        })
    };

    let on_edit_submit = {
        let dialog = dialog.dispatcher();
        Callback::from(move |_: ()| dialog.dispatch(DetailEvent::SaveRequested))
    };

    let on_delete_confirm = {
        let dialog = dialog.dispatcher();
        Callback::from(move |_: ()| {
            dialog.dispatch(DetailEvent::DeleteRequested)
        })
    };

    {
        let dialog_events = dialog.dispatcher();
        let draft = edit_draft.draft.clone();
        let gallery = gallery.clone();
        let refetch = property_hook.refetch.clone();
        let dispatch = dispatch.clone();
        use_effect_with(dialog.0.is_saving(), move |saving| {
            if !*saving {
                return;
            }
            yew::platform::spawn_local(async move {
                match get_api_client()
                    .update_property(&property_id, &draft)
                    .await
                {
                    Ok(_) => {
                        dialog_events.dispatch(DetailEvent::Saved);
                        gallery.set(GalleryPosition::new());
                        refetch.emit(());
                    }
                    Err(e) => {
                        report_error(
                            &dispatch,
                            "Failed to update property",
                            &e,
                        );
                        dialog_events.dispatch(DetailEvent::SaveFailed);
                    }
                }
            });
        });
    }

    {
        let dialog_events = dialog.dispatcher();
        let push_route = push_route.clone();
        let dispatch = dispatch.clone();
        use_effect_with(dialog.0.is_deleting(), move |deleting| {
            if !*deleting {
                return;
            }
            yew::platform::spawn_local(async move {
                match get_api_client().delete_property(&property_id).await {
                    Ok(()) => push_route.emit(Route::Home),
                    Err(e) => {
                        report_error(
                            &dispatch,
                            "Failed to delete property",
                            &e,
                        );
                        dialog_events.dispatch(DetailEvent::DeleteFailed);
                    }
                }
            });
        });
    }

    let on_gallery_change = {
        let gallery = gallery.clone();
        Callback::from(move |position: GalleryPosition| gallery.set(position))
    };

    let is_refreshing = property_hook.is_loading;
    property_hook.render("property", |property| {
        let is_owner =
            DetailDialog::controls_visible(property, username.as_deref());

        html! {
            <div class="space-y-8">
                if is_refreshing {
                    <p class="text-sm text-neutral-500">{"Refreshing..."}</p>
                }
                <ImageGallery
                    property={property.clone()}
                    position={*gallery}
                    on_change={on_gallery_change.clone()}
                />

                <div class="flex flex-col lg:flex-row gap-8">
                    <div class="flex-1 space-y-6">
                        <div class="flex justify-between items-start gap-4">
                            <div>
                                <p class="text-sm uppercase tracking-wide text-neutral-500">
                                    {&property.property_type}
                                </p>
                                <h1 class="text-3xl font-bold">{&property.title}</h1>
                                <p class="text-neutral-600 dark:text-neutral-400">
                                    {property.location()}
                                </p>
                                <p class="text-sm text-neutral-600 dark:text-neutral-400">
                                    {format!("Hosted by {}", property.user.username)}
                                </p>
                            </div>
                            if is_owner {
                                <div class="flex gap-2">
                                    <button
                                        onclick={open_edit.reform({
                                            let property = property.clone();
                                            move |_: MouseEvent| property.clone()
                                        })}
                                        class="px-4 py-2 text-sm font-medium border border-neutral-300 dark:border-neutral-600 rounded-md"
                                    >
                                        {"Edit"}
                                    </button>
                                    <button
                                        onclick={open_delete.clone()}
                                        class="px-4 py-2 text-sm font-medium text-white bg-red-600 hover:bg-red-700 rounded-md"
                                    >
                                        {"Delete"}
                                    </button>
                                </div>
                            }
                        </div>

                        <p class="text-neutral-700 dark:text-neutral-300">
                            {format!(
                                "{} guests · {} bedrooms · {} beds · {} baths",
                                property.max_guests,
                                property.bedrooms,
                                property.beds,
                                property.baths,
                            )}
                        </p>

                        <p class="whitespace-pre-line">{&property.description}</p>

                        {optional_section("The neighborhood", &property.neighborhood)}
                        {optional_section("Amenities", &property.amenities)}
                        {optional_section("Policies", &property.policies)}
                    </div>

                    <div class="lg:w-80">
                        <BookingWidget
                            property_id={property.id}
                            price_per_night={property.price_per_night}
                            logged_in={username.is_some()}
                        />
                    </div>
                </div>

                {match dialog.0 {
                    DetailDialog::Closed => html! {},
                    DetailDialog::Edit { saving } => html! {
                        <Modal
                            title="Edit listing"
                            on_close={close_dialog.clone()}
                            max_width="max-w-2xl"
                            close_on_backdrop={!saving}
                        >
                            <PropertyForm
                                mode={FormMode::Edit}
                                draft={edit_draft.draft.clone()}
                                on_input={on_edit_input.clone()}
                                on_submit={on_edit_submit.clone()}
                                submitting={saving}
                            />
                        </Modal>
                    },
                    DetailDialog::ConfirmDelete { deleting } => html! {
                        <ConfirmationModal
                            title="Delete listing"
                            message="The listing, its images and its bookings will be removed."
                            confirm_text="Delete"
                            on_confirm={on_delete_confirm.clone()}
                            on_close={close_dialog.clone()}
                            is_loading={deleting}
                        />
                    },
                }}
            </div>
        }
    })
}

fn optional_section(heading: &str, body: &Option<String>) -> Html {
    match body.as_deref().filter(|body| !body.trim().is_empty()) {
        Some(body) => html! {
            <section class="space-y-2">
                <h2 class="text-xl font-semibold">{heading}</h2>
                <p class="whitespace-pre-line text-neutral-700 dark:text-neutral-300">
                    {body}
                </p>
            </section>
        },
        None => html! {},
    }
}
