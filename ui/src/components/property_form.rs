use payloads::draft::{DraftInput, ImageUpload, PROPERTY_TYPES};
use payloads::{FormDraft, PropertyField};
use std::rc::Rc;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    File, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, Url,
};
use yew::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FormMode {
    /// Every required field must be filled before submitting.
    Create,
    /// Only touched fields are sent; always submittable.
    Edit,
}

/// Owner-side state for a [`PropertyForm`]. Changes go through a reducer so
/// an image read that finishes late applies to the current draft.
#[derive(Clone, Default, PartialEq)]
pub struct DraftState {
    pub draft: FormDraft,
}

pub enum DraftAction {
    Reset(FormDraft),
    Input(DraftInput),
}

impl Reducible for DraftState {
    type Action = DraftAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let draft = match action {
            DraftAction::Reset(draft) => draft,
            DraftAction::Input(input) => {
                let mut draft = self.draft.clone();
                draft.apply(input);
                draft
            }
        };
        Rc::new(Self { draft })
    }
}

#[derive(Properties, PartialEq)]
pub struct PropertyFormProps {
    pub mode: FormMode,
    pub draft: FormDraft,
    pub on_input: Callback<DraftInput>,
    pub on_submit: Callback<()>,
    #[prop_or_default]
    pub submitting: bool,
}

/// The listing form shared by the create view and the edit modal. The
/// owning view holds the draft; this component only emits changes.
#[function_component]
pub fn PropertyForm(props: &PropertyFormProps) -> Html {
    let on_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let can_submit = !props.submitting
        && (props.mode == FormMode::Edit || props.draft.is_complete());

    let submit_text = match (props.mode, props.submitting) {
        (_, true) => "Saving...",
        (FormMode::Create, false) => "Create listing",
        (FormMode::Edit, false) => "Save changes",
    };

    let text = |field| text_input(field, "text", props);
    let number = |field| text_input(field, "number", props);
    let area = |field| text_area(field, props);

    html! {
        <form onsubmit={on_submit} class="space-y-6">
            {text(PropertyField::Title)}
            {area(PropertyField::Description)}
            <div class="grid grid-cols-1 sm:grid-cols-2 gap-4">
                {text(PropertyField::City)}
                {text(PropertyField::Country)}
                {type_select(props)}
                {number(PropertyField::PricePerNight)}
            </div>
            <div class="grid grid-cols-2 sm:grid-cols-4 gap-4">
                {number(PropertyField::MaxGuests)}
                {number(PropertyField::Bedrooms)}
                {number(PropertyField::Beds)}
                {number(PropertyField::Baths)}
            </div>
            {area(PropertyField::Amenities)}
            {area(PropertyField::Policies)}
            {area(PropertyField::Neighborhood)}
            {image_input(props)}

            <button
                type="submit"
                disabled={!can_submit}
                class="w-full py-2 px-4 rounded-md text-sm font-medium
                       text-white bg-neutral-900 hover:bg-neutral-800
                       dark:bg-neutral-100 dark:text-neutral-900
                       dark:hover:bg-neutral-200
                       disabled:opacity-50 disabled:cursor-not-allowed
                       transition-colors duration-200"
            >
                {submit_text}
            </button>
        </form>
    }
}

fn label(field: PropertyField) -> &'static str {
    match field {
        PropertyField::Title => "Title",
        PropertyField::Description => "Description",
        PropertyField::PricePerNight => "Price per night",
        PropertyField::City => "City",
        PropertyField::Country => "Country",
        PropertyField::PropertyType => "Property type",
        PropertyField::MaxGuests => "Max guests",
        PropertyField::Bedrooms => "Bedrooms",
        PropertyField::Beds => "Beds",
        PropertyField::Baths => "Baths",
        PropertyField::Images => "Images",
        PropertyField::Amenities => "Amenities",
        PropertyField::Policies => "Policies",
        PropertyField::Neighborhood => "Neighborhood",
    }
}

const LABEL_CLASS: &str = "block text-sm font-medium text-neutral-700 \
                           dark:text-neutral-300 mb-2";
const INPUT_CLASS: &str = "w-full px-3 py-2 border border-neutral-300 \
                           dark:border-neutral-600 rounded-md shadow-sm \
                           bg-white dark:bg-neutral-700 text-neutral-900 \
                           dark:text-neutral-100 focus:outline-none \
                           focus:ring-2 focus:ring-neutral-500";

fn value_of(props: &PropertyFormProps, field: PropertyField) -> String {
    props.draft.display_value(field).unwrap_or_default()
}

fn text_input(
    field: PropertyField,
    input_type: &'static str,
    props: &PropertyFormProps,
) -> Html {
    let oninput = props.on_input.reform(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        DraftInput::Text {
            field,
            value: input.value(),
        }
    });
    let id = format!("property-{field}");

    html! {
        <div>
            <label for={id.clone()} class={LABEL_CLASS}>{label(field)}</label>
            <input
                id={id}
                type={input_type}
                name={field.as_str()}
                min={(input_type == "number").then_some("0")}
                value={value_of(props, field)}
                oninput={oninput}
                disabled={props.submitting}
                class={INPUT_CLASS}
            />
        </div>
    }
}

fn text_area(field: PropertyField, props: &PropertyFormProps) -> Html {
    let oninput = props.on_input.reform(move |e: InputEvent| {
        let input: HtmlTextAreaElement = e.target_unchecked_into();
        DraftInput::Text {
            field,
            value: input.value(),
        }
    });
    let id = format!("property-{field}");
    let optional = if field.is_required() { "" } else { " (optional)" };

    html! {
        <div>
            <label for={id.clone()} class={LABEL_CLASS}>
                {label(field)}{optional}
            </label>
            <textarea
                id={id}
                name={field.as_str()}
                rows="3"
                value={value_of(props, field)}
                oninput={oninput}
                disabled={props.submitting}
                class={INPUT_CLASS}
            />
        </div>
    }
}

fn type_select(props: &PropertyFormProps) -> Html {
    let field = PropertyField::PropertyType;
    let current = value_of(props, field);
    let onchange = props.on_input.reform(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        DraftInput::Text {
            field,
            value: select.value(),
        }
    });

    // A type the server knows but the form does not is kept selectable.
    let mut options: Vec<&str> = PROPERTY_TYPES.to_vec();
    if !current.is_empty() && !options.contains(&current.as_str()) {
        options.push(current.as_str());
    }

    html! {
        <div>
            <label for="property-property_type" class={LABEL_CLASS}>
                {label(field)}
            </label>
            <select
                id="property-property_type"
                name={field.as_str()}
                onchange={onchange}
                disabled={props.submitting}
                class={INPUT_CLASS}
            >
                <option value="" selected={current.is_empty()} disabled=true>
                    {"Choose a type"}
                </option>
                {for options.into_iter().map(|option| html! {
                    <option
                        value={option.to_string()}
                        selected={option == current}
                    >
                        {option.to_string()}
                    </option>
                })}
            </select>
        </div>
    }
}

fn image_input(props: &PropertyFormProps) -> Html {
    let onchange = {
        let on_input = props.on_input.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(files) = input.files() else {
                return;
            };
            let files: Vec<File> =
                (0..files.length()).filter_map(|i| files.get(i)).collect();
            let on_input = on_input.clone();

            yew::platform::spawn_local(async move {
                let preview = files.first().and_then(|file| {
                    Url::create_object_url_with_blob(file).ok()
                });
                let mut uploads = Vec::with_capacity(files.len());
                for file in &files {
                    match read_upload(file).await {
                        Ok(upload) => uploads.push(upload),
                        Err(e) => tracing::error!(
                            "Failed to read {}: {e:?}",
                            file.name()
                        ),
                    }
                }
                on_input.emit(DraftInput::Images { uploads, preview });
            });
        })
    };

    let selected = props.draft.property.images.len();
    let hint = match (props.mode, selected) {
        (FormMode::Edit, 0) => {
            "New images replace the current ones".to_string()
        }
        (_, 0) => "Choose one or more images".to_string(),
        (_, 1) => "1 image selected".to_string(),
        (_, n) => format!("{n} images selected"),
    };

    html! {
        <div>
            <label for="property-images" class={LABEL_CLASS}>
                {label(PropertyField::Images)}
            </label>
            <input
                id="property-images"
                type="file"
                name="images"
                accept="image/*"
                multiple=true
                onchange={onchange}
                disabled={props.submitting}
                class="block w-full text-sm text-neutral-700
                       dark:text-neutral-300"
            />
            <p class="mt-1 text-xs text-neutral-500">{hint}</p>
            if let Some(preview) = &props.draft.preview_image {
                <img
                    src={preview.clone()}
                    alt="Preview"
                    class="mt-3 h-40 rounded-md object-cover"
                />
            }
        </div>
    }
}

async fn read_upload(
    file: &File,
) -> Result<ImageUpload, wasm_bindgen::JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    Ok(ImageUpload {
        file_name: file.name(),
        content_type: match file.type_() {
            content_type if content_type.is_empty() => {
                "application/octet-stream".to_string()
            }
            content_type => content_type,
        },
        data: js_sys::Uint8Array::new(&buffer).to_vec(),
    })
}
