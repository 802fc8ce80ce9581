use payloads::{ImageGallery as GalleryPosition, Property};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ImageGalleryProps {
    pub property: Property,
    pub position: GalleryPosition,
    pub on_change: Callback<GalleryPosition>,
}

/// Slideshow over a listing's images. Controls are hidden with fewer than
/// two images; with none the placeholder image is shown.
#[function_component]
pub fn ImageGallery(props: &ImageGalleryProps) -> Html {
    let len = props.property.images.len();
    let position = props.position;

    let on_previous = props
        .on_change
        .reform(move |_: MouseEvent| position.previous(len));
    let on_next = props
        .on_change
        .reform(move |_: MouseEvent| position.next(len));

    let button_class = "absolute top-1/2 -translate-y-1/2 px-3 py-2 \
                        rounded-full bg-white/80 dark:bg-neutral-800/80 \
                        text-neutral-900 dark:text-neutral-100 shadow";

    html! {
        <div class="relative w-full h-96 overflow-hidden rounded-lg
                    bg-neutral-100 dark:bg-neutral-800">
            <img
                src={position.current_url(&props.property)}
                alt={props.property.title.clone()}
                class="w-full h-full object-cover"
            />
            if GalleryPosition::has_controls(len) {
                <button
                    onclick={on_previous}
                    aria-label="Previous image"
                    class={format!("{button_class} left-3")}
                >
                    {"‹"}
                </button>
                <button
                    onclick={on_next}
                    aria-label="Next image"
                    class={format!("{button_class} right-3")}
                >
                    {"›"}
                </button>
                <span class="absolute bottom-3 right-3 px-2 py-1 text-xs
                             rounded bg-black/60 text-white">
                    {format!("{} / {}", position.index() + 1, len)}
                </span>
            }
        </div>
    }
}
