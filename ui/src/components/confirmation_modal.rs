use yew::prelude::*;

use crate::components::Modal;

#[derive(Properties, PartialEq)]
pub struct ConfirmationModalProps {
    /// Modal title (e.g., "Delete listing")
    pub title: AttrValue,
    /// Warning message explaining consequences
    pub message: AttrValue,
    /// Confirm button text (e.g., "Delete")
    pub confirm_text: AttrValue,
    pub on_confirm: Callback<()>,
    pub on_close: Callback<()>,
    /// Whether the confirmed action is in progress
    #[prop_or_default]
    pub is_loading: bool,
}

/// Ask before an irreversible action. The confirm button is disabled while
/// the action runs, so a double click sends one request.
#[function_component]
pub fn ConfirmationModal(props: &ConfirmationModalProps) -> Html {
    let on_confirm_click = props.on_confirm.reform(|_: MouseEvent| ());
    let on_cancel_click = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <Modal
            title={props.title.clone()}
            on_close={props.on_close.clone()}
            close_on_backdrop={!props.is_loading}
        >
            <p class="text-sm text-neutral-600 dark:text-neutral-400">
                {"This action "}
                <span class="font-semibold text-red-600 dark:text-red-400">
                    {"cannot be undone"}
                </span>
                {". "}{&props.message}
            </p>

            <div class="flex justify-end gap-3 mt-6">
                <button
                    onclick={on_cancel_click}
                    disabled={props.is_loading}
                    class="px-4 py-2 text-sm font-medium text-neutral-700
                           dark:text-neutral-300 bg-white dark:bg-neutral-700
                           border border-neutral-300 dark:border-neutral-600
                           rounded-md hover:bg-neutral-50
                           dark:hover:bg-neutral-600
                           disabled:opacity-50 disabled:cursor-not-allowed"
                >
                    {"Cancel"}
                </button>
                <button
                    onclick={on_confirm_click}
                    disabled={props.is_loading}
                    class="px-4 py-2 text-sm font-medium text-white
                           bg-red-600 hover:bg-red-700 dark:bg-red-700
                           dark:hover:bg-red-600 rounded-md
                           disabled:opacity-50 disabled:cursor-not-allowed"
                >
                    {if props.is_loading {
                        "Processing..."
                    } else {
                        &props.confirm_text
                    }}
                </button>
            </div>
        </Modal>
    }
}
