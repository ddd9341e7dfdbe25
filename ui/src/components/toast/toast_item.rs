use crate::contexts::toast::{Toast, ToastType, use_toast};
use yew::prelude::*;

/// Container classes and icon for each kind of toast.
fn palette(toast_type: &ToastType) -> (&'static str, &'static str) {
    match toast_type {
        ToastType::Error => (
            "bg-red-50 dark:bg-red-900 border-red-200 dark:border-red-800 text-red-700 dark:text-red-400",
            "✕",
        ),
        ToastType::Warning => (
            "bg-amber-50 dark:bg-amber-900 border-amber-200 dark:border-amber-800 text-amber-800 dark:text-amber-300",
            "!",
        ),
        ToastType::Success => (
            "bg-green-50 dark:bg-green-900 border-green-200 dark:border-green-800 text-green-700 dark:text-green-400",
            "✓",
        ),
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastItemProps {
    pub toast: Toast,
}

#[function_component]
pub fn ToastItem(props: &ToastItemProps) -> Html {
    let toast_handle = use_toast();
    let toast = &props.toast;
    let (colors, icon) = palette(&toast.toast_type);
    let live = if toast.toast_type == ToastType::Error {
        "assertive"
    } else {
        "polite"
    };

    let on_close = {
        let toast_id = toast.id;
        Callback::from(move |_: MouseEvent| toast_handle.remove(toast_id))
    };

    html! {
        <div
            role="status"
            aria-live={live}
            class={classes!(
                "relative", "p-4", "rounded-lg", "border", "shadow-lg",
                "transition-all", "duration-300", "ease-out", colors
            )}
        >
            <div class="flex items-start gap-3">
                <span class="flex-shrink-0 text-sm font-medium">{icon}</span>
                <p class="flex-1 min-w-0 text-sm font-medium leading-5">
                    {&toast.message}
                </p>
                <button
                    type="button"
                    onclick={on_close}
                    class="flex-shrink-0 text-lg leading-none text-neutral-400 hover:text-neutral-600
                           dark:hover:text-neutral-200 focus:outline-none transition-colors"
                    title="Dismiss"
                >
                    {"×"}
                </button>
            </div>
        </div>
    }
}
