use wasm_bindgen::JsCast;
use yew::prelude::*;

/// Dialog shell with a dimmed backdrop.
///
/// ```rust,ignore
/// html! {
///     if *show_dialog {
///         <Modal title="Confirm Action" on_close={close_dialog}>
///             <p>{"Are you sure?"}</p>
///         </Modal>
///     }
/// }
/// ```
#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub title: AttrValue,
    /// Modal content (passed as children)
    pub children: Html,
    /// Called when user clicks backdrop or presses Escape
    pub on_close: Callback<()>,
    /// Maximum width class (default: "max-w-md")
    #[prop_or_else(|| AttrValue::from("max-w-md"))]
    pub max_width: AttrValue,
    /// Whether clicking the backdrop or pressing Escape closes the modal
    #[prop_or(true)]
    pub dismissable: bool,
}

#[function_component]
pub fn Modal(props: &ModalProps) -> Html {
    let backdrop_ref = use_node_ref();

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        let backdrop_ref = backdrop_ref.clone();
        let dismissable = props.dismissable;

        Callback::from(move |e: MouseEvent| {
            if !dismissable {
                return;
            }

            if let Some(backdrop_element) =
                backdrop_ref.cast::<web_sys::Element>()
                && let Some(target) = e.target()
                && target.dyn_ref::<web_sys::Element>()
                    == Some(&backdrop_element)
            {
                on_close.emit(());
            }
        })
    };

    let on_keydown = {
        let on_close = props.on_close.clone();
        let dismissable = props.dismissable;
        Callback::from(move |e: KeyboardEvent| {
            if dismissable && e.key() == "Escape" {
                on_close.emit(());
            }
        })
    };

    html! {
        <div
            ref={backdrop_ref.clone()}
            onclick={on_backdrop_click}
            onkeydown={on_keydown}
            class="fixed inset-0 bg-black bg-opacity-50 z-50 flex
                   items-center justify-center p-4"
        >
            <div
                role="dialog"
                aria-modal="true"
                aria-label={props.title.clone()}
                class={format!(
                    "bg-white dark:bg-neutral-800 rounded-lg shadow-xl \
                     w-full p-6 {}",
                    props.max_width
                )}
            >
                <h3 class="text-lg font-semibold text-neutral-900 dark:text-neutral-100 mb-4">
                    {&props.title}
                </h3>
                {props.children.clone()}
            </div>
        </div>
    }
}
