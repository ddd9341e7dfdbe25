use payloads::{PlanAction, PlanActionRequest};
use yew::prelude::*;

use super::Modal;

#[derive(Properties, PartialEq)]
pub struct PlanActionDialogProps {
    pub action: PlanAction,
    /// Called with the request body once the dialog's input is acceptable
    pub on_confirm: Callback<PlanActionRequest>,
    /// Called when user cancels or clicks backdrop
    pub on_close: Callback<()>,
    /// Whether the action is being sent
    #[prop_or_default]
    pub is_loading: bool,
}

/// Confirmation for approving or rejecting a plan. A rejection is only
/// confirmed once a reason has been typed.
#[function_component]
pub fn PlanActionDialog(props: &PlanActionDialogProps) -> Html {
    let reason = use_state(String::new);
    let reason_error = use_state(|| None::<String>);

    let on_reason_input = {
        let reason = reason.clone();
        let reason_error = reason_error.clone();
        Callback::from(move |e: InputEvent| {
            let textarea: web_sys::HtmlTextAreaElement =
                e.target_unchecked_into();
            reason.set(textarea.value());
            reason_error.set(None);
        })
    };

    let on_confirm_click = {
        let action = props.action;
        let on_confirm = props.on_confirm.clone();
        let reason = reason.clone();
        let reason_error = reason_error.clone();
        Callback::from(move |_: MouseEvent| {
            match PlanActionRequest::for_action(action, &reason) {
                Ok(request) => on_confirm.emit(request),
                Err(e) => reason_error.set(Some(e.to_string())),
            }
        })
    };

    let on_cancel_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let (confirm_text, confirm_class) = match props.action {
        PlanAction::Approve => (
            "Approve",
            "bg-green-600 hover:bg-green-700 dark:bg-green-700 dark:hover:bg-green-600",
        ),
        PlanAction::Reject => (
            "Reject",
            "bg-red-600 hover:bg-red-700 dark:bg-red-700 dark:hover:bg-red-600",
        ),
    };

    html! {
        <Modal
            title={props.action.title()}
            on_close={props.on_close.clone()}
            dismissable={!props.is_loading}
        >
            <div class="space-y-4">
                if props.action.requires_reason() {
                    <label for="plan-action-reason" class="block text-sm text-neutral-600 dark:text-neutral-400">
                        {props.action.prompt()}
                    </label>
                    <textarea
                        id="plan-action-reason"
                        rows="4"
                        value={(*reason).clone()}
                        oninput={on_reason_input}
                        disabled={props.is_loading}
                        class={classes!(
                            "w-full", "px-3", "py-2", "text-sm", "border", "rounded-md",
                            "bg-white", "dark:bg-neutral-700",
                            "text-neutral-900", "dark:text-neutral-100",
                            "disabled:opacity-50",
                            if reason_error.is_some() {
                                "border-red-500"
                            } else {
                                "border-neutral-300 dark:border-neutral-600"
                            }
                        )}
                    />
                    if let Some(error) = &*reason_error {
                        <p class="text-sm text-red-600 dark:text-red-400">{error}</p>
                    }
                } else {
                    <p class="text-sm text-neutral-600 dark:text-neutral-400">
                        {props.action.prompt()}
                    </p>
                }
            </div>

            <div class="flex justify-end gap-3 mt-6">
                <button
                    type="button"
                    onclick={on_cancel_click}
                    disabled={props.is_loading}
                    class="px-4 py-2 text-sm font-medium text-neutral-700 dark:text-neutral-300
                           bg-white dark:bg-neutral-700 border border-neutral-300 dark:border-neutral-600
                           rounded-md hover:bg-neutral-50 dark:hover:bg-neutral-600
                           disabled:opacity-50 disabled:cursor-not-allowed
                           transition-colors"
                >
                    {"Cancel"}
                </button>
                <button
                    type="button"
                    onclick={on_confirm_click}
                    disabled={props.is_loading}
                    class={classes!(
                        "px-4", "py-2", "text-sm", "font-medium", "text-white", "rounded-md",
                        "disabled:opacity-50", "disabled:cursor-not-allowed", "transition-colors",
                        confirm_class
                    )}
                >
                    {if props.is_loading { "Processing..." } else { confirm_text }}
                </button>
            </div>
        </Modal>
    }
}
