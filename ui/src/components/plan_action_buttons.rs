use payloads::{PlanAction, PlanActionRequest, PlanId};
use yew::prelude::*;

use super::PlanActionDialog;
use crate::{contexts::toast::use_toast, get_api_client};

/// Pause between a successful action and the page reload, so the
/// confirmation toast can be read.
const RELOAD_DELAY_MS: u32 = 1500;

#[derive(Properties, PartialEq)]
pub struct PlanActionButtonsProps {
    pub plan_id: PlanId,
    #[prop_or_default]
    pub csrf_token: Option<AttrValue>,
}

/// Approve and reject controls for a reviewer.
#[function_component]
pub fn PlanActionButtons(props: &PlanActionButtonsProps) -> Html {
    let toast = use_toast();
    let open_dialog = use_state(|| None::<PlanAction>);
    let is_loading = use_state(|| false);

    let open = |action: PlanAction| {
        let open_dialog = open_dialog.clone();
        Callback::from(move |_: MouseEvent| open_dialog.set(Some(action)))
    };

    let on_close = {
        let open_dialog = open_dialog.clone();
        Callback::from(move |_: ()| open_dialog.set(None))
    };

    let on_confirm = {
        let plan_id = props.plan_id;
        let csrf_token = props.csrf_token.clone();
        let action = *open_dialog;
        let open_dialog = open_dialog.clone();
        let is_loading = is_loading.clone();
        let toast = toast.clone();

        Callback::from(move |request: PlanActionRequest| {
            let Some(action) = action else {
                return;
            };
            let csrf_token = csrf_token.clone();
            let open_dialog = open_dialog.clone();
            let is_loading = is_loading.clone();
            let toast = toast.clone();

            yew::platform::spawn_local(async move {
                is_loading.set(true);

                let api_client = get_api_client();
                match api_client
                    .plan_action(plan_id, action, csrf_token.as_deref(), &request)
                    .await
                {
                    Ok(response) => {
                        tracing::info!(%plan_id, ?action, "Plan action applied");
                        toast.success(response.message);
                        open_dialog.set(None);
                        gloo_timers::future::TimeoutFuture::new(RELOAD_DELAY_MS)
                            .await;
                        reload_page();
                    }
                    Err(e) => {
                        tracing::warn!(%plan_id, ?action, "Plan action failed: {e}");
                        toast.error(e.user_message("Action failed"));
                    }
                }

                is_loading.set(false);
            });
        })
    };

    html! {
        <>
            <div class="flex gap-3">
                <button
                    type="button"
                    onclick={open(PlanAction::Approve)}
                    disabled={*is_loading}
                    class="px-4 py-2 text-sm font-medium text-white rounded-md
                           bg-green-600 hover:bg-green-700 dark:bg-green-700 dark:hover:bg-green-600
                           disabled:opacity-50 disabled:cursor-not-allowed transition-colors"
                >
                    {"Approve"}
                </button>
                <button
                    type="button"
                    onclick={open(PlanAction::Reject)}
                    disabled={*is_loading}
                    class="px-4 py-2 text-sm font-medium text-white rounded-md
                           bg-red-600 hover:bg-red-700 dark:bg-red-700 dark:hover:bg-red-600
                           disabled:opacity-50 disabled:cursor-not-allowed transition-colors"
                >
                    {"Reject"}
                </button>
            </div>

            if let Some(action) = *open_dialog {
                <PlanActionDialog
                    {action}
                    {on_confirm}
                    {on_close}
                    is_loading={*is_loading}
                />
            }
        </>
    }
}

fn reload_page() {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.location().reload() {
        tracing::warn!("Failed to reload page: {e:?}");
    }
}
