use payloads::PlanId;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{
    Route, components::PlanActionButtons, config::csrf_token, hooks::use_title,
};

#[derive(Properties, PartialEq)]
pub struct Props {
    pub plan_id: PlanId,
}

/// Reviewer view of a submitted plan. The plan itself is rendered by the
/// server around this mount point; this page supplies the decision controls.
#[function_component]
pub fn PlanReviewPage(props: &Props) -> Html {
    let plan_id = props.plan_id;
    use_title(&format!("Plan #{plan_id}"));
    let token = use_memo((), |_| csrf_token().map(AttrValue::from));

    html! {
        <div class="bg-white dark:bg-neutral-800 p-8 rounded-lg shadow-md space-y-6">
            <div>
                <h1 class="text-2xl font-bold text-neutral-900 dark:text-neutral-100 mb-2">
                    {format!("Review Plan #{plan_id}")}
                </h1>
                <p class="text-neutral-600 dark:text-neutral-400">
                    {"Approve the plan, or reject it with a reason the planner will see."}
                </p>
            </div>

            <PlanActionButtons {plan_id} csrf_token={(*token).clone()} />

            <Link<Route>
                to={Route::EditPlan { id: plan_id.0 }}
                classes="inline-block text-sm underline text-neutral-600 dark:text-neutral-400"
            >
                {"Edit this plan"}
            </Link<Route>>
        </div>
    }
}
