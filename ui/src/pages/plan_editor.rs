use payloads::PlanId;
use yew::prelude::*;

use crate::{components::PlanForm, config::PageContext, hooks::use_title};

#[derive(Properties, PartialEq)]
pub struct Props {
    /// None when creating a plan.
    #[prop_or_default]
    pub plan_id: Option<PlanId>,
}

#[function_component]
pub fn PlanEditorPage(props: &Props) -> Html {
    // Read once per mount; the server renders it alongside the page.
    let context = use_memo((), |_| PageContext::from_document());

    let (title, form_action) = match props.plan_id {
        Some(plan_id) => {
            (format!("Edit Plan #{plan_id}"), format!("/plans/{plan_id}/edit"))
        }
        None => ("New Daily Plan".to_string(), "/plans/new".to_string()),
    };
    use_title(&title);

    html! {
        <div class="bg-white dark:bg-neutral-800 p-8 rounded-lg shadow-md">
            <div class="mb-8">
                <h1 class="text-2xl font-bold text-neutral-900 dark:text-neutral-100 mb-2">
                    {&title}
                </h1>
                <p class="text-neutral-600 dark:text-neutral-400">
                    {"List the sites you will visit, what you will do at each, and how long it will take."}
                </p>
            </div>

            <PlanForm
                key={form_action.clone()}
                form_action={form_action.clone()}
                context={(*context).clone()}
            />
        </div>
    }
}
