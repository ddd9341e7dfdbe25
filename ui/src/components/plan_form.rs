use std::{collections::BTreeSet, rc::Rc};

use jiff::civil::Date;
use payloads::{
    InvalidField, PlanDraft, RowError, RowKey, SelectedSite,
};
use yew::prelude::*;

use super::site_row::{RowEvent, RowFlags, SiteRowEditor, row_dom_id};
use crate::{
    config::PageContext,
    contexts::toast::use_toast,
    hooks::use_autosave,
    utils::time::{format_minutes, parse_date_input, today},
};

/// The draft plus the fields flagged by the last failed submit.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanFormState {
    pub draft: PlanDraft,
    pub invalid: BTreeSet<InvalidField>,
}

impl PlanFormState {
    pub fn new(draft: PlanDraft) -> Self {
        Self {
            draft,
            invalid: BTreeSet::new(),
        }
    }

    pub fn flags_for(&self, key: RowKey) -> RowFlags {
        RowFlags {
            site: self.invalid.contains(&InvalidField::Site(key)),
            planned_actions: self
                .invalid
                .contains(&InvalidField::PlannedActions(key)),
            duration: self.invalid.contains(&InvalidField::Duration(key)),
        }
    }
}

pub enum PlanFormAction {
    SetPlanDate(Option<Date>),
    AddRow,
    RemoveRow(RowKey),
    MoveRow { moving: RowKey, target: RowKey },
    SetSite(RowKey, Option<SelectedSite>),
    SetPlannedActions(RowKey, String),
    SetDuration(RowKey, Option<i64>),
    MarkInvalid(BTreeSet<InvalidField>),
}

impl Reducible for PlanFormState {
    type Action = PlanFormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();

        let result: Result<(), RowError> = match action {
            PlanFormAction::SetPlanDate(date) => {
                next.draft.plan_date = date;
                next.invalid.remove(&InvalidField::PlanDate);
                Ok(())
            }
            PlanFormAction::AddRow => {
                next.draft.add_row();
                Ok(())
            }
            PlanFormAction::RemoveRow(key) => {
                next.draft.remove_row(key).map(|_| {
                    next.invalid.retain(|field| field.row() != Some(key));
                })
            }
            PlanFormAction::MoveRow { moving, target } => {
                next.draft.move_row(moving, target)
            }
            PlanFormAction::SetSite(key, site) => {
                next.invalid.remove(&InvalidField::Site(key));
                next.draft.set_site(key, site)
            }
            PlanFormAction::SetPlannedActions(key, text) => {
                next.invalid.remove(&InvalidField::PlannedActions(key));
                next.draft.set_planned_actions(key, text)
            }
            PlanFormAction::SetDuration(key, minutes) => {
                next.invalid.remove(&InvalidField::Duration(key));
                next.draft.set_duration(key, minutes)
            }
            PlanFormAction::MarkInvalid(fields) => {
                next.invalid = fields;
                Ok(())
            }
        };

        match result {
            Ok(()) => Rc::new(next),
            Err(e) => {
                tracing::warn!("Ignoring plan edit: {e}");
                self
            }
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct PlanFormProps {
    /// Where the form posts, both for autosave and final submission.
    pub form_action: AttrValue,
    pub context: PageContext,
}

/// The plan form controller.
///
/// Owns the draft for as long as it is mounted. Submission is a native
/// form post and only goes ahead once the draft validates; autosaves go
/// to the same action in the background.
#[function_component]
pub fn PlanForm(props: &PlanFormProps) -> Html {
    let toast = use_toast();
    let settings = props.context.settings.clone();
    let policy = *use_memo(settings.clone(), |settings| {
        settings.duration_policy()
    });

    let state = {
        let seed = props.context.seed.clone();
        use_reducer(move || {
            PlanFormState::new(PlanDraft::from_seed(&seed, &policy))
        })
    };
    let drag_source = use_state(|| None::<RowKey>);
    let save_immediately = use_mut_ref(|| false);

    let csrf_token = props.context.csrf_token.clone().map(AttrValue::from);
    let autosave = use_autosave(
        props.form_action.clone(),
        csrf_token.clone(),
        settings.autosave_delay_ms,
        settings.autosave,
    );

    // Autosave on every change after the first render.
    {
        let first_run = use_mut_ref(|| true);
        let save_immediately = save_immediately.clone();
        let schedule = autosave.schedule.clone();
        let save_now = autosave.save_now.clone();
        use_effect_with(state.draft.clone(), move |draft| {
            if std::mem::replace(&mut *first_run.borrow_mut(), false) {
                return;
            }
            if std::mem::take(&mut *save_immediately.borrow_mut()) {
                save_now.emit(draft.clone());
            } else {
                schedule.emit(draft.clone());
            }
        });
    }

    // Bring a freshly added row into view.
    {
        let previous_len = use_mut_ref(|| state.draft.len());
        let last_key = state.draft.rows().last().map(|row| row.key);
        use_effect_with((state.draft.len(), last_key), move |(len, last_key)| {
            let grew = *len > *previous_len.borrow();
            *previous_len.borrow_mut() = *len;
            if grew && let Some(key) = last_key {
                scroll_row_into_view(*key);
            }
        });
    }

    let on_add = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| {
            state.dispatch(PlanFormAction::AddRow);
        })
    };

    let on_row_event = {
        let state = state.clone();
        let toast = toast.clone();
        let drag_source = drag_source.clone();
        let save_immediately = save_immediately.clone();
        Callback::from(move |(key, event): (RowKey, RowEvent)| match event {
            RowEvent::SiteChanged(site) => {
                state.dispatch(PlanFormAction::SetSite(key, site));
            }
            RowEvent::ActionsChanged(text) => {
                state.dispatch(PlanFormAction::SetPlannedActions(key, text));
            }
            RowEvent::DurationInput(minutes) => {
                state.dispatch(PlanFormAction::SetDuration(key, minutes));
            }
            RowEvent::DurationCommitted(minutes) => {
                let minutes = minutes.map(|m| {
                    let check = policy.clamp(m);
                    if let Some(warning) = check.warning() {
                        toast.warning(warning);
                    }
                    check.minutes()
                });
                state.dispatch(PlanFormAction::SetDuration(key, minutes));
            }
            RowEvent::Remove => match state.draft.check_remove(key) {
                Ok(()) => {
                    *save_immediately.borrow_mut() = true;
                    state.dispatch(PlanFormAction::RemoveRow(key));
                }
                Err(RowError::LastRow) => {
                    toast.warning(RowError::LastRow.to_string());
                }
                Err(e) => tracing::warn!(%key, "Ignoring row removal: {e}"),
            },
            RowEvent::DragStart => drag_source.set(Some(key)),
            RowEvent::DropOnto => {
                if let Some(moving) = *drag_source
                    && moving != key
                    && state.draft.check_move(moving, key).is_ok()
                {
                    *save_immediately.borrow_mut() = true;
                    state.dispatch(PlanFormAction::MoveRow {
                        moving,
                        target: key,
                    });
                }
                drag_source.set(None);
            }
            RowEvent::DragEnd => drag_source.set(None),
        })
    };

    let on_date_change = {
        let state = state.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            state.dispatch(PlanFormAction::SetPlanDate(parse_date_input(
                &input.value(),
            )));
        })
    };

    let on_submit = {
        let state = state.clone();
        let toast = toast.clone();
        let cancel_autosave = autosave.cancel.clone();
        let max_total = settings.max_total_duration;
        Callback::from(move |e: SubmitEvent| {
            match state.draft.validate(today(), &policy, max_total) {
                Ok(()) => {
                    cancel_autosave.emit(());
                    tracing::info!(rows = state.draft.len(), "Submitting plan");
                }
                Err(err) => {
                    e.prevent_default();
                    let fields = err.invalid_fields().cloned().unwrap_or_default();
                    state.dispatch(PlanFormAction::MarkInvalid(fields));
                    toast.error(err.to_string());
                }
            }
        })
    };

    let total = state.draft.total_duration();
    let over_total = total > settings.max_total_duration;
    let plan_date = state
        .draft
        .plan_date
        .map(|date| date.to_string())
        .unwrap_or_default();
    let date_invalid = state.invalid.contains(&InvalidField::PlanDate);

    html! {
        <form
            id="plan-form"
            action={props.form_action.clone()}
            method="post"
            novalidate={true}
            onsubmit={on_submit}
            class="space-y-6"
        >
            if let Some(token) = csrf_token {
                <input type="hidden" name="csrf_token" value={token} />
            }

            <div>
                <label for="plan_date" class="block text-sm font-medium text-neutral-700 dark:text-neutral-300 mb-2">
                    {"Plan date *"}
                </label>
                <input
                    type="date"
                    id="plan_date"
                    name="plan_date"
                    min={today().to_string()}
                    value={plan_date}
                    onchange={on_date_change}
                    class={classes!(
                        "w-full", "sm:w-60", "px-3", "py-2", "border", "rounded-md", "shadow-sm",
                        "bg-white", "dark:bg-neutral-700", "text-neutral-900", "dark:text-neutral-100",
                        if date_invalid {
                            "border-red-500 dark:border-red-500"
                        } else {
                            "border-neutral-300 dark:border-neutral-600"
                        }
                    )}
                />
            </div>

            <div id="planned-sites" class="space-y-4">
                {for state.draft.rows().iter().map(|row| html! {
                    <SiteRowEditor
                        key={row.key.to_string()}
                        row={row.clone()}
                        policy={policy}
                        flags={state.flags_for(row.key)}
                        reorder={settings.reorder}
                        is_dragging={*drag_source == Some(row.key)}
                        on_event={on_row_event.clone()}
                    />
                })}
            </div>

            <div class="flex items-center justify-between">
                <button
                    type="button"
                    id="add-site"
                    onclick={on_add}
                    class="px-4 py-2 text-sm font-medium text-neutral-700 dark:text-neutral-300
                           bg-white dark:bg-neutral-700 border border-neutral-300 dark:border-neutral-600
                           rounded-md hover:bg-neutral-50 dark:hover:bg-neutral-600 transition-colors"
                >
                    {"+ Add site"}
                </button>
                <p class={classes!(
                    "text-sm",
                    if over_total { "text-red-600 dark:text-red-400" } else { "text-neutral-600 dark:text-neutral-400" }
                )}>
                    {format!(
                        "Total: {} of {}",
                        format_minutes(total),
                        format_minutes(settings.max_total_duration)
                    )}
                </p>
            </div>

            <div class="flex justify-end pt-6 border-t border-neutral-200 dark:border-neutral-700">
                <button
                    type="submit"
                    class="py-2 px-6 rounded-md shadow-sm text-sm font-medium text-white
                           bg-neutral-900 hover:bg-neutral-800
                           dark:bg-neutral-100 dark:text-neutral-900 dark:hover:bg-neutral-200
                           transition-colors duration-200"
                >
                    {"Save plan"}
                </button>
            </div>
        </form>
    }
}

fn scroll_row_into_view(key: RowKey) {
    let Some(element) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(&row_dom_id(key)))
    else {
        return;
    };

    let options = web_sys::ScrollIntoViewOptions::new();
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    options.set_block(web_sys::ScrollLogicalPosition::Center);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reduce(state: Rc<PlanFormState>, action: PlanFormAction) -> Rc<PlanFormState> {
        state.reduce(action)
    }

    #[test]
    fn test_remove_last_row_is_ignored() {
        let state = Rc::new(PlanFormState::new(PlanDraft::new()));
        let only = state.draft.rows()[0].key;
        let after = reduce(state.clone(), PlanFormAction::RemoveRow(only));
        assert!(Rc::ptr_eq(&state, &after));
    }

    #[test]
    fn test_editing_clears_field_flag() {
        let state = Rc::new(PlanFormState::new(PlanDraft::new()));
        let key = state.draft.rows()[0].key;
        let flagged = BTreeSet::from([
            InvalidField::PlanDate,
            InvalidField::Site(key),
            InvalidField::PlannedActions(key),
        ]);

        let state = reduce(state, PlanFormAction::MarkInvalid(flagged));
        assert_eq!(
            state.flags_for(key),
            RowFlags {
                site: true,
                planned_actions: true,
                duration: false
            }
        );

        let state = reduce(
            state,
            PlanFormAction::SetPlannedActions(key, "Check feeder".into()),
        );
        assert!(!state.flags_for(key).planned_actions);
        assert!(state.flags_for(key).site);
        assert!(state.invalid.contains(&InvalidField::PlanDate));
    }

    #[test]
    fn test_removed_row_drops_its_flags() {
        let state = Rc::new(PlanFormState::new(PlanDraft::new()));
        let state = reduce(state, PlanFormAction::AddRow);
        let second = state.draft.rows()[1].key;
        let state = reduce(
            state,
            PlanFormAction::MarkInvalid(BTreeSet::from([InvalidField::Site(
                second,
            )])),
        );

        let state = reduce(state, PlanFormAction::RemoveRow(second));
        assert_eq!(state.draft.len(), 1);
        assert!(state.invalid.is_empty());
    }
}
