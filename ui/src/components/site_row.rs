use payloads::{
    DurationPolicy, RowKey, SelectedSite, SiteRow, plan::parse_duration_input,
};
use yew::prelude::*;

use super::SiteSelect;

/// Something the user did to one row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowEvent {
    SiteChanged(Option<SelectedSite>),
    ActionsChanged(String),
    /// Every keystroke in the duration field.
    DurationInput(Option<i64>),
    /// The duration field lost focus or the user pressed enter.
    DurationCommitted(Option<i64>),
    Remove,
    DragStart,
    DropOnto,
    DragEnd,
}

/// Field flags for a single row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowFlags {
    pub site: bool,
    pub planned_actions: bool,
    pub duration: bool,
}

pub fn row_dom_id(key: RowKey) -> String {
    format!("planned-site-{key}")
}

#[derive(Properties, PartialEq)]
pub struct SiteRowEditorProps {
    pub row: SiteRow,
    pub policy: DurationPolicy,
    #[prop_or_default]
    pub flags: RowFlags,
    #[prop_or_default]
    pub reorder: bool,
    #[prop_or_default]
    pub is_dragging: bool,
    pub on_event: Callback<(RowKey, RowEvent)>,
}

#[function_component]
pub fn SiteRowEditor(props: &SiteRowEditorProps) -> Html {
    let key = props.row.key;
    let emit = {
        let on_event = props.on_event.clone();
        move |event: RowEvent| on_event.emit((key, event))
    };

    let on_site = {
        let emit = emit.clone();
        Callback::from(move |site| emit(RowEvent::SiteChanged(site)))
    };

    let on_actions = {
        let emit = emit.clone();
        Callback::from(move |e: InputEvent| {
            let textarea: web_sys::HtmlTextAreaElement =
                e.target_unchecked_into();
            emit(RowEvent::ActionsChanged(textarea.value()));
        })
    };

    let on_duration_input = {
        let emit = emit.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            emit(RowEvent::DurationInput(parse_duration_input(&input.value())));
        })
    };

    let on_duration_change = {
        let emit = emit.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            emit(RowEvent::DurationCommitted(parse_duration_input(
                &input.value(),
            )));
        })
    };

    let on_remove = {
        let emit = emit.clone();
        Callback::from(move |_: MouseEvent| emit(RowEvent::Remove))
    };

    let on_drag_start = {
        let emit = emit.clone();
        Callback::from(move |e: DragEvent| {
            // Firefox refuses to start a drag without data attached.
            if let Some(transfer) = e.data_transfer() {
                transfer.set_effect_allowed("move");
                let _ = transfer.set_data("text/plain", &key.to_string());
            }
            emit(RowEvent::DragStart);
        })
    };

    let on_drag_over = Callback::from(|e: DragEvent| e.prevent_default());

    let on_drop = {
        let emit = emit.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            emit(RowEvent::DropOnto);
        })
    };

    let on_drag_end = Callback::from(move |_: DragEvent| emit(RowEvent::DragEnd));

    let input_border = |invalid: bool| {
        if invalid {
            "border-red-500 dark:border-red-500"
        } else {
            "border-neutral-300 dark:border-neutral-600"
        }
    };

    let row = &props.row;
    let duration = row.duration.map(|d| d.to_string()).unwrap_or_default();

    html! {
        <div
            id={row_dom_id(key)}
            ondragover={on_drag_over}
            ondrop={on_drop}
            class={classes!(
                "planned-site", "p-4", "border", "rounded-lg",
                "border-neutral-200", "dark:border-neutral-700",
                "bg-neutral-50", "dark:bg-neutral-800/50",
                props.is_dragging.then_some("opacity-50")
            )}
        >
            <div class="flex items-center justify-between mb-3">
                <div class="flex items-center gap-2">
                    if props.reorder {
                        <span
                            class="drag-handle cursor-move select-none text-neutral-400 hover:text-neutral-600"
                            draggable="true"
                            ondragstart={on_drag_start}
                            ondragend={on_drag_end}
                            title="Drag to reorder"
                        >
                            {"⋮⋮"}
                        </span>
                    }
                    <span class="visit-order inline-flex items-center justify-center w-6 h-6 rounded-full
                                 bg-neutral-900 text-white dark:bg-neutral-100 dark:text-neutral-900 text-xs font-semibold">
                        {row.visit_order}
                    </span>
                    <span class="text-sm font-medium text-neutral-700 dark:text-neutral-300">
                        {"Site visit"}
                    </span>
                </div>
                <button
                    type="button"
                    onclick={on_remove}
                    class="remove-site text-sm text-red-600 hover:text-red-700 dark:text-red-400"
                >
                    {"Remove"}
                </button>
            </div>

            <div class="grid gap-4 md:grid-cols-[2fr_3fr_1fr]">
                <div>
                    <label class="block text-sm font-medium text-neutral-700 dark:text-neutral-300 mb-1">
                        {"Site *"}
                    </label>
                    <SiteSelect
                        selected={row.site.clone()}
                        on_select={on_site}
                        invalid={props.flags.site}
                    />
                </div>

                <div>
                    <label class="block text-sm font-medium text-neutral-700 dark:text-neutral-300 mb-1">
                        {"Planned actions *"}
                    </label>
                    <textarea
                        name="planned_actions[]"
                        rows="2"
                        value={row.planned_actions.clone()}
                        oninput={on_actions}
                        placeholder="What will you do at this site?"
                        class={classes!(
                            "w-full", "px-3", "py-2", "border", "rounded-md", "shadow-sm",
                            "bg-white", "dark:bg-neutral-700",
                            "text-neutral-900", "dark:text-neutral-100",
                            input_border(props.flags.planned_actions)
                        )}
                    />
                </div>

                <div>
                    <label class="block text-sm font-medium text-neutral-700 dark:text-neutral-300 mb-1">
                        {"Duration (min) *"}
                    </label>
                    <input
                        type="number"
                        name="duration[]"
                        min={props.policy.min.to_string()}
                        max={props.policy.max.to_string()}
                        value={duration}
                        oninput={on_duration_input}
                        onchange={on_duration_change}
                        class={classes!(
                            "w-full", "px-3", "py-2", "border", "rounded-md", "shadow-sm",
                            "bg-white", "dark:bg-neutral-700",
                            "text-neutral-900", "dark:text-neutral-100",
                            input_border(props.flags.duration)
                        )}
                    />
                </div>
            </div>
        </div>
    }
}
