use payloads::{
    SelectedSite,
    requests::{SEARCH_TERM_MIN_LEN, is_searchable},
    responses::SiteSummary,
};
use yew::prelude::*;

use crate::hooks::use_site_search;

#[derive(Properties, PartialEq)]
pub struct SiteSelectProps {
    pub selected: Option<SelectedSite>,
    pub on_select: Callback<Option<SelectedSite>>,
    #[prop_or_default]
    pub invalid: bool,
}

/// Site picker with server-side search. Submits the chosen site's id as
/// `site_id[]`.
#[function_component]
pub fn SiteSelect(props: &SiteSelectProps) -> Html {
    let search = use_site_search();
    let term = use_state(String::new);

    let on_input = {
        let term = term.clone();
        let run_search = search.search.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            let value = input.value();
            term.set(value.clone());
            run_search.emit(value);
        })
    };

    let on_pick = {
        let term = term.clone();
        let run_search = search.search.clone();
        let on_select = props.on_select.clone();
        Callback::from(move |site: SiteSummary| {
            term.set(String::new());
            run_search.emit(String::new());
            on_select.emit(Some(SelectedSite::from(&site)));
        })
    };

    let on_clear = {
        let on_select = props.on_select.clone();
        Callback::from(move |_: MouseEvent| on_select.emit(None))
    };

    let on_load_more = {
        let load_more = search.load_more.clone();
        Callback::from(move |_: MouseEvent| load_more.emit(()))
    };

    let border = if props.invalid {
        "border-red-500 dark:border-red-500"
    } else {
        "border-neutral-300 dark:border-neutral-600"
    };

    let site_id = props
        .selected
        .as_ref()
        .map(|site| site.id.to_string())
        .unwrap_or_default();

    html! {
        <div class="relative">
            <input type="hidden" name="site_id[]" value={site_id} />

            if let Some(site) = &props.selected {
                <div class={classes!(
                    "flex", "items-start", "justify-between", "gap-3", "px-3", "py-2",
                    "border", "rounded-md", "bg-white", "dark:bg-neutral-700", border
                )}>
                    <SiteLabel label={site.label.clone()} location={site.location.clone()} />
                    <button
                        type="button"
                        onclick={on_clear}
                        class="text-sm text-neutral-500 hover:text-neutral-800 dark:text-neutral-400 dark:hover:text-neutral-100"
                    >
                        {"Change"}
                    </button>
                </div>
            } else {
                <input
                    type="search"
                    value={(*term).clone()}
                    oninput={on_input}
                    placeholder="Search for a site..."
                    aria-invalid={props.invalid.to_string()}
                    autocomplete="off"
                    class={classes!(
                        "w-full", "px-3", "py-2", "border", "rounded-md", "shadow-sm",
                        "bg-white", "dark:bg-neutral-700",
                        "text-neutral-900", "dark:text-neutral-100",
                        "focus:outline-none", "focus:ring-2", "focus:ring-neutral-500",
                        border
                    )}
                />

                if !term.is_empty() && !is_searchable(&term) {
                    <p class="mt-1 text-xs text-neutral-500 dark:text-neutral-400">
                        {format!("Please enter {SEARCH_TERM_MIN_LEN} or more characters")}
                    </p>
                } else if is_searchable(&term) {
                    <div class="absolute z-10 mt-1 w-full max-h-72 overflow-y-auto rounded-md border
                                border-neutral-200 dark:border-neutral-700 bg-white dark:bg-neutral-800 shadow-lg">
                        if let Some(error) = &search.view.error {
                            <p class="px-3 py-2 text-sm text-red-600 dark:text-red-400">{error}</p>
                        } else if search.view.listing.sites.is_empty() {
                            <p class="px-3 py-2 text-sm text-neutral-500 dark:text-neutral-400">
                                {if search.view.is_loading { "Searching..." } else { "No results found" }}
                            </p>
                        }

                        {for search.view.listing.sites.iter().map(|site| {
                            let on_pick = on_pick.clone();
                            let picked = site.clone();
                            html! {
                                <button
                                    key={site.id.to_string()}
                                    type="button"
                                    onclick={Callback::from(move |_: MouseEvent| on_pick.emit(picked.clone()))}
                                    class="block w-full text-left px-3 py-2 hover:bg-neutral-100 dark:hover:bg-neutral-700"
                                >
                                    <SiteLabel label={site.label()} location={site.location.clone()} />
                                </button>
                            }
                        })}

                        if search.view.listing.more {
                            <button
                                type="button"
                                onclick={on_load_more}
                                disabled={search.view.is_loading}
                                class="block w-full px-3 py-2 text-sm text-center text-neutral-600 dark:text-neutral-300
                                       hover:bg-neutral-100 dark:hover:bg-neutral-700 disabled:opacity-50"
                            >
                                {if search.view.is_loading { "Loading more results..." } else { "Load more results" }}
                            </button>
                        }
                    </div>
                }
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SiteLabelProps {
    label: AttrValue,
    location: Option<AttrValue>,
}

/// Primary site label with the location underneath when known.
#[function_component]
fn SiteLabel(props: &SiteLabelProps) -> Html {
    html! {
        <div class="min-w-0">
            <div class="text-sm font-medium text-neutral-900 dark:text-neutral-100 truncate">
                {&props.label}
            </div>
            if let Some(location) = &props.location {
                <small class="text-xs text-neutral-500 dark:text-neutral-400">
                    {"📍 "}{location}
                </small>
            }
        </div>
    }
}
