use std::rc::Rc;

use gloo_timers::callback::Timeout;
use payloads::{
    SiteSearchQuery,
    requests::is_searchable,
    responses::SiteSearchResults,
    search::{SEARCH_DEBOUNCE_MS, SearchListing, SearchSequence},
};
use yew::prelude::*;
use yewdux::prelude::*;

use crate::{State, get_api_client};

/// What one search box currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchView {
    pub listing: SearchListing,
    pub is_loading: bool,
    pub error: Option<String>,
}

pub enum SearchAction {
    Started,
    Loaded(SiteSearchQuery, SiteSearchResults),
    Failed(String),
    Cleared,
}

impl Reducible for SearchView {
    type Action = SearchAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            SearchAction::Started => {
                next.is_loading = true;
                next.error = None;
            }
            SearchAction::Loaded(query, results) => {
                next.listing.apply(query, results);
                next.is_loading = false;
                next.error = None;
            }
            SearchAction::Failed(error) => {
                next.is_loading = false;
                next.error = Some(error);
            }
            SearchAction::Cleared => {
                next = SearchView::default();
            }
        }
        Rc::new(next)
    }
}

/// Hook return type for a site search box
pub struct SiteSearchHandle {
    pub view: SearchView,
    /// Feed the raw contents of the search box.
    pub search: Callback<String>,
    /// Fetch the next page of the current term, if there is one.
    pub load_more: Callback<()>,
}

/// Debounced, cached site search for a single search box.
///
/// Results are cached per term and page in the global [`State`] so every
/// row shares them. Each issued query takes a ticket from a
/// [`SearchSequence`]; a response that comes back after a newer query was
/// issued is cached but not shown.
#[hook]
pub fn use_site_search() -> SiteSearchHandle {
    let dispatch = use_dispatch::<State>();
    let view = use_reducer(SearchView::default);
    let sequence = use_mut_ref(SearchSequence::default);
    let pending = use_mut_ref(|| None::<Timeout>);

    let fetch_page = {
        let view = view.clone();
        let sequence = sequence.clone();
        use_callback((), move |query: SiteSearchQuery, _| {
            let ticket = sequence.borrow_mut().issue();

            if let Some(cached) =
                dispatch.get().get_search_results(&query).cloned()
            {
                tracing::debug!(
                    term = %query.term,
                    page = query.page,
                    "Site search served from cache"
                );
                view.dispatch(SearchAction::Loaded(query, cached));
                return;
            }

            view.dispatch(SearchAction::Started);

            let view = view.clone();
            let sequence = sequence.clone();
            let dispatch = dispatch.clone();

            yew::platform::spawn_local(async move {
                tracing::debug!(
                    term = %query.term,
                    page = query.page,
                    "Searching sites"
                );
                let api_client = get_api_client();
                match api_client.search_sites(&query).await {
                    Ok(results) => {
                        let shown = sequence.borrow().settle(
                            ticket,
                            &query,
                            results,
                            |query, results| {
                                dispatch.reduce_mut(move |state| {
                                    state.cache_search_results(query, results)
                                });
                            },
                        );
                        match shown {
                            Some(results) => {
                                view.dispatch(SearchAction::Loaded(query, results));
                            }
                            None => tracing::debug!(
                                term = %query.term,
                                page = query.page,
                                "Discarding stale site search response"
                            ),
                        }
                    }
                    Err(e) if sequence.borrow().is_current(ticket) => {
                        tracing::warn!("Site search failed: {e}");
                        view.dispatch(SearchAction::Failed(e.to_string()));
                    }
                    Err(e) => {
                        tracing::debug!("Ignoring failure of a stale site search: {e}");
                    }
                }
            });
        })
    };

    let search = {
        let view = view.clone();
        let fetch_page = fetch_page.clone();
        use_callback((), move |term: String, _| {
            if !is_searchable(&term) {
                pending.borrow_mut().take();
                sequence.borrow_mut().invalidate();
                view.dispatch(SearchAction::Cleared);
                return;
            }

            let fetch_page = fetch_page.clone();
            *pending.borrow_mut() = Some(Timeout::new(SEARCH_DEBOUNCE_MS, move || {
                fetch_page.emit(SiteSearchQuery::first_page(term))
            }));
        })
    };

    let load_more = {
        let next_query = view.listing.next_query();
        Callback::from(move |_| {
            if let Some(query) = next_query.clone() {
                fetch_page.emit(query);
            }
        })
    };

    SiteSearchHandle {
        view: (*view).clone(),
        search,
        load_more,
    }
}
