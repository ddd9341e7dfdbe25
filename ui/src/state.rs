use payloads::{
    SiteSearchQuery, responses::SiteSearchResults, search::SiteSearchCache,
};
use yewdux::prelude::*;

/// Page-wide state shared by every site row.
#[derive(Default, Clone, PartialEq, Store)]
pub struct State {
    // === Site search (managed by use_site_search) ===
    pub site_search: SiteSearchCache,
}

impl State {
    pub fn get_search_results(
        &self,
        query: &SiteSearchQuery,
    ) -> Option<&SiteSearchResults> {
        self.site_search.get(query)
    }

    pub fn cache_search_results(
        &mut self,
        query: SiteSearchQuery,
        results: SiteSearchResults,
    ) {
        self.site_search.insert(query, results);
    }
}
