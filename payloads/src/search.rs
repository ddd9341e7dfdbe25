//! Client-side bookkeeping for the site search: a per-query result cache,
//! sequence tickets to drop responses that arrive out of order, and the
//! accumulated listing shown under the search box.

use std::collections::HashMap;

use crate::{
    SiteSearchQuery,
    responses::{SiteSearchResults, SiteSummary},
};

/// Delay after the last keystroke before a query is issued.
pub const SEARCH_DEBOUNCE_MS: u32 = 250;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

/// Monotonic counter handed out to each issued query.
///
/// Only the most recently issued ticket is current; responses carrying an
/// older ticket belong to a superseded query.
#[derive(Debug, Default)]
pub struct SearchSequence {
    latest: u64,
}

impl SearchSequence {
    pub fn issue(&mut self) -> SearchTicket {
        self.latest += 1;
        SearchTicket(self.latest)
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Route a response for `ticket`: the results always go to `cache`, but
    /// are only returned for display while the ticket is still current.
    pub fn settle(
        &self,
        ticket: SearchTicket,
        query: &SiteSearchQuery,
        results: SiteSearchResults,
        cache: impl FnOnce(SiteSearchQuery, SiteSearchResults),
    ) -> Option<SiteSearchResults> {
        cache(query.clone(), results.clone());
        self.is_current(ticket).then_some(results)
    }

    /// Make every outstanding ticket stale without issuing a new one.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}

/// Results already fetched, keyed by term and page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteSearchCache {
    entries: HashMap<SiteSearchQuery, SiteSearchResults>,
}

impl SiteSearchCache {
    pub fn get(&self, query: &SiteSearchQuery) -> Option<&SiteSearchResults> {
        self.entries.get(query)
    }

    pub fn insert(&mut self, query: SiteSearchQuery, results: SiteSearchResults) {
        self.entries.insert(query, results);
    }
}

/// The candidates shown for the current term, across every loaded page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchListing {
    pub query: Option<SiteSearchQuery>,
    pub sites: Vec<SiteSummary>,
    pub more: bool,
}

impl SearchListing {
    /// Fold a page of results into the listing. The first page replaces
    /// whatever was shown; later pages of the same term are appended.
    pub fn apply(&mut self, query: SiteSearchQuery, results: SiteSearchResults) {
        let same_term = self
            .query
            .as_ref()
            .is_some_and(|current| current.term == query.term);
        if query.page > 1 && same_term {
            self.sites.extend(results.sites);
        } else {
            self.sites = results.sites;
        }
        self.more = results.pagination.more;
        self.query = Some(query);
    }

    /// Query for the page after the last one loaded, if the server has more.
    pub fn next_query(&self) -> Option<SiteSearchQuery> {
        self.query
            .as_ref()
            .filter(|_| self.more)
            .map(SiteSearchQuery::next_page)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SiteId, responses::Pagination};

    fn page(ids: &[i64], more: bool) -> SiteSearchResults {
        SiteSearchResults {
            sites: ids
                .iter()
                .map(|&id| SiteSummary {
                    id: SiteId(id),
                    code: format!("JKT{id:04}"),
                    name: format!("Tower {id}"),
                    location: None,
                })
                .collect(),
            pagination: Pagination { more },
        }
    }

    #[test]
    fn test_stale_ticket_is_not_current() {
        let mut sequence = SearchSequence::default();
        let first = sequence.issue();
        let second = sequence.issue();
        assert!(!sequence.is_current(first));
        assert!(sequence.is_current(second));
        assert!(first < second);

        sequence.invalidate();
        assert!(!sequence.is_current(second));
    }

    #[test]
    fn test_stale_response_is_cached_but_not_shown() {
        let mut sequence = SearchSequence::default();
        let mut cache = SiteSearchCache::default();
        let slow = SiteSearchQuery::first_page("tow");
        let fast = SiteSearchQuery::first_page("tower");
        let slow_ticket = sequence.issue();
        let fast_ticket = sequence.issue();

        let shown = sequence.settle(fast_ticket, &fast, page(&[1], false), |q, r| {
            cache.insert(q, r)
        });
        assert_eq!(shown.map(|r| r.sites.len()), Some(1));

        let shown = sequence.settle(slow_ticket, &slow, page(&[2, 3], false), |q, r| {
            cache.insert(q, r)
        });
        assert!(shown.is_none());
        assert_eq!(cache.get(&slow).unwrap().sites.len(), 2);
        assert_eq!(cache.get(&fast).unwrap().sites.len(), 1);
    }

    #[test]
    fn test_cache_is_keyed_by_term_and_page() {
        let mut cache = SiteSearchCache::default();
        let query = SiteSearchQuery::first_page("jkt");
        cache.insert(query.clone(), page(&[1, 2], true));

        assert_eq!(cache.get(&query).unwrap().sites.len(), 2);
        assert!(cache.get(&query.next_page()).is_none());
        assert!(cache.get(&SiteSearchQuery::first_page("jk")).is_none());
    }

    #[test]
    fn test_listing_appends_later_pages() {
        let mut listing = SearchListing::default();
        let first = SiteSearchQuery::first_page("tower");
        listing.apply(first.clone(), page(&[1, 2], true));
        assert_eq!(listing.next_query(), Some(first.next_page()));

        listing.apply(first.next_page(), page(&[3], false));
        let ids: Vec<_> = listing.sites.iter().map(|s| s.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(listing.next_query(), None);
    }

    #[test]
    fn test_listing_new_term_replaces() {
        let mut listing = SearchListing::default();
        listing.apply(SiteSearchQuery::first_page("tower"), page(&[1, 2], true));
        listing.apply(SiteSearchQuery::first_page("bts"), page(&[9], false));
        let ids: Vec<_> = listing.sites.iter().map(|s| s.id.0).collect();
        assert_eq!(ids, vec![9]);
    }
}
