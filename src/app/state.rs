use crate::arena::models::PlaylistSummary;
use crate::browse::{PageIntent, pagination, search};
use crate::playback::{Navigator, View};

/// Playlist list state: the full channel, its search view and the current page.
#[derive(Debug, Clone, Default)]
pub struct BrowseState {
    /// Every playlist in the channel, newest first. Search always runs against this.
    pub playlists: Vec<PlaylistSummary>,
    pub search_list: Vec<PlaylistSummary>,
    pub search_query: String,
    pub item_count: usize,
    pub per_page: usize,
    pub active_page: usize,
    pub page_items: Vec<PlaylistSummary>,
    pub loaded: bool,
    pending_page: Option<usize>,
}

impl BrowseState {
    pub fn new(per_page: usize) -> Self {
        Self {
            per_page,
            active_page: 1,
            ..Self::default()
        }
    }

    pub fn set_catalog(&mut self, count: usize, mut playlists: Vec<PlaylistSummary>) {
        playlists.reverse();
        self.item_count = count;
        self.playlists = playlists;
        self.search_list = search::filter(&self.playlists, &self.search_query);
        self.loaded = true;
    }

    pub fn apply_search(&mut self, query: &str) {
        self.search_query = query.to_string();
        self.search_list = search::filter(&self.playlists, query);
    }

    pub fn page_count(&self) -> usize {
        pagination::page_count(self.item_count, self.per_page)
    }

    /// Resolve `intent` and mark that page as requested. Returns the page to fetch.
    ///
    /// Relative moves count from a page still in flight, so repeated presses add up.
    pub fn begin_page(&mut self, intent: PageIntent) -> usize {
        let from = self.pending_page.unwrap_or(self.active_page);
        let page = pagination::resolve_intent(intent, from, self.page_count());
        self.pending_page = Some(page);
        page
    }

    /// Apply a fetched page if it is the latest one requested.
    pub fn complete_page(&mut self, page: usize, items: Vec<PlaylistSummary>) -> bool {
        if self.pending_page != Some(page) {
            tracing::warn!(page, pending = ?self.pending_page, "discarding stale page response");
            return false;
        }
        self.pending_page = None;
        self.active_page = page;
        self.page_items = items;
        true
    }

    pub fn fail_page(&mut self, page: usize) {
        if self.pending_page == Some(page) {
            self.pending_page = None;
        }
    }

    /// What the list view shows: search results while a query is set, else the current page.
    pub fn visible(&self) -> &[PlaylistSummary] {
        if !self.search_query.is_empty() || self.page_items.is_empty() {
            &self.search_list
        } else {
            &self.page_items
        }
    }
}

pub struct AppState {
    pub should_quit: bool,
    pub view: View,
    pub browse: BrowseState,
    pub nav: Navigator,
    pub volume: u8,
}

impl AppState {
    pub fn new(per_page: usize, volume: u8) -> Self {
        Self {
            should_quit: false,
            view: View::BrowsingList,
            browse: BrowseState::new(per_page),
            nav: Navigator::new(),
            volume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: u64, title: &str) -> PlaylistSummary {
        PlaylistSummary {
            id,
            slug: format!("pl-{id}"),
            title: title.to_string(),
            owner: "Owner".to_string(),
            length: 3,
        }
    }

    #[test]
    fn catalog_is_reversed_and_searchable() {
        let mut b = BrowseState::new(20);
        b.set_catalog(3, vec![summary(1, "Old"), summary(2, "Mid"), summary(3, "New")]);
        let ids: Vec<u64> = b.visible().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);

        b.apply_search("mid");
        assert_eq!(b.visible().len(), 1);
        b.apply_search("");
        assert_eq!(b.visible().len(), 3);
    }

    #[test]
    fn search_query_survives_catalog_reload() {
        let mut b = BrowseState::new(20);
        b.apply_search("new");
        b.set_catalog(2, vec![summary(1, "Old"), summary(3, "New")]);
        assert_eq!(b.visible().len(), 1);
        assert_eq!(b.visible()[0].id, 3);
    }

    #[test]
    fn page_requests_are_clamped_and_latest_wins() {
        let mut b = BrowseState::new(20);
        b.set_catalog(45, Vec::new());
        assert_eq!(b.page_count(), 3);

        assert_eq!(b.begin_page(PageIntent::Prev), 1);
        assert_eq!(b.begin_page(PageIntent::Page(9)), 3);
        assert!(!b.complete_page(1, vec![summary(1, "a")]));
        assert_eq!(b.active_page, 1);
        assert!(b.complete_page(3, vec![summary(9, "z")]));
        assert_eq!(b.active_page, 3);
        assert_eq!(b.visible()[0].id, 9);

        assert_eq!(b.begin_page(PageIntent::Next), 3);
    }

    #[test]
    fn repeated_next_counts_from_pending_page() {
        let mut b = BrowseState::new(10);
        b.set_catalog(50, Vec::new());
        assert_eq!(b.begin_page(PageIntent::Next), 2);
        assert_eq!(b.begin_page(PageIntent::Next), 3);
        assert!(!b.complete_page(2, Vec::new()));
        assert!(b.complete_page(3, vec![summary(3, "c")]));
        assert_eq!(b.begin_page(PageIntent::Prev), 2);
    }

    #[test]
    fn failed_page_keeps_previous() {
        let mut b = BrowseState::new(10);
        b.set_catalog(30, Vec::new());
        let p = b.begin_page(PageIntent::Next);
        assert_eq!(p, 2);
        b.fail_page(p);
        assert_eq!(b.active_page, 1);
        assert!(!b.complete_page(2, Vec::new()));
    }
}
