//! Notes browser state: search, paging, tag filter, and fetch policy.
//!
//! The browser owns no I/O. It decides which query key should be on screen,
//! consults the shared cache, and hands back [`FetchRequest`]s for the event
//! loop to run. Results come back through [`NotesBrowser::apply_fetch_result`]
//! and are accepted only from the request that is still current.

use std::time::{Duration, Instant};

use notehub_cache::{CacheResult, QueryCache, Watermark};
use notehub_core::{Note, NoteHubResult, NotesPage, QueryKey, TagFilter};

use crate::creator::NoteCreator;
use crate::debounce::Debouncer;

pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch notes";
pub const EMPTY_STATE_MESSAGE: &str = "No notes found. Create your first note!";

/// Server-rendered first page handed to the browser at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialData {
    pub key: QueryKey,
    pub page: NotesPage,
}

/// A fetch the event loop should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub id: u64,
    pub key: QueryKey,
    /// Namespace watermark when the request was issued.
    pub watermark: Watermark,
}

/// Latest request id wins.
///
/// Issuing a request for a new key supersedes whatever was in flight; the
/// superseded result is dropped when it arrives.
#[derive(Debug, Default)]
pub struct RequestTracker {
    last_id: u64,
    in_flight: Option<FetchRequest>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, key: QueryKey, watermark: Watermark) -> FetchRequest {
        self.last_id += 1;
        let request = FetchRequest {
            id: self.last_id,
            key,
            watermark,
        };
        self.in_flight = Some(request.clone());
        request
    }

    pub fn in_flight(&self) -> Option<&FetchRequest> {
        self.in_flight.as_ref()
    }

    pub fn is_current(&self, id: u64) -> bool {
        self.in_flight.as_ref().is_some_and(|r| r.id == id)
    }

    /// Stop waiting for the in-flight request, if any.
    pub fn supersede(&mut self) -> Option<FetchRequest> {
        self.in_flight.take()
    }

    /// Accept the result for `id` if it is still current.
    pub fn complete(&mut self, id: u64) -> Option<FetchRequest> {
        if self.is_current(id) {
            self.in_flight.take()
        } else {
            None
        }
    }

    pub fn last_id(&self) -> u64 {
        self.last_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FetchFailure {
    key: QueryKey,
    message: String,
}

/// What the note list area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserBody<'a> {
    /// Nothing fetched yet.
    Blank,
    Error(&'a str),
    Empty,
    Notes(&'a [Note]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserView<'a> {
    pub loading: bool,
    pub body: BrowserBody<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub current: u32,
    pub total: u32,
}

pub struct NotesBrowser {
    cache: QueryCache<QueryKey, NotesPage>,
    search_input: String,
    search: Debouncer<String>,
    page: u32,
    tag: TagFilter,
    displayed: Option<(QueryKey, NotesPage)>,
    failure: Option<FetchFailure>,
    requests: RequestTracker,
    selected: usize,
    creator: Option<NoteCreator>,
}

impl NotesBrowser {
    /// Start on page 1 of `tag` with an empty search.
    ///
    /// `initial` seeds the cache only when it was fetched for exactly that key.
    pub fn new(
        cache: QueryCache<QueryKey, NotesPage>,
        tag: TagFilter,
        search_debounce: Duration,
        initial: Option<InitialData>,
    ) -> CacheResult<Self> {
        let mut browser = Self {
            cache,
            search_input: String::new(),
            search: Debouncer::new(String::new(), search_debounce),
            page: 1,
            tag,
            displayed: None,
            failure: None,
            requests: RequestTracker::new(),
            selected: 0,
            creator: None,
        };
        if let Some(initial) = initial {
            let start = browser.query_key();
            if initial.key == start {
                browser.cache.put(start.clone(), initial.page.clone())?;
                browser.displayed = Some((start, initial.page));
            } else {
                tracing::debug!(key = %initial.key, start = %start, "Ignoring initial data for another key");
            }
        }
        Ok(browser)
    }

    /// Key for the effective (debounced) search, page, and tag.
    pub fn query_key(&self) -> QueryKey {
        QueryKey::new(self.search.settled().clone(), self.page, self.tag.tag())
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn effective_search(&self) -> &str {
        self.search.settled()
    }

    pub fn is_search_pending(&self) -> bool {
        self.search.is_pending()
    }

    pub fn search_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn tag(&self) -> TagFilter {
        self.tag
    }

    pub fn is_loading(&self) -> bool {
        self.requests.in_flight().is_some()
    }

    /// Replace the raw search text. The page goes back to 1 immediately; the
    /// effective search follows after the debounce delay.
    pub fn set_search_input(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        if text == self.search_input {
            return;
        }
        self.search_input = text.clone();
        self.page = 1;
        self.selected = 0;
        self.search.push(text, now);
    }

    pub fn push_search_char(&mut self, c: char, now: Instant) {
        let mut text = self.search_input.clone();
        text.push(c);
        self.set_search_input(text, now);
    }

    pub fn pop_search_char(&mut self, now: Instant) {
        let mut text = self.search_input.clone();
        if text.pop().is_some() {
            self.set_search_input(text, now);
        }
    }

    /// Settle the debounced search. Returns true when the effective search changed.
    pub fn poll_search(&mut self, now: Instant) -> bool {
        match self.search.poll(now) {
            Some(search) => {
                tracing::debug!(search = %search, "Search settled");
                true
            }
            None => false,
        }
    }

    pub fn set_tag(&mut self, tag: TagFilter) {
        if tag == self.tag {
            return;
        }
        self.tag = tag;
        self.page = 1;
        self.selected = 0;
    }

    /// Move to `page`, clamped to the known page range.
    pub fn set_page(&mut self, page: u32) {
        let last = self.total_pages().max(1);
        let page = page.clamp(1, last);
        if page != self.page {
            self.page = page;
            self.selected = 0;
        }
    }

    /// Total pages as reported by the page on screen, 0 when nothing is shown.
    pub fn total_pages(&self) -> u32 {
        self.displayed.as_ref().map_or(0, |(_, page)| page.total_pages)
    }

    /// Pagination is offered only when there is more than one page.
    pub fn pagination(&self) -> Option<PageInfo> {
        let total = self.total_pages();
        (total > 1).then_some(PageInfo {
            current: self.page.min(total),
            total,
        })
    }

    /// Reconcile the screen with the current key.
    ///
    /// A fresh cache entry is shown with no request. A stale or missing one
    /// yields a request while whatever is on screen stays visible. Nothing is
    /// issued while the same key is already in flight, or after its last
    /// request failed (see [`NotesBrowser::refresh`]). An in-flight request
    /// issued before the namespace was invalidated is replaced.
    pub fn next_fetch(&mut self) -> CacheResult<Option<FetchRequest>> {
        let key = self.query_key();
        let watermark = self.cache.watermark(&key)?;
        if let Some(in_flight) = self.requests.in_flight() {
            if in_flight.key == key && in_flight.watermark >= watermark {
                return Ok(None);
            }
            if let Some(superseded) = self.requests.supersede() {
                tracing::debug!(id = superseded.id, key = %superseded.key, "Superseded in-flight request");
            }
        }

        if let Some(failure) = &self.failure {
            if failure.key == key {
                return Ok(None);
            }
            self.failure = None;
        }

        let needs_fetch = match self.cache.get(&key)? {
            Some(read) => {
                let stale = read.is_stale();
                self.show(key.clone(), read.into_value());
                stale
            }
            None => true,
        };
        if !needs_fetch {
            return Ok(None);
        }

        let request = self.requests.issue(key, watermark);
        tracing::debug!(id = request.id, key = %request.key, "Fetch issued");
        Ok(Some(request))
    }

    /// Re-issue the current key regardless of cache state or a prior failure.
    pub fn refresh(&mut self) -> CacheResult<Option<FetchRequest>> {
        let key = self.query_key();
        let watermark = self.cache.watermark(&key)?;
        if self
            .requests
            .in_flight()
            .is_some_and(|r| r.key == key && r.watermark >= watermark)
        {
            return Ok(None);
        }
        self.failure = None;
        let request = self.requests.issue(key, watermark);
        tracing::debug!(id = request.id, key = %request.key, "Refresh issued");
        Ok(Some(request))
    }

    /// Accept a fetch result. Returns false when it was superseded and dropped.
    pub fn apply_fetch_result(
        &mut self,
        id: u64,
        result: NoteHubResult<NotesPage>,
    ) -> CacheResult<bool> {
        let current = self.query_key();
        let is_current = self
            .requests
            .in_flight()
            .is_some_and(|r| r.id == id && r.key == current);
        let accepted = if is_current {
            self.requests.complete(id)
        } else {
            None
        };
        let Some(request) = accepted else {
            tracing::debug!(id, latest = self.requests.last_id(), "Discarding superseded fetch result");
            return Ok(false);
        };

        match result {
            Ok(page) => {
                self.cache
                    .put_observed(request.key.clone(), page.clone(), request.watermark)?;
                self.failure = None;
                self.show(request.key, page);
            }
            Err(err) => {
                tracing::warn!(id, key = %request.key, error = %err, "Fetch failed");
                self.failure = Some(FetchFailure {
                    key: request.key,
                    message: err.to_string(),
                });
            }
        }
        Ok(true)
    }

    fn show(&mut self, key: QueryKey, page: NotesPage) {
        let changed = self.displayed.as_ref().map_or(true, |(k, _)| *k != key);
        if changed || self.selected >= page.notes.len() {
            self.selected = 0;
        }
        self.displayed = Some((key, page));
    }

    /// Detailed message of the current key's failed fetch.
    pub fn failure_detail(&self) -> Option<&str> {
        self.current_failure().map(|f| f.message.as_str())
    }

    fn current_failure(&self) -> Option<&FetchFailure> {
        self.failure.as_ref().filter(|f| f.key == self.query_key())
    }

    pub fn view(&self) -> BrowserView<'_> {
        let body = if self.current_failure().is_some() {
            BrowserBody::Error(FETCH_ERROR_MESSAGE)
        } else {
            match &self.displayed {
                None => BrowserBody::Blank,
                Some((_, page)) if page.is_empty() => BrowserBody::Empty,
                Some((_, page)) => BrowserBody::Notes(&page.notes),
            }
        };
        BrowserView {
            loading: self.is_loading(),
            body,
        }
    }

    fn displayed_notes(&self) -> &[Note] {
        self.displayed.as_ref().map_or(&[], |(_, page)| &page.notes)
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_note(&self) -> Option<&Note> {
        if self.current_failure().is_some() {
            return None;
        }
        self.displayed_notes().get(self.selected)
    }

    pub fn select_next(&mut self) {
        let len = self.displayed_notes().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn open_creator(&mut self) {
        if self.creator.is_none() {
            self.creator = Some(NoteCreator::new(self.cache.clone()));
        }
    }

    /// Close the modal, discarding its draft.
    pub fn close_creator(&mut self) -> Option<NoteCreator> {
        self.creator.take()
    }

    pub fn creator(&self) -> Option<&NoteCreator> {
        self.creator.as_ref()
    }

    pub fn creator_mut(&mut self) -> Option<&mut NoteCreator> {
        self.creator.as_mut()
    }

    pub fn cache(&self) -> &QueryCache<QueryKey, NotesPage> {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notehub_core::{ApiError, NoteTag, NOTES_NAMESPACE};
    use notehub_test_utils::fixtures;

    const DEBOUNCE: Duration = Duration::from_millis(700);

    fn cache() -> QueryCache<QueryKey, NotesPage> {
        QueryCache::with_defaults()
    }

    fn browser() -> NotesBrowser {
        NotesBrowser::new(cache(), TagFilter::All, DEBOUNCE, None).unwrap()
    }

    fn failure() -> NoteHubResult<NotesPage> {
        Err(ApiError::RequestFailed {
            endpoint: "/notes".to_string(),
            status: 500,
            message: "boom".to_string(),
        }
        .into())
    }

    #[test]
    fn test_tracker_latest_wins() {
        let mut tracker = RequestTracker::new();
        let first = tracker.issue(QueryKey::default(), Watermark::zero());
        let second = tracker.issue(QueryKey::new("a", 1, None), Watermark::zero());
        assert!(!tracker.is_current(first.id));
        assert!(tracker.complete(first.id).is_none());
        assert_eq!(tracker.complete(second.id), Some(second));
        assert!(tracker.in_flight().is_none());
    }

    #[test]
    fn test_initial_data_renders_without_loading() {
        let page = fixtures::page(fixtures::notes(3), 1);
        let initial = InitialData {
            key: QueryKey::first_page(None),
            page: page.clone(),
        };
        let mut browser = NotesBrowser::new(cache(), TagFilter::All, DEBOUNCE, Some(initial)).unwrap();

        assert_eq!(browser.next_fetch().unwrap(), None);
        let view = browser.view();
        assert!(!view.loading);
        assert_eq!(view.body, BrowserBody::Notes(&page.notes));
    }

    #[test]
    fn test_initial_data_for_other_key_is_ignored() {
        let initial = InitialData {
            key: QueryKey::first_page(Some(NoteTag::Work)),
            page: fixtures::page(fixtures::notes(1), 1),
        };
        let mut browser = NotesBrowser::new(cache(), TagFilter::All, DEBOUNCE, Some(initial)).unwrap();
        assert_eq!(browser.view().body, BrowserBody::Blank);
        assert!(browser.next_fetch().unwrap().is_some());
        assert!(browser.view().loading);
    }

    #[test]
    fn test_missing_entry_fetches_once() {
        let mut browser = browser();
        let request = browser.next_fetch().unwrap().unwrap();
        assert_eq!(request.key, QueryKey::first_page(None));
        assert_eq!(browser.next_fetch().unwrap(), None);

        let page = fixtures::page(fixtures::notes(2), 1);
        assert!(browser.apply_fetch_result(request.id, Ok(page)).unwrap());
        assert!(!browser.view().loading);
        assert_eq!(browser.next_fetch().unwrap(), None);
    }

    #[test]
    fn test_search_resets_page_and_settles_after_delay() {
        let start = Instant::now();
        let mut browser = browser();
        let request = browser.next_fetch().unwrap().unwrap();
        browser
            .apply_fetch_result(request.id, Ok(fixtures::page(fixtures::notes(2), 4)))
            .unwrap();
        browser.set_page(3);
        assert_eq!(browser.page(), 3);

        browser.set_search_input("milk", start);
        assert_eq!(browser.page(), 1);
        assert_eq!(browser.effective_search(), "");
        assert!(!browser.poll_search(start + Duration::from_millis(500)));
        assert!(browser.poll_search(start + DEBOUNCE));
        assert_eq!(browser.query_key(), QueryKey::new("milk", 1, None));
    }

    #[test]
    fn test_tag_change_resets_page() {
        let mut browser = browser();
        let request = browser.next_fetch().unwrap().unwrap();
        browser
            .apply_fetch_result(request.id, Ok(fixtures::page(fixtures::notes(2), 5)))
            .unwrap();
        browser.set_page(4);
        browser.set_tag(TagFilter::Only(NoteTag::Work));
        assert_eq!(browser.page(), 1);
        assert_eq!(browser.query_key(), QueryKey::first_page(Some(NoteTag::Work)));
    }

    #[test]
    fn test_page_is_clamped_to_known_range() {
        let mut browser = browser();
        let request = browser.next_fetch().unwrap().unwrap();
        browser
            .apply_fetch_result(request.id, Ok(fixtures::page(fixtures::notes(2), 3)))
            .unwrap();
        browser.set_page(10);
        assert_eq!(browser.page(), 3);
        browser.set_page(0);
        assert_eq!(browser.page(), 1);
    }

    #[test]
    fn test_previous_page_stays_visible_while_loading() {
        let mut browser = browser();
        let first = browser.next_fetch().unwrap().unwrap();
        let page_one = fixtures::page(fixtures::notes(2), 2);
        browser.apply_fetch_result(first.id, Ok(page_one.clone())).unwrap();

        browser.set_page(2);
        let second = browser.next_fetch().unwrap().unwrap();
        assert_eq!(second.key.page, 2);
        let view = browser.view();
        assert!(view.loading);
        assert_eq!(view.body, BrowserBody::Notes(&page_one.notes));
    }

    #[test]
    fn test_superseded_result_is_discarded() {
        let mut browser = browser();
        let first = browser.next_fetch().unwrap().unwrap();
        browser.set_tag(TagFilter::Only(NoteTag::Work));
        let second = browser.next_fetch().unwrap().unwrap();

        let work = fixtures::page(vec![fixtures::note("w", "Work", NoteTag::Work)], 1);
        assert!(browser.apply_fetch_result(second.id, Ok(work.clone())).unwrap());
        let late = fixtures::page(fixtures::notes(5), 1);
        assert!(!browser.apply_fetch_result(first.id, Ok(late)).unwrap());

        assert_eq!(browser.view().body, BrowserBody::Notes(&work.notes));
        assert!(!browser.cache().contains(&first.key).unwrap());
    }

    #[test]
    fn test_failure_shows_error_without_retry() {
        let mut browser = browser();
        let request = browser.next_fetch().unwrap().unwrap();
        browser.apply_fetch_result(request.id, failure()).unwrap();

        let view = browser.view();
        assert!(!view.loading);
        assert_eq!(view.body, BrowserBody::Error(FETCH_ERROR_MESSAGE));
        assert!(browser.failure_detail().unwrap().contains("boom"));
        assert_eq!(browser.next_fetch().unwrap(), None);

        let retry = browser.refresh().unwrap().unwrap();
        browser
            .apply_fetch_result(retry.id, Ok(fixtures::empty_page()))
            .unwrap();
        assert_eq!(browser.view().body, BrowserBody::Empty);
    }

    #[test]
    fn test_failure_cleared_when_key_changes() {
        let mut browser = browser();
        let request = browser.next_fetch().unwrap().unwrap();
        browser.apply_fetch_result(request.id, failure()).unwrap();
        browser.set_tag(TagFilter::Only(NoteTag::Todo));
        assert!(browser.next_fetch().unwrap().is_some());
        assert!(!matches!(browser.view().body, BrowserBody::Error(_)));
    }

    #[test]
    fn test_invalidated_entry_is_shown_and_revalidated() {
        let mut browser = browser();
        let request = browser.next_fetch().unwrap().unwrap();
        let page = fixtures::page(fixtures::notes(2), 1);
        browser.apply_fetch_result(request.id, Ok(page.clone())).unwrap();

        browser.cache().invalidate_namespace(NOTES_NAMESPACE).unwrap();
        let refetch = browser.next_fetch().unwrap().unwrap();
        assert_eq!(refetch.key, request.key);
        let view = browser.view();
        assert!(view.loading);
        assert_eq!(view.body, BrowserBody::Notes(&page.notes));
    }

    #[test]
    fn test_invalidation_during_fetch_reissues_request() {
        let mut browser = browser();
        let before = browser.next_fetch().unwrap().unwrap();
        browser.cache().invalidate_namespace(NOTES_NAMESPACE).unwrap();

        let after = browser.next_fetch().unwrap().unwrap();
        assert_eq!(after.key, before.key);
        assert!(after.watermark > before.watermark);

        let old_page = fixtures::page(fixtures::notes(1), 1);
        assert!(!browser.apply_fetch_result(before.id, Ok(old_page)).unwrap());
        assert_eq!(browser.next_fetch().unwrap(), None);

        let new_page = fixtures::page(fixtures::notes(2), 1);
        assert!(browser.apply_fetch_result(after.id, Ok(new_page.clone())).unwrap());
        assert_eq!(browser.view().body, BrowserBody::Notes(&new_page.notes));
        assert_eq!(browser.next_fetch().unwrap(), None);
    }

    #[test]
    fn test_result_issued_before_invalidation_is_cached_stale() {
        let mut browser = browser();
        let request = browser.next_fetch().unwrap().unwrap();
        browser.cache().invalidate_namespace(NOTES_NAMESPACE).unwrap();
        let page = fixtures::page(fixtures::notes(1), 1);
        browser.apply_fetch_result(request.id, Ok(page)).unwrap();

        assert!(browser.cache().get(&request.key).unwrap().unwrap().is_stale());
        let refetch = browser.next_fetch().unwrap().unwrap();
        assert_eq!(refetch.key, request.key);
    }

    #[test]
    fn test_pagination_visibility() {
        let mut browser = browser();
        assert_eq!(browser.pagination(), None);
        let request = browser.next_fetch().unwrap().unwrap();
        browser
            .apply_fetch_result(request.id, Ok(fixtures::page(fixtures::notes(1), 1)))
            .unwrap();
        assert_eq!(browser.pagination(), None);

        let refresh = browser.refresh().unwrap().unwrap();
        browser
            .apply_fetch_result(refresh.id, Ok(fixtures::page(fixtures::notes(1), 2)))
            .unwrap();
        assert_eq!(browser.pagination(), Some(PageInfo { current: 1, total: 2 }));
    }

    #[test]
    fn test_selection_bounds() {
        let mut browser = browser();
        let request = browser.next_fetch().unwrap().unwrap();
        browser
            .apply_fetch_result(request.id, Ok(fixtures::page(fixtures::notes(3), 1)))
            .unwrap();
        browser.select_previous();
        assert_eq!(browser.selected_index(), 0);
        for _ in 0..5 {
            browser.select_next();
        }
        assert_eq!(browser.selected_note().unwrap().id, "note-3");
    }

    #[test]
    fn test_creator_modal_lifecycle() {
        let mut browser = browser();
        browser.open_creator();
        assert!(browser.creator().is_some());
        assert!(browser.close_creator().is_some());
        assert!(browser.creator().is_none());
    }
}
