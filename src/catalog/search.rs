/// Incremental catalog search
///
/// Accumulates search results one API page at a time, driven by a
/// "near the end of the visible list" signal from the presentation layer.
/// The loader itself never talks to the network: it hands out at most one
/// `PageRequest` at a time and folds the response back in, which is what
/// enforces the two concurrency rules that matter here:
///
/// - `loading` is the sole guard against duplicate in-flight requests; it is
///   taken in `next_request` and released only in `apply`, error path
///   included.
/// - A `generation` counter stamps each request, so a response that lands
///   after the query has changed is discarded instead of corrupting the
///   accumulated list.

use log::{debug, warn};

use crate::catalog::api::CatalogApi;
use crate::catalog::book::{Book, SearchResponse};
use crate::error::Result;

/// A claimed in-flight request for one page of results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub query: String,
    pub page: u32,
    generation: u64,
}

/// State of an incremental catalog search
#[derive(Debug)]
pub struct SearchLoader {
    query: String,
    cursor: u32,
    accumulated: Vec<Book>,
    has_more: bool,
    loading: bool,
    generation: u64,
}

impl SearchLoader {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            cursor: 1,
            accumulated: Vec::new(),
            has_more: true,
            loading: false,
            generation: 0,
        }
    }

    /// Replace the search query, discarding all accumulated state.
    ///
    /// The cursor rewinds to page 1 and any still in-flight request is
    /// invalidated; its response will be dropped when applied. `loading`
    /// is deliberately left alone — the in-flight request owns the flag
    /// and releases it in `apply`.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.cursor = 1;
        self.accumulated.clear();
        self.has_more = true;
        self.generation += 1;
    }

    /// Claim the next page request, or `None` when a request is already in
    /// flight or the catalog reported no further pages.
    pub fn next_request(&mut self) -> Option<PageRequest> {
        if self.loading || !self.has_more {
            return None;
        }
        self.loading = true;
        Some(PageRequest {
            query: self.query.clone(),
            page: self.cursor,
            generation: self.generation,
        })
    }

    /// Fold a completed request back into the loader.
    ///
    /// Always releases the `loading` guard. A response whose request predates
    /// the current query is discarded wholesale. On success the results are
    /// appended (duplicates are not filtered), the cursor advances, and
    /// `next` decides whether more pages exist. On failure `has_more` is left
    /// unchanged so the caller may retry manually.
    pub fn apply(&mut self, request: PageRequest, result: Result<SearchResponse>) -> Result<()> {
        self.loading = false;

        if request.generation != self.generation {
            debug!(
                "discarding stale results for query {:?} page {}",
                request.query, request.page
            );
            return Ok(());
        }

        match result {
            Ok(page) => {
                self.accumulated.extend(page.results);
                self.cursor += 1;
                self.has_more = page.next.is_some();
                Ok(())
            }
            Err(err) => {
                warn!(
                    "search page {} for {:?} failed: {}",
                    request.page, request.query, err
                );
                Err(err)
            }
        }
    }

    /// Claim, execute, and apply the next page request against `api`.
    ///
    /// A no-op returning `Ok(())` when nothing should be fetched.
    pub async fn fetch_next_page(&mut self, api: &impl CatalogApi) -> Result<()> {
        let Some(request) = self.next_request() else {
            return Ok(());
        };
        let result = api.search_page(&request.query, request.page).await;
        self.apply(request, result)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Results accumulated so far, in arrival order
    pub fn books(&self) -> &[Book] {
        &self.accumulated
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Next page number that would be requested (1-based)
    pub fn cursor(&self) -> u32 {
        self.cursor
    }
}

impl Default for SearchLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::ReaderError;

    fn book(id: u64) -> Book {
        Book {
            id,
            title: format!("Book {}", id),
            authors: vec![],
            formats: Default::default(),
        }
    }

    fn page_of(count: u64, start: u64, next: Option<&str>) -> SearchResponse {
        SearchResponse {
            results: (start..start + count).map(book).collect(),
            next: next.map(String::from),
        }
    }

    /// Scripted catalog that counts how many requests actually went out
    struct MockCatalog {
        calls: AtomicUsize,
        responses: Mutex<VecDeque<Result<SearchResponse>>>,
    }

    impl MockCatalog {
        fn scripted(responses: Vec<Result<SearchResponse>>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                responses: Mutex::new(responses.into()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CatalogApi for MockCatalog {
        async fn search_page(&self, _query: &str, _page: u32) -> Result<SearchResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ReaderError::Network("unscripted request".into())))
        }
    }

    #[tokio::test]
    async fn test_accumulates_successive_pages() {
        let api = MockCatalog::scripted(vec![
            Ok(page_of(20, 0, Some("page=2"))),
            Ok(page_of(20, 20, None)),
        ]);
        let mut loader = SearchLoader::new();
        loader.set_query("alice");

        loader.fetch_next_page(&api).await.unwrap();
        assert_eq!(loader.books().len(), 20);
        assert!(loader.has_more());
        assert_eq!(loader.cursor(), 2);

        loader.fetch_next_page(&api).await.unwrap();
        assert_eq!(loader.books().len(), 40);
        assert!(!loader.has_more());
    }

    #[tokio::test]
    async fn test_no_request_past_the_last_page() {
        let api = MockCatalog::scripted(vec![Ok(page_of(5, 0, None))]);
        let mut loader = SearchLoader::new();
        loader.set_query("alice");

        loader.fetch_next_page(&api).await.unwrap();
        loader.fetch_next_page(&api).await.unwrap();

        assert_eq!(api.call_count(), 1);
        assert_eq!(loader.books().len(), 5);
    }

    #[tokio::test]
    async fn test_in_flight_request_blocks_another() {
        let api = MockCatalog::scripted(vec![]);
        let mut loader = SearchLoader::new();
        loader.set_query("alice");

        let claimed = loader.next_request();
        assert!(claimed.is_some());
        assert!(loader.is_loading());

        // Second claim while the first is unresolved must not go out.
        assert!(loader.next_request().is_none());
        loader.fetch_next_page(&api).await.unwrap();
        assert_eq!(api.call_count(), 0);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut loader = SearchLoader::new();
        loader.set_query("x");
        let stale = loader.next_request().unwrap();

        loader.set_query("y");
        loader
            .apply(stale, Ok(page_of(20, 0, Some("page=2"))))
            .unwrap();

        // The old query's books never surface, but the guard is released
        // so the new query can proceed.
        assert!(loader.books().is_empty());
        assert!(!loader.is_loading());
        assert_eq!(loader.next_request().unwrap().query, "y");
    }

    #[test]
    fn test_failure_releases_guard_and_keeps_has_more() {
        let mut loader = SearchLoader::new();
        loader.set_query("alice");
        let request = loader.next_request().unwrap();

        let outcome = loader.apply(request, Err(ReaderError::Network("down".into())));
        assert!(outcome.is_err());
        assert!(!loader.is_loading());
        assert!(loader.has_more());
        assert_eq!(loader.cursor(), 1);

        // Manual retry is allowed.
        assert!(loader.next_request().is_some());
    }

    #[tokio::test]
    async fn test_set_query_resets_accumulated_state() {
        let api = MockCatalog::scripted(vec![
            Ok(page_of(20, 0, Some("page=2"))),
            Ok(page_of(3, 100, None)),
        ]);
        let mut loader = SearchLoader::new();
        loader.set_query("alice");
        loader.fetch_next_page(&api).await.unwrap();
        assert_eq!(loader.cursor(), 2);

        loader.set_query("moby");
        assert!(loader.books().is_empty());
        assert_eq!(loader.cursor(), 1);
        assert!(loader.has_more());

        loader.fetch_next_page(&api).await.unwrap();
        assert_eq!(loader.books().len(), 3);
    }
}
