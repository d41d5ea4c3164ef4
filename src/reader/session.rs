/// Reading session controller
///
/// One session owns the state of one open book: the fetched text split into
/// pages, the current page index, and that book's bookmark set. A session is
/// constructed per book-open and discarded on close; nothing lives in
/// ambient globals. Navigation before the content has settled is meaningless
/// and is guarded by the Loading/Ready/Error state machine.

use std::collections::BTreeSet;

use log::warn;

use crate::catalog::api::ContentSource;
use crate::catalog::book::{Book, BookId};
use crate::error::{ReaderError, Result};
use crate::reader::paginator::paginate;
use crate::reader::viewport::Viewport;
use crate::storage::bookmarks::Bookmarks;
use crate::storage::kv::KeyValueStore;

/// Explicit payload for opening a book in the reader.
///
/// Replaces loosely-typed navigation parameters: the book id is resolved
/// up front, so a malformed catalog entry fails at selection time instead
/// of somewhere inside the open sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenBookRequest {
    pub book_id: BookId,
    pub title: String,
}

impl OpenBookRequest {
    pub fn new(book_id: BookId, title: impl Into<String>) -> Self {
        Self {
            book_id,
            title: title.into(),
        }
    }

    /// Build the open request for a catalog entry.
    ///
    /// Fails with [`ReaderError::MalformedBookReference`] when no numeric
    /// book id can be extracted from the entry.
    pub fn for_book(book: &Book) -> Result<Self> {
        Ok(Self::new(book.book_id()?, book.title.clone()))
    }
}

/// Lifecycle of an open book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Content not yet fetched; navigation is not meaningful
    Loading,
    /// Pages and bookmarks resolved; the user is reading
    Ready,
    /// The open sequence failed; retried only on explicit request
    Error,
}

/// Per-book reading state: pages, position, and bookmarks
#[derive(Debug)]
pub struct ReadingSession {
    request: OpenBookRequest,
    viewport: Viewport,
    state: SessionState,
    failure: Option<ReaderError>,
    pages: Vec<String>,
    current_page: usize,
    bookmarks: BTreeSet<usize>,
}

impl ReadingSession {
    /// Start a session in `Loading`; call [`ensure_loaded`](Self::ensure_loaded)
    /// to resolve it.
    pub fn new(request: OpenBookRequest, viewport: Viewport) -> Self {
        Self {
            request,
            viewport,
            state: SessionState::Loading,
            failure: None,
            pages: Vec::new(),
            current_page: 0,
            bookmarks: BTreeSet::new(),
        }
    }

    /// Idempotent entry point that settles the session.
    ///
    /// From `Loading` this fetches the book body, paginates it with the
    /// viewport-derived capacity, and loads the persisted bookmark set
    /// (a storage fault there degrades to an empty set with a warning —
    /// reading availability beats bookmark completeness). From `Ready` it
    /// does nothing. From `Error` it returns the recorded failure without
    /// re-fetching; recovery is an explicit [`retry`](Self::retry).
    pub async fn ensure_loaded<S: KeyValueStore>(
        &mut self,
        content: &impl ContentSource,
        store: &Bookmarks<S>,
    ) -> Result<()> {
        match self.state {
            SessionState::Ready => return Ok(()),
            SessionState::Error => {
                return Err(self
                    .failure
                    .clone()
                    .unwrap_or_else(|| ReaderError::Network("book open failed".into())));
            }
            SessionState::Loading => {}
        }

        match self.load(content, store).await {
            Ok(()) => {
                self.state = SessionState::Ready;
                Ok(())
            }
            Err(err) => {
                self.state = SessionState::Error;
                self.failure = Some(err.clone());
                Err(err)
            }
        }
    }

    async fn load<S: KeyValueStore>(
        &mut self,
        content: &impl ContentSource,
        store: &Bookmarks<S>,
    ) -> Result<()> {
        let text = content.fetch_text(&self.request.book_id).await?;
        let pages = paginate(&text, self.viewport.page_capacity())?;

        self.bookmarks = match store.load(&self.request.book_id) {
            Ok(set) => set,
            Err(err) => {
                warn!(
                    "could not load bookmarks for book {}: {}",
                    self.request.book_id, err
                );
                BTreeSet::new()
            }
        };

        self.pages = pages;
        self.current_page = 0;
        Ok(())
    }

    /// Rearm a failed session for another open attempt.
    pub fn retry(&mut self) {
        if self.state == SessionState::Error {
            self.state = SessionState::Loading;
            self.failure = None;
        }
    }

    /// Jump to a page, clamping out-of-range input to the valid range.
    ///
    /// Slider and swipe input may overshoot; that is navigation, not an
    /// error, so the index is clamped rather than rejected. Returns the
    /// effective page index.
    pub fn goto_page(&mut self, index: usize) -> usize {
        let last = self.pages.len().saturating_sub(1);
        self.current_page = index.min(last);
        self.current_page
    }

    /// Flip a page's bookmark and persist the book's full set.
    ///
    /// The in-memory flip and the persisted state must agree: when the save
    /// fails the flip is rolled back and the error surfaced, so the UI never
    /// shows a bookmark that was not written. Returns whether the page is
    /// now bookmarked.
    pub fn toggle_bookmark<S: KeyValueStore>(
        &mut self,
        index: usize,
        store: &mut Bookmarks<S>,
    ) -> Result<bool> {
        let added = if self.bookmarks.contains(&index) {
            self.bookmarks.remove(&index);
            false
        } else {
            self.bookmarks.insert(index);
            true
        };

        if let Err(err) = store.save(&self.request.book_id, &self.bookmarks) {
            if added {
                self.bookmarks.remove(&index);
            } else {
                self.bookmarks.insert(index);
            }
            return Err(err);
        }

        Ok(added)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn book_id(&self) -> &BookId {
        &self.request.book_id
    }

    pub fn title(&self) -> &str {
        &self.request.title
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Text of the currently displayed page
    pub fn page_text(&self) -> Option<&str> {
        self.pages.get(self.current_page).map(String::as_str)
    }

    pub fn bookmarks(&self) -> &BTreeSet<usize> {
        &self.bookmarks
    }

    pub fn is_bookmarked(&self, index: usize) -> bool {
        self.bookmarks.contains(&index)
    }

    /// Human-readable position, e.g. `"3 / 12"` (1-based, as displayed)
    pub fn page_indicator(&self) -> String {
        format!("{} / {}", self.current_page + 1, self.pages.len())
    }
}
