//! dogear — reading-client core
//!
//! The engine behind a mobile reading app: searching a public book catalog,
//! paginating long plain-text book bodies into fixed-capacity pages, and
//! persisting per-book bookmarks on device. Screens and widgets live in the
//! host application; this crate owns the state and the algorithms.
//!
//! A typical flow:
//!
//! 1. [`catalog::SearchLoader`] accumulates catalog pages for a query,
//!    driven by a near-end-of-list signal from the UI.
//! 2. Selecting a book builds an [`reader::OpenBookRequest`], which pins
//!    down the numeric book id that keys both the content fetch and the
//!    bookmark records.
//! 3. A [`reader::ReadingSession`] fetches the body, paginates it for the
//!    current [`reader::Viewport`], loads that book's bookmarks, and then
//!    mediates page navigation and bookmark toggles.
//! 4. [`storage`] persists bookmark sets through whatever key-value
//!    facility the host supplies (SQLite by default).

pub mod catalog;
pub mod error;
pub mod reader;
pub mod remote;
pub mod storage;

pub use catalog::{Book, BookId, SearchLoader};
pub use error::{ReaderError, Result};
pub use reader::{OpenBookRequest, ReadingSession, SessionState, Viewport};
pub use storage::{Bookmarks, SqliteStore};
