/// Persistence module
///
/// This module handles everything the client stores on device:
/// - Host key-value abstraction and in-memory implementation (kv.rs)
/// - Durable SQLite-backed store (sqlite.rs)
/// - Per-book bookmark sets layered on top (bookmarks.rs)

pub mod bookmarks;
pub mod kv;
pub mod sqlite;

pub use bookmarks::Bookmarks;
pub use kv::{KeyValueStore, MemoryStore};
pub use sqlite::SqliteStore;
