/// SQLite-backed key-value store
///
/// The durable storage backend. A single `entries` table holds one row per
/// key; writes are full overwrites (INSERT OR REPLACE), matching the
/// overwrite semantics of the bookmark layer above it.

use std::path::PathBuf;

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};

use crate::error::Result;
use crate::storage::kv::KeyValueStore;

/// Durable key-value store persisted in a SQLite database file
pub struct SqliteStore {
    conn: Connection,
    db_path: Option<PathBuf>,
}

impl SqliteStore {
    /// Open (or create) a store at the default per-user location:
    /// - Linux: ~/.local/share/dogear/dogear.db
    /// - macOS: ~/Library/Application Support/dogear/dogear.db
    /// - Windows: %APPDATA%\dogear\dogear.db
    pub fn open_default() -> Result<Self> {
        let db_path = Self::default_db_path();

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| crate::error::ReaderError::Storage(e.to_string()))?;
        }

        let conn = Connection::open(&db_path)?;
        log::debug!("bookmark database at {}", db_path.display());

        let store = SqliteStore {
            conn,
            db_path: Some(db_path),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (tests, ephemeral sessions)
    pub fn open_in_memory() -> Result<Self> {
        let store = SqliteStore {
            conn: Connection::open_in_memory()?,
            db_path: None,
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Get the path where the database should be stored
    fn default_db_path() -> PathBuf {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        path.push("dogear");
        path.push("dogear.db");
        path
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS entries (
                key         TEXT PRIMARY KEY,
                value       TEXT NOT NULL,
                saved_at    INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Path of the backing database file, if file-backed
    pub fn path(&self) -> Option<&PathBuf> {
        self.db_path.as_ref()
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM entries WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO entries (key, value, saved_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![key, value, Utc::now().timestamp()],
        )?;
        Ok(())
    }
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("db_path", &self.db_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.set("bookmarks_11", "[1,4,9]").unwrap();
        assert_eq!(
            store.get("bookmarks_11").unwrap().as_deref(),
            Some("[1,4,9]")
        );
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.set("bookmarks_11", "[1]").unwrap();
        store.set("bookmarks_11", "[]").unwrap();
        assert_eq!(store.get("bookmarks_11").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_missing_key_is_none() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.get("bookmarks_404").unwrap(), None);
    }
}
