/// Host key-value storage abstraction
///
/// The reading client persists small JSON blobs through whatever durable
/// key-value facility the host environment supplies. The trait keeps the
/// bookmark layer testable and lets ephemeral hosts run against the
/// in-memory implementation.

use std::collections::HashMap;

use crate::error::Result;

/// A durable string-keyed, string-valued store supplied by the host
pub trait KeyValueStore {
    /// Read a value. A missing key is `Ok(None)`, not an error;
    /// `Err` means the underlying storage itself failed.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write (or overwrite) a value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store for tests and ephemeral hosts
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
