use std::collections::HashMap;

use crate::error::Result;

/// String key-value storage
pub trait KeyValueStore {
    /// Read a value. Read failures are reported as absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store (tests, native)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
