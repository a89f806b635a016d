//! Browser LocalStorage backend

use super::KeyValueStore;
use crate::error::{Error, Result};

pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Open window.localStorage, if the browser allows it
    pub fn open() -> Result<Self> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(Error::StorageUnavailable)?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| Error::Storage(format!("{e:?}")))
    }
}
