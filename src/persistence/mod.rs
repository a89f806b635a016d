//! Key-value persistence
//!
//! The game stores three things: the best score, user settings, and an
//! optional tuning override. All of them go through [`KeyValueStore`]:
//! - `MemoryStore` for tests and the native demo
//! - `LocalStorage` on the web

pub mod store;

#[cfg(target_arch = "wasm32")]
pub mod local_storage;

pub use store::{KeyValueStore, MemoryStore};

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorage;
