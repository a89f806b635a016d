//! Crate error type
//!
//! None of these reach the player: every call site degrades locally
//! (skip the write, fall back to defaults) and logs.

use thiserror::Error;

/// Errors from the collaborators around the simulation
#[derive(Debug, Error)]
pub enum Error {
    /// No backing store (private browsing, storage disabled)
    #[error("storage unavailable")]
    StorageUnavailable,

    /// The backing store rejected a read or write
    #[error("storage error: {0}")]
    Storage(String),

    /// Settings or tuning JSON could not be parsed or encoded
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
