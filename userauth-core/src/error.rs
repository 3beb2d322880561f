//! Structured error types for userauth-core.
//!
//! A failed credential match is not an error; lookups report it as
//! `Ok(None)`. These variants cover the genuine failure modes.

use std::io;

use thiserror::Error;

/// Result type alias for userauth-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for userauth-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Opening a new storage handle failed (connection or statement
    /// compilation). Never retried internally; the caller decides.
    #[error("storage unavailable: {source}")]
    StorageUnavailable { source: rusqlite::Error },

    /// A query or transaction against an open handle failed
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Write attempted against a store opened read-only
    #[error("store is read-only")]
    ReadOnly,

    /// Filesystem operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}
