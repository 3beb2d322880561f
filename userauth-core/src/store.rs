//! Credential lookup over the pooled SQLite storage.
//!
//! A `CredentialStore` owns its [`ResourcePool`]; there is no shared global
//! state, so independent stores (and tests) never interfere.

use std::path::PathBuf;

use rusqlite::Connection;

use crate::error::{Error, Result};
use crate::pool::{ResourcePool, BUSY_TIMEOUT};

/// Verifies (mail, hashed password) pairs against the user table.
pub struct CredentialStore {
    pool: ResourcePool,
}

impl CredentialStore {
    /// Open the store at `path`, creating the schema if the store is
    /// writable. Read-only stores skip schema creation entirely.
    pub fn open(path: impl Into<PathBuf>, read_only: bool) -> Result<Self> {
        let path = path.into();

        if !read_only {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }

            let conn = Connection::open(&path)
                .map_err(|source| Error::StorageUnavailable { source })?;
            conn.busy_timeout(BUSY_TIMEOUT)?;

            // Performance pragmas; failure to apply is logged, not fatal.
            for (pragma, value) in [
                ("journal_mode", "WAL"),
                ("synchronous", "NORMAL"),
                ("temp_store", "MEMORY"),
            ] {
                if let Err(err) = conn.pragma_update(None, pragma, value) {
                    tracing::warn!(pragma, %err, "failed to apply pragma");
                }
            }

            conn.execute_batch(SCHEMA)?;
            conn.execute_batch(INDEXES)?;
        }

        Ok(Self {
            pool: ResourcePool::new(path, read_only),
        })
    }

    /// Build a store on an existing pool (constructor injection for tests
    /// and callers that size the pool themselves).
    pub fn with_pool(pool: ResourcePool) -> Self {
        Self { pool }
    }

    /// Return the id of the user matching both `mail` and
    /// `hashed_password`, or `None` when no row matches.
    ///
    /// No-match is not an error; storage failures are. Equality is checked
    /// by SQLite at the byte level (no constant-time comparison). The
    /// acquired handle is released on every exit path via its drop guard.
    pub fn lookup(&self, mail: &str, hashed_password: &str) -> Result<Option<i64>> {
        let handle = self.pool.acquire()?;
        Ok(handle.find_user(mail, hashed_password)?)
    }

    /// Readiness probe: storage is reachable and can answer a query.
    pub fn ping(&self) -> Result<()> {
        let handle = self.pool.acquire()?;
        handle.ping()?;
        Ok(())
    }

    /// The pool backing this store; the server drains it at shutdown.
    pub fn pool(&self) -> &ResourcePool {
        &self.pool
    }
}

// ============================================================================
// Schema
// ============================================================================

pub(crate) const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS user (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    mail TEXT NOT NULL UNIQUE,
    hashed_password TEXT NOT NULL
);
"#;

const INDEXES: &str = r#"
CREATE INDEX IF NOT EXISTS idx_user_mail_password ON user(mail, hashed_password);
"#;
