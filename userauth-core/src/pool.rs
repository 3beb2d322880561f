//! Bounded pool of reusable SQLite handles.
//!
//! Opening a connection and compiling the lookup statement is the expensive
//! part of a verification request, so idle handles are cached and reused
//! across requests. The idle set is a bounded MPMC channel: acquire pops
//! with `try_recv`, release pushes with `try_send`, and a handle that finds
//! the channel full is simply closed. No lock serializes unrelated lookups.
//!
//! The capacity bound is enforced only at release time. Under burst load
//! more than `capacity` handles may be open simultaneously because acquire
//! never blocks waiting for a free handle; capacity limits how many idle
//! handles are retained for reuse afterward. That trade favors availability
//! over a strict ceiling and is intentional; a blocking acquire would be a
//! different load-shedding policy, not a fix.

use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use rusqlite::{Connection, OpenFlags, OptionalExtension};

use crate::error::{Error, Result};

/// Maximum number of idle handles retained for reuse.
pub const DEFAULT_POOL_CAPACITY: usize = 10;

/// The one statement every pooled handle is opened for.
const LOOKUP_SQL: &str =
    "SELECT id FROM user WHERE mail = ?1 AND hashed_password = ?2 LIMIT 1";

/// Shared by every connection this crate opens, pooled or dedicated.
pub(crate) const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// A live SQLite connection with the lookup statement precompiled.
///
/// The compiled statement lives in the connection's statement cache
/// (`prepare_cached`), so it stays attached to this handle across reuses.
/// A handle is owned by exactly one caller at a time.
pub struct Handle {
    conn: Connection,
}

impl Handle {
    /// Open a connection and compile the lookup statement.
    ///
    /// Any failure here surfaces as [`Error::StorageUnavailable`]; callers
    /// never see a half-initialized handle.
    fn open(path: &Path, read_only: bool) -> Result<Self> {
        let flags = if read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::default()
        };

        let conn = Connection::open_with_flags(path, flags)
            .map_err(|source| Error::StorageUnavailable { source })?;
        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(|source| Error::StorageUnavailable { source })?;

        // Warm the statement cache so the handle is usable the moment it is
        // acquired. Fails if the user table does not exist yet.
        conn.prepare_cached(LOOKUP_SQL)
            .map(drop)
            .map_err(|source| Error::StorageUnavailable { source })?;

        tracing::debug!(path = %path.display(), "opened storage handle");
        Ok(Self { conn })
    }

    /// Run the precompiled lookup: the id of the first row matching both
    /// `mail` and `hashed_password`, or `None`.
    pub fn find_user(&self, mail: &str, hashed_password: &str) -> rusqlite::Result<Option<i64>> {
        let mut stmt = self.conn.prepare_cached(LOOKUP_SQL)?;
        stmt.query_row([mail, hashed_password], |row| row.get(0))
            .optional()
    }

    /// Lightweight liveness probe.
    pub fn ping(&self) -> rusqlite::Result<()> {
        self.conn.query_row("SELECT 1", [], |_| Ok(())).map(drop)
    }
}

/// A bounded cache of idle [`Handle`]s for one database file.
///
/// Scoped to its owning store and passed by reference; there is no
/// process-wide pool, so tests can instantiate isolated stores.
pub struct ResourcePool {
    path: PathBuf,
    read_only: bool,
    idle_tx: Sender<Handle>,
    idle_rx: Receiver<Handle>,
}

impl ResourcePool {
    /// Create a pool with the default retained-idle capacity.
    pub fn new(path: impl Into<PathBuf>, read_only: bool) -> Self {
        Self::with_capacity(path, read_only, DEFAULT_POOL_CAPACITY)
    }

    /// Create a pool with a custom retained-idle capacity.
    pub fn with_capacity(path: impl Into<PathBuf>, read_only: bool, capacity: usize) -> Self {
        let (idle_tx, idle_rx) = bounded(capacity);
        Self {
            path: path.into(),
            read_only,
            idle_tx,
            idle_rx,
        }
    }

    /// Take an idle handle, or open a new one if none is queued.
    ///
    /// Removal order from the idle set is unspecified. Open failure
    /// propagates to the caller; the pool never retries.
    pub fn acquire(&self) -> Result<PooledHandle<'_>> {
        let handle = match self.idle_rx.try_recv() {
            Ok(handle) => handle,
            Err(_) => Handle::open(&self.path, self.read_only)?,
        };

        Ok(PooledHandle {
            handle: Some(handle),
            idle_tx: &self.idle_tx,
        })
    }

    /// Number of idle handles currently retained.
    pub fn idle_count(&self) -> usize {
        self.idle_rx.len()
    }

    /// Close and discard every idle handle. Used once at shutdown;
    /// handles still out with callers close when their guards drop.
    pub fn drain(&self) {
        let mut closed = 0usize;
        while self.idle_rx.try_recv().is_ok() {
            closed += 1;
        }
        if closed > 0 {
            tracing::debug!(closed, "drained idle storage handles");
        }
    }
}

/// Scoped ownership of a pooled handle.
///
/// Dropping the guard returns the handle to the idle set, or closes it when
/// the set is already at capacity. This runs on every exit path (success,
/// no-match, error, or panic), so a handle is never leaked.
pub struct PooledHandle<'a> {
    handle: Option<Handle>,
    idle_tx: &'a Sender<Handle>,
}

impl Deref for PooledHandle<'_> {
    type Target = Handle;

    fn deref(&self) -> &Handle {
        // Invariant: `handle` is only None after drop has taken it.
        self.handle.as_ref().expect("handle already released")
    }
}

impl Drop for PooledHandle<'_> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(TrySendError::Full(handle)) = self.idle_tx.try_send(handle) {
                // At capacity: close instead of retaining.
                tracing::debug!("idle set full, closing storage handle");
                drop(handle);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store;

    fn seeded_db() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pool.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(store::SCHEMA).unwrap();
        (dir, path)
    }

    #[test]
    fn acquire_reuses_released_handle() {
        let (_dir, path) = seeded_db();
        let pool = ResourcePool::new(&path, false);

        assert_eq!(pool.idle_count(), 0);
        let handle = pool.acquire().unwrap();
        drop(handle);
        assert_eq!(pool.idle_count(), 1);

        let _handle = pool.acquire().unwrap();
        assert_eq!(pool.idle_count(), 0);
    }

    #[test]
    fn release_beyond_capacity_closes_handle() {
        let (_dir, path) = seeded_db();
        let pool = ResourcePool::with_capacity(&path, false, 2);

        // Hold four handles at once: acquire never blocks on capacity.
        let handles: Vec<_> = (0..4).map(|_| pool.acquire().unwrap()).collect();
        drop(handles);

        // Only `capacity` of them were retained.
        assert_eq!(pool.idle_count(), 2);
    }

    #[test]
    fn acquire_fails_without_database() {
        let dir = tempfile::tempdir().unwrap();
        // No schema: statement compilation fails at open.
        let pool = ResourcePool::new(dir.path().join("missing.db"), true);
        let err = pool.acquire().err().expect("open should fail");
        assert!(matches!(err, Error::StorageUnavailable { .. }));
    }

    #[test]
    fn drain_discards_idle_handles() {
        let (_dir, path) = seeded_db();
        let pool = ResourcePool::new(&path, false);

        let handles: Vec<_> = (0..3).map(|_| pool.acquire().unwrap()).collect();
        drop(handles);
        assert_eq!(pool.idle_count(), 3);

        pool.drain();
        assert_eq!(pool.idle_count(), 0);
    }

    #[test]
    fn concurrent_acquire_release_respects_idle_bound() {
        let (_dir, path) = seeded_db();
        let pool = ResourcePool::new(&path, false);

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..50 {
                        let handle = pool.acquire().unwrap();
                        handle.ping().unwrap();
                        drop(handle);
                    }
                });
            }
        });

        assert!(pool.idle_count() <= DEFAULT_POOL_CAPACITY);
    }
}
