//! Destructive bulk seeding of the user table.
//!
//! Seeding is a full replace, never additive: every call deletes all rows
//! and inserts `count` deterministic synthetic users inside a single
//! transaction, so a failed run leaves the previous table intact and a
//! partial set of rows is never visible to lookups.
//!
//! Bulk work deliberately bypasses the handle pool. One long write on a
//! dedicated connection avoids churning the idle set that verification
//! traffic depends on.

use std::path::PathBuf;

use rusqlite::{Connection, Transaction};

use crate::error::{Error, Result};
use crate::hash::sha256_hex;
use crate::pool::BUSY_TIMEOUT;

/// Rows queued per multi-row INSERT.
const BATCH_SIZE: usize = 1000;

/// Replaces the user table with deterministic synthetic accounts.
pub struct Seeder {
    path: PathBuf,
    read_only: bool,
}

impl Seeder {
    pub fn new(path: impl Into<PathBuf>, read_only: bool) -> Self {
        Self {
            path: path.into(),
            read_only,
        }
    }

    /// Replace all rows with users 1..=count. Returns rows inserted.
    ///
    /// User `i` gets mail `user{i}@example.com` and the digest of
    /// `password{i}` computed with [`sha256_hex`], the same primitive the
    /// verification path compares against, so every seeded account
    /// verifies. All-or-nothing: any failure rolls the transaction back.
    pub fn seed(&self, count: usize) -> Result<usize> {
        if self.read_only {
            return Err(Error::ReadOnly);
        }

        let mut conn = Connection::open(&self.path)
            .map_err(|source| Error::StorageUnavailable { source })?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        let tx = conn.transaction()?;
        tx.execute("DELETE FROM user", [])?;

        let mut batch = Vec::with_capacity(BATCH_SIZE.min(count));
        for i in 1..=count {
            let mail = format!("user{i}@example.com");
            let digest = sha256_hex(&format!("password{i}"));
            batch.push((mail, digest));

            if batch.len() == BATCH_SIZE {
                flush(&tx, &mut batch)?;
            }
        }
        // Final partial batch.
        flush(&tx, &mut batch)?;

        tx.commit()?;
        tracing::info!(count, "replaced user table with seeded accounts");
        Ok(count)
    }
}

/// Execute one multi-row INSERT for the queued rows and clear the queue.
fn flush(tx: &Transaction<'_>, rows: &mut Vec<(String, String)>) -> Result<()> {
    if rows.is_empty() {
        return Ok(());
    }

    let mut sql = String::from("INSERT INTO user (mail, hashed_password) VALUES ");
    for i in 0..rows.len() {
        if i > 0 {
            sql.push_str(", ");
        }
        sql.push_str("(?, ?)");
    }

    // Two statement shapes at most (full and final partial batch), so the
    // connection's statement cache absorbs recompilation.
    let mut stmt = tx.prepare_cached(&sql)?;
    stmt.execute(rusqlite::params_from_iter(
        rows.iter()
            .flat_map(|(mail, digest)| [mail.as_str(), digest.as_str()]),
    ))?;

    rows.clear();
    Ok(())
}
