//! SQLite persistence layer.
//!
//! RULE: Only the store talks to the database.
//! The ledger boundary calls store methods; it never executes SQL directly.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::Connection;

use crate::error::LedgerResult;

mod records;

pub struct LedgerStore {
    conn: Connection,
    path: Option<PathBuf>, // None for :memory:
    busy_timeout: Duration,
}

impl LedgerStore {
    /// Open (or create) the ledger database at `path`.
    pub fn open(path: &Path, busy_timeout: Duration) -> LedgerResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        // Concurrent writers from other processes wait on the file lock.
        conn.busy_timeout(busy_timeout)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        log::info!("opened ledger database at {}", path.display());
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
            busy_timeout,
        })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> LedgerResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn,
            path: None,
            busy_timeout: Duration::ZERO,
        })
    }

    /// Open a second connection to the same file.
    /// In-memory stores reopen as a fresh, empty database.
    pub fn reopen(&self) -> LedgerResult<Self> {
        match &self.path {
            Some(p) => Self::open(p, self.busy_timeout),
            None => Self::in_memory(),
        }
    }

    /// Create the credit and debit tables if absent. Safe to call on every start.
    pub fn migrate(&self) -> LedgerResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_ledger.sql"))?;
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Close the connection, surfacing any error SQLite reports on close.
    pub fn close(self) -> LedgerResult<()> {
        let location = self
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| ":memory:".to_string());
        self.conn.close().map_err(|(_, e)| e)?;
        log::info!("closed ledger database at {location}");
        Ok(())
    }
}
