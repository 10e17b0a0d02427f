//! Append-only command log, partitioned by date.
//!
//! The whole log lives in one JSON blob (`{date: [LogEntry, ...]}`) stored
//! under a fixed key in a SQLite key-value table, so every operation is a
//! read-modify-write of that blob.
//!
//! Design:
//! - Entries within a date are only ever appended; a date is only ever
//!   removed as a whole
//! - A blob that fails to read or parse is treated as an empty log
//! - Write failures are returned to the caller and not retried

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::LOG_STORE_KEY;

/// A logged command and the response it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub command: String,
    pub response: String,
    pub timestamp: String,
}

impl LogEntry {
    pub fn new(command: &str, response: &str, timestamp: &str) -> Self {
        Self {
            command: command.to_string(),
            response: response.to_string(),
            timestamp: timestamp.to_string(),
        }
    }

    /// `[timestamp] command\nresponse\n`
    pub fn to_text(&self) -> String {
        format!("[{}] {}\n{}\n", self.timestamp, self.command, self.response)
    }
}

/// Date-partitioned log contents. `BTreeMap` keeps dates ascending.
type LogMap = BTreeMap<String, Vec<LogEntry>>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),
    #[error("could not encode log: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Log store shared between the UI loop and command tasks.
pub type SharedLogStore = Arc<Mutex<LogStore>>;

/// Lock a shared store. A panic in another holder doesn't invalidate the
/// blob, so poisoning is ignored.
pub fn lock(store: &SharedLogStore) -> MutexGuard<'_, LogStore> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Persistent command log backed by SQLite.
pub struct LogStore {
    conn: Connection,
}

impl LogStore {
    /// Open (or create) the log store database.
    ///
    /// If `path` is `None`, uses an in-memory database (useful for tests).
    pub fn open(path: Option<&Path>) -> Result<Self, StoreError> {
        let conn = match path {
            Some(p) => {
                // Ensure parent directory exists
                if let Some(parent) = p.parent() {
                    let _ = std::fs::create_dir_all(parent);
                }
                Connection::open(p)?
            }
            None => Connection::open_in_memory()?,
        };

        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Wrap the store for sharing with command tasks.
    pub fn shared(self) -> SharedLogStore {
        Arc::new(Mutex::new(self))
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv_store (
                name    TEXT PRIMARY KEY,
                value   TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    // ── Blob access ───────────────────────────────────────────────

    /// Read the whole log. Anything unreadable counts as an empty log.
    fn load(&self) -> LogMap {
        let raw: Option<String> = match self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE name = ?1",
                params![LOG_STORE_KEY],
                |row| row.get(0),
            )
            .optional()
        {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "log store unreadable, treating as empty");
                return LogMap::new();
            }
        };

        match raw {
            Some(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "log store blob malformed, treating as empty");
                LogMap::new()
            }),
            None => LogMap::new(),
        }
    }

    fn save(&self, logs: &LogMap) -> Result<(), StoreError> {
        let text = serde_json::to_string(logs)?;
        self.conn.execute(
            "INSERT INTO kv_store (name, value) VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET value = excluded.value",
            params![LOG_STORE_KEY, text],
        )?;
        Ok(())
    }

    // ── Operations ────────────────────────────────────────────────

    /// Append an entry to `date`, creating the bucket if needed.
    pub fn append(&self, date: &str, entry: LogEntry) -> Result<(), StoreError> {
        let mut logs = self.load();
        logs.entry(date.to_string()).or_default().push(entry);
        self.save(&logs)
    }

    /// Entries logged on `date`, in insertion order. Empty if none.
    pub fn get_for_date(&self, date: &str) -> Vec<LogEntry> {
        self.load().remove(date).unwrap_or_default()
    }

    /// Every entry formatted as text, ascending by date then insertion.
    pub fn get_all(&self) -> Vec<String> {
        self.load()
            .values()
            .flat_map(|entries| entries.iter().map(LogEntry::to_text))
            .collect()
    }

    /// Remove the bucket for `date`. No-op if it doesn't exist.
    pub fn clear_date(&self, date: &str) -> Result<(), StoreError> {
        let mut logs = self.load();
        if logs.remove(date).is_some() {
            self.save(&logs)?;
        }
        Ok(())
    }

    /// Overwrite the raw blob. Only tests need to plant corrupt data.
    #[cfg(test)]
    fn put_raw(&self, text: &str) {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO kv_store (name, value) VALUES (?1, ?2)",
                params![LOG_STORE_KEY, text],
            )
            .unwrap();
    }

    /// Remove the backing table so every write fails.
    #[cfg(test)]
    pub(crate) fn drop_table(&self) {
        self.conn.execute_batch("DROP TABLE kv_store;").unwrap();
    }
}
