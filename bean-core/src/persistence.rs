//! SQLite save slots.
//!
//! Any serde-serializable value (a Bean, a whole farm save) is stored as JSON
//! under a named slot:
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS save_slots (
//!     slot       TEXT PRIMARY KEY,
//!     data       BLOB NOT NULL,
//!     updated_at TEXT NOT NULL,
//!     checksum   TEXT
//! );
//! ```
//!
//! With checksums enabled, a CRC-32 of the JSON bytes is stored on save and
//! verified on load; a mismatch is reported as
//! [`BeanError::ChecksumMismatch`] rather than handing back suspect data.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::PersistenceConfig;
use crate::error::{BeanError, Result};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS save_slots (
    slot       TEXT PRIMARY KEY,
    data       BLOB NOT NULL,
    updated_at TEXT NOT NULL,
    checksum   TEXT
);";

// ---------------------------------------------------------------------------
// CRC-32 checksum helper
// ---------------------------------------------------------------------------

fn crc32_hex(data: &[u8]) -> String {
    format!("{:08x}", crc32_compute(data))
}

/// CRC-32 (ISO 3309 / ITU-T V.42), bitwise.
fn crc32_compute(data: &[u8]) -> u32 {
    const POLY: u32 = 0xEDB8_8320;
    let mut crc: u32 = 0xFFFF_FFFF;
    for &byte in data {
        crc ^= u32::from(byte);
        for _ in 0..8 {
            crc = if crc & 1 == 1 { (crc >> 1) ^ POLY } else { crc >> 1 };
        }
    }
    !crc
}

// ---------------------------------------------------------------------------
// SaveStore
// ---------------------------------------------------------------------------

/// Handle to an open save database.
///
/// ```no_run
/// # use bean_core::persistence::SaveStore;
/// # use bean_core::config::PersistenceConfig;
/// # use bean_core::{Bean, Personality};
/// let store = SaveStore::open("bean_save.db", &PersistenceConfig::default())?;
/// store.save("default", &Bean::new("Pip", Personality::Kind))?;
/// let bean: Option<Bean> = store.load("default")?;
/// # Ok::<(), bean_core::BeanError>(())
/// ```
pub struct SaveStore {
    conn: Connection,
    config: PersistenceConfig,
    db_path: PathBuf,
}

impl std::fmt::Debug for SaveStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaveStore")
            .field("db_path", &self.db_path)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SaveStore {
    /// Open (or create) the database at `path`.
    ///
    /// # Errors
    /// Returns [`BeanError::Database`] on SQLite failures.
    pub fn open<P: AsRef<Path>>(path: P, config: &PersistenceConfig) -> Result<Self> {
        let db_path = path.as_ref().to_path_buf();
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(&db_path, flags)?;

        if config.wal_mode {
            conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        }
        conn.execute_batch("PRAGMA synchronous = NORMAL;")?;
        conn.execute_batch("PRAGMA busy_timeout = 5000;")?;
        conn.execute_batch(SCHEMA)?;

        info!(path = %db_path.display(), wal = config.wal_mode, "Save store opened");

        Ok(Self {
            conn,
            config: config.clone(),
            db_path,
        })
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns [`BeanError::Database`] on SQLite failures.
    pub fn open_in_memory(config: &PersistenceConfig) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn,
            config: config.clone(),
            db_path: PathBuf::from(":memory:"),
        })
    }

    /// Save (upsert) `value` under `slot`.
    ///
    /// # Errors
    /// Returns [`BeanError::Serialization`] if JSON encoding fails, or
    /// [`BeanError::Database`] on SQLite failures.
    pub fn save<T: Serialize>(&self, slot: &str, value: &T) -> Result<()> {
        let start = Instant::now();
        let json = serde_json::to_vec(value).map_err(|e| BeanError::Serialization(e.to_string()))?;
        let checksum = self.config.checksum_enabled.then(|| crc32_hex(&json));
        let now = Utc::now().to_rfc3339();

        self.conn.execute(
            "INSERT INTO save_slots (slot, data, updated_at, checksum)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(slot) DO UPDATE SET
                data = excluded.data,
                updated_at = excluded.updated_at,
                checksum = excluded.checksum",
            params![slot, json, now, checksum],
        )?;

        debug!(
            slot = %slot,
            bytes = json.len(),
            elapsed_us = start.elapsed().as_micros(),
            "Saved slot"
        );
        Ok(())
    }

    /// Load the value stored under `slot`, or `None` if the slot is empty.
    ///
    /// # Errors
    /// Returns [`BeanError::ChecksumMismatch`] if the stored bytes no longer
    /// match their checksum, [`BeanError::Serialization`] if decoding fails,
    /// or [`BeanError::Database`] on SQLite failures.
    pub fn load<T: DeserializeOwned>(&self, slot: &str) -> Result<Option<T>> {
        let start = Instant::now();
        let mut stmt = self
            .conn
            .prepare_cached("SELECT data, checksum FROM save_slots WHERE slot = ?1")?;
        let row: Option<(Vec<u8>, Option<String>)> = stmt
            .query_row(params![slot], |row| Ok((row.get(0)?, row.get(1)?)))
            .optional()?;

        let Some((data, stored_checksum)) = row else {
            return Ok(None);
        };

        if self.config.checksum_enabled {
            if let Some(expected) = stored_checksum {
                let actual = crc32_hex(&data);
                if expected != actual {
                    warn!(slot = %slot, %expected, %actual, "Checksum mismatch, save is corrupt");
                    return Err(BeanError::ChecksumMismatch {
                        slot: slot.to_string(),
                        expected,
                        actual,
                    });
                }
            }
        }

        let value = serde_json::from_slice(&data).map_err(|e| BeanError::Serialization(e.to_string()))?;
        debug!(slot = %slot, elapsed_us = start.elapsed().as_micros(), "Loaded slot");
        Ok(Some(value))
    }

    /// Delete a slot. Returns `true` if a row was removed.
    ///
    /// # Errors
    /// Returns [`BeanError::Database`] on SQLite failures.
    pub fn delete(&self, slot: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM save_slots WHERE slot = ?1", params![slot])?;
        Ok(deleted > 0)
    }

    /// Names of all occupied slots, sorted.
    ///
    /// # Errors
    /// Returns [`BeanError::Database`] on SQLite failures.
    pub fn list_slots(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT slot FROM save_slots ORDER BY slot")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut slots = Vec::new();
        for row in rows {
            slots.push(row?);
        }
        Ok(slots)
    }

    /// Path of the database file, or `:memory:`.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Run SQLite's integrity check. `Ok(false)` means corruption.
    ///
    /// # Errors
    /// Returns [`BeanError::Database`] if the check itself fails.
    pub fn integrity_check(&self) -> Result<bool> {
        let result: String = self
            .conn
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        Ok(result == "ok")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
