//! Snapshot gateway contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide load/save of named snapshot blobs.
//! - Validate connection readiness before accepting traffic.
//!
//! # Invariants
//! - `save` is an upsert; a key holds at most one blob.
//! - Blobs are opaque here; decoding and invariant checks happen in the
//!   store's load path.

use crate::db::migrations::latest_version;
use rusqlite::{params, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Named record holding the serialized note collection.
pub const NOTES_KEY: &str = "notes";
/// Named record holding the serialized productivity counters.
pub const PRODUCTIVITY_KEY: &str = "productivityData";

pub type StorageResult<T> = Result<T, StorageError>;

/// Gateway error for snapshot persistence.
#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    /// Connection has not run migrations to the expected schema version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection at schema version {actual_version}, expected {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Opaque blob-store contract the core persists through.
///
/// The persistence boundary of the core: two named records, loaded in full
/// and replaced in full.
pub trait SnapshotStore {
    /// Returns the blob stored under `key`, if any.
    fn load(&self, key: &str) -> StorageResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous blob.
    fn save(&self, key: &str, value: &str) -> StorageResult<()>;
}

/// SQLite-backed snapshot store over the `snapshots` table.
pub struct SqliteSnapshotStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotStore<'conn> {
    /// Constructs a store from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        let expected_version = latest_version();
        if actual_version < expected_version {
            return Err(StorageError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let table_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'snapshots';",
            [],
            |row| row.get(0),
        )?;
        if table_count == 0 {
            return Err(StorageError::MissingRequiredTable("snapshots"));
        }

        Ok(Self { conn })
    }
}

impl SnapshotStore for SqliteSnapshotStore<'_> {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM snapshots WHERE key = ?1;")?;
        let mut rows = stmt.query([key])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(row.get(0)?));
        }
        Ok(None)
    }

    fn save(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO snapshots (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}
