#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Persistent lookup history backed by `SQLite`.
//!
//! Every successful weather lookup appends one row to the `history` table
//! in `data/weather_history.db`. Rows are never updated or deleted; reads
//! return the most recent entries first.
//!
//! Uses `switchy_database` for all database operations. One connection
//! handle is shared by all operations and each statement runs atomically,
//! so concurrent appends interleave in completion order.

use std::path::Path;

use moosicbox_json_utils::database::ToValue as _;
use switchy_database::{Database, DatabaseValue};
use switchy_database_connection::init_sqlite_rusqlite;
use thiserror::Error;

pub use district_weather_history_models::HistoryRecord;

/// Default path for the history database.
pub const DEFAULT_DB_PATH: &str = "data/weather_history.db";

/// Number of entries returned by the history endpoint.
pub const DEFAULT_RECENT_LIMIT: u32 = 10;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors from history storage operations.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// A database query or command failed.
    #[error("Database error: {0}")]
    Database(String),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Append-only lookup log.
pub struct HistoryStore {
    db: Box<dyn Database>,
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore").finish_non_exhaustive()
    }
}

impl HistoryStore {
    /// Opens (or creates) the history database at `path` and ensures the
    /// schema exists.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError`] if the parent directory cannot be created,
    /// the database cannot be opened, or schema creation fails.
    pub async fn open(path: &Path) -> Result<Self, HistoryError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let db =
            init_sqlite_rusqlite(Some(path)).map_err(|e| HistoryError::Database(e.to_string()))?;

        let store = Self { db };
        store.initialize().await?;

        log::debug!("Opened history database at {}", path.display());

        Ok(store)
    }

    /// Creates the `history` table and its index if they don't already
    /// exist. Safe to call repeatedly; existing rows are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Database`] if schema creation fails.
    pub async fn initialize(&self) -> Result<(), HistoryError> {
        self.db
            .exec_raw(
                "CREATE TABLE IF NOT EXISTS history (
                    id          INTEGER PRIMARY KEY AUTOINCREMENT,
                    district    TEXT NOT NULL,
                    temperature REAL,
                    condition   TEXT,
                    timestamp   TEXT NOT NULL
                )",
            )
            .await
            .map_err(|e| HistoryError::Database(e.to_string()))?;

        self.db
            .exec_raw(
                "CREATE INDEX IF NOT EXISTS idx_history_timestamp
                 ON history (timestamp)",
            )
            .await
            .map_err(|e| HistoryError::Database(e.to_string()))?;

        Ok(())
    }

    /// Appends one lookup. The timestamp is assigned here and never moves
    /// backwards relative to earlier rows, even if the wall clock does.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Database`] if the insert fails.
    pub async fn append(
        &self,
        district: &str,
        temperature: Option<f64>,
        condition: &str,
    ) -> Result<(), HistoryError> {
        let now = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true);

        self.db
            .exec_raw_params(
                "INSERT INTO history (district, temperature, condition, timestamp)
                 VALUES ($1, $2, $3,
                         MAX($4, COALESCE((SELECT MAX(timestamp) FROM history), '')))",
                &[
                    DatabaseValue::String(district.to_string()),
                    temperature.map_or(DatabaseValue::Null, DatabaseValue::Real64),
                    DatabaseValue::String(condition.to_string()),
                    DatabaseValue::String(now),
                ],
            )
            .await
            .map_err(|e| HistoryError::Database(e.to_string()))?;

        Ok(())
    }

    /// Returns at most `limit` records, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Database`] if the query fails.
    pub async fn recent(&self, limit: u32) -> Result<Vec<HistoryRecord>, HistoryError> {
        let rows = self
            .db
            .query_raw_params(
                "SELECT district, temperature, condition, timestamp
                 FROM history
                 ORDER BY timestamp DESC, id DESC
                 LIMIT $1",
                &[DatabaseValue::Int64(i64::from(limit))],
            )
            .await
            .map_err(|e| HistoryError::Database(e.to_string()))?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            let condition: Option<String> = row.to_value("condition").unwrap_or(None);
            records.push(HistoryRecord {
                district: row.to_value("district").unwrap_or_default(),
                temperature: row.to_value("temperature").unwrap_or(None),
                condition: condition.unwrap_or_default(),
                timestamp: row.to_value("timestamp").unwrap_or_default(),
            });
        }

        Ok(records)
    }

    /// Returns the total number of stored lookups.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Database`] if the query fails.
    pub async fn count(&self) -> Result<u64, HistoryError> {
        let rows = self
            .db
            .query_raw_params("SELECT COUNT(*) as cnt FROM history", &[])
            .await
            .map_err(|e| HistoryError::Database(e.to_string()))?;

        let count: i64 = rows.first().map_or(0, |r| r.to_value("cnt").unwrap_or(0));

        #[allow(clippy::cast_sign_loss)]
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn temp_db(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "district_weather_history_{name}_{}.db",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        path
    }

    #[tokio::test]
    async fn recent_on_empty_store_is_empty() {
        let path = temp_db("empty");
        let store = HistoryStore::open(&path).await.unwrap();

        assert!(store.recent(DEFAULT_RECENT_LIMIT).await.unwrap().is_empty());
        assert_eq!(store.count().await.unwrap(), 0);

        drop(store);
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn recent_returns_newest_first_up_to_limit() {
        let path = temp_db("recent");
        let store = HistoryStore::open(&path).await.unwrap();

        for i in 0..12 {
            store
                .append(&format!("District {i}"), Some(f64::from(i)), "Overcast (code 3)")
                .await
                .unwrap();
        }

        let records = store.recent(DEFAULT_RECENT_LIMIT).await.unwrap();
        assert_eq!(records.len(), 10);

        let districts: Vec<&str> = records.iter().map(|r| r.district.as_str()).collect();
        let expected: Vec<String> = (2..12).rev().map(|i| format!("District {i}")).collect();
        assert_eq!(districts, expected);

        for pair in records.windows(2) {
            assert!(
                pair[0].timestamp >= pair[1].timestamp,
                "{} before {}",
                pair[0].timestamp,
                pair[1].timestamp
            );
        }

        assert_eq!(records[0].temperature, Some(11.0));
        assert_eq!(records[0].condition, "Overcast (code 3)");
        assert_eq!(store.count().await.unwrap(), 12);

        drop(store);
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn recent_returns_fewer_when_store_is_small() {
        let path = temp_db("small");
        let store = HistoryStore::open(&path).await.unwrap();

        store.append("Kollam", Some(28.0), "Clear sky (code 0)").await.unwrap();
        store.append("Idukki", Some(19.5), "Fog (code 45)").await.unwrap();

        let records = store.recent(DEFAULT_RECENT_LIMIT).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].district, "Idukki");
        assert_eq!(records[1].district, "Kollam");

        assert_eq!(store.recent(1).await.unwrap().len(), 1);

        drop(store);
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn missing_temperature_is_stored_as_null() {
        let path = temp_db("null_temp");
        let store = HistoryStore::open(&path).await.unwrap();

        store.append("Wayanad", None, "Unknown").await.unwrap();

        let records = store.recent(DEFAULT_RECENT_LIMIT).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].temperature, None);
        assert_eq!(records[0].condition, "Unknown");
        assert!(records[0].timestamp.ends_with('Z'));

        drop(store);
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn initialize_is_idempotent() {
        let path = temp_db("idempotent");
        let store = HistoryStore::open(&path).await.unwrap();

        store.append("Thrissur", Some(30.1), "Mainly clear (code 1)").await.unwrap();
        store.initialize().await.unwrap();
        store.initialize().await.unwrap();

        let records = store.recent(DEFAULT_RECENT_LIMIT).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].district, "Thrissur");

        drop(store);
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn records_survive_reopen() {
        let path = temp_db("reopen");

        {
            let store = HistoryStore::open(&path).await.unwrap();
            store.append("Kannur", Some(27.0), "Slight rain (code 61)").await.unwrap();
        }

        let store = HistoryStore::open(&path).await.unwrap();
        let records = store.recent(DEFAULT_RECENT_LIMIT).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].district, "Kannur");

        drop(store);
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn open_creates_parent_directories() {
        let dir = std::env::temp_dir().join(format!(
            "district_weather_history_nested_{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("a").join("b").join("history.db");

        let store = HistoryStore::open(&path).await.unwrap();
        assert!(path.exists());

        drop(store);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
