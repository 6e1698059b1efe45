//! Key-value backing store using rusqlite.
//!
//! Each record collection is persisted as a single JSON document in the
//! `collections` table, keyed by collection name. The typed layer on top
//! lives in [`crate::storage::repository`].

use crate::storage::schema::{CURRENT_VERSION, SCHEMA, SCHEMA_VERSION_TABLE};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// The fixed set of record collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Workouts,
    Exercises,
    PersonalRecords,
    Stats,
    Templates,
}

impl Collection {
    /// All collections, in export-document order.
    pub const ALL: [Collection; 5] = [
        Collection::Workouts,
        Collection::Exercises,
        Collection::PersonalRecords,
        Collection::Stats,
        Collection::Templates,
    ];

    /// Stable storage key, also the field name in the export document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Workouts => "workouts",
            Collection::Exercises => "exercises",
            Collection::PersonalRecords => "personalRecords",
            Collection::Stats => "stats",
            Collection::Templates => "templates",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Store wrapper for SQLite operations.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open or create a store at the given path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::IoError(e.to_string()))?;
        }

        let conn =
            Connection::open(path).map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        let store = Self { conn };
        store.initialize()?;

        Ok(store)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn =
            Connection::open_in_memory().map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        let store = Self { conn };
        store.initialize()?;

        Ok(store)
    }

    /// Initialize the store schema.
    fn initialize(&self) -> Result<(), StoreError> {
        // Create schema version table
        self.conn
            .execute_batch(SCHEMA_VERSION_TABLE)
            .map_err(|e| StoreError::MigrationFailed(e.to_string()))?;

        // Check current version
        let current_version = self.get_schema_version()?;

        if current_version < CURRENT_VERSION {
            self.migrate(current_version)?;
        }

        Ok(())
    }

    /// Get the current schema version.
    fn get_schema_version(&self) -> Result<i32, StoreError> {
        let result: SqliteResult<i32> = self.conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        );

        match result {
            Ok(version) => Ok(version),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
            Err(e) => Err(StoreError::QueryFailed(e.to_string())),
        }
    }

    /// Run store migrations.
    fn migrate(&self, from_version: i32) -> Result<(), StoreError> {
        if from_version < 1 {
            // Initial schema
            self.conn
                .execute_batch(SCHEMA)
                .map_err(|e| StoreError::MigrationFailed(e.to_string()))?;

            // Record version
            self.conn
                .execute(
                    "INSERT INTO schema_version (version, applied_at) VALUES (?, datetime('now'))",
                    [CURRENT_VERSION],
                )
                .map_err(|e| StoreError::MigrationFailed(e.to_string()))?;

            tracing::info!("Store migrated to version {}", CURRENT_VERSION);
        }

        // Future migrations would go here:
        // if from_version < 2 { ... }

        Ok(())
    }

    /// Read a collection's JSON document, `None` when never written.
    pub fn read_collection(&self, name: Collection) -> Result<Option<String>, StoreError> {
        let result: SqliteResult<String> = self.conn.query_row(
            "SELECT records_json FROM collections WHERE name = ?1",
            params![name.as_str()],
            |row| row.get(0),
        );

        match result {
            Ok(json) => Ok(Some(json)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StoreError::QueryFailed(e.to_string())),
        }
    }

    /// Write a collection's JSON document, replacing any previous one.
    pub fn write_collection(&self, name: Collection, json: &str) -> Result<(), StoreError> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO collections (name, records_json, updated_at)
                 VALUES (?1, ?2, datetime('now'))",
                params![name.as_str(), json],
            )
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    /// Write several collections in one transaction. Either all writes
    /// land or none do.
    pub fn replace_collections(
        &mut self,
        entries: &[(Collection, String)],
    ) -> Result<(), StoreError> {
        if entries.is_empty() {
            return Ok(());
        }

        let tx = self
            .conn
            .transaction()
            .map_err(|e| StoreError::TransactionFailed(e.to_string()))?;

        {
            let mut stmt = tx
                .prepare(
                    "INSERT OR REPLACE INTO collections (name, records_json, updated_at)
                     VALUES (?1, ?2, datetime('now'))",
                )
                .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

            for (name, json) in entries {
                stmt.execute(params![name.as_str(), json])
                    .map_err(|e| StoreError::QueryFailed(e.to_string()))?;
            }
        }

        tx.commit()
            .map_err(|e| StoreError::TransactionFailed(e.to_string()))?;

        Ok(())
    }

    /// Remove a collection. No-op when it was never written.
    pub fn remove_collection(&self, name: Collection) -> Result<(), StoreError> {
        self.conn
            .execute(
                "DELETE FROM collections WHERE name = ?1",
                params![name.as_str()],
            )
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    /// Names of the collections that have been written, sorted.
    pub fn collection_names(&self) -> Result<Vec<String>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM collections ORDER BY name")
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| row.get(0))
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        let mut names = Vec::new();
        for row in rows {
            names.push(row.map_err(|e| StoreError::QueryFailed(e.to_string()))?);
        }

        Ok(names)
    }

    /// Remove every collection.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM collections", [])
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        Ok(())
    }
}

/// Store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to connect to store: {0}")]
    ConnectionFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),
}
