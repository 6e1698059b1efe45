//! Database schema definitions for liftlog.

/// SQL schema for creating all database tables.
pub const SCHEMA: &str = r#"
-- Record collections, one row per collection, serialized as JSON
CREATE TABLE IF NOT EXISTS collections (
    name TEXT PRIMARY KEY,
    records_json TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;

/// SQL for schema version tracking (migrations)
pub const SCHEMA_VERSION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);
"#;

/// Current schema version
pub const CURRENT_VERSION: i32 = 1;
