//! `SQLite` schema for the record store.

/// One row per record; `seq` preserves insertion order within a collection.
pub const CREATE_RECORDS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS records (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL UNIQUE,
    collection TEXT NOT NULL,
    body TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// Index for fetching one collection in order.
pub const CREATE_COLLECTION_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_records_collection ON records(collection, seq)
";

/// Key-value metadata, including the schema version.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";
