//! Schema versioning for the `SQLite` record store.
//!
//! The schema version lives in the `metadata` table. Each migration is a
//! list of statements applied in one transaction together with the version
//! bump, so a failed migration leaves the previous version intact.

use rusqlite::{Connection, OptionalExtension};
use tracing::info;

use crate::error::{Error, Result};

use super::schema::{CREATE_COLLECTION_INDEX, CREATE_METADATA_TABLE, CREATE_RECORDS_TABLE};

/// Key used to store the schema version in the metadata table.
const VERSION_KEY: &str = "schema_version";

/// One schema step.
struct Migration {
    version: i32,
    description: &'static str,
    statements: &'static [&'static str],
}

/// Every migration, in version order.
const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    description: "records table",
    statements: &[CREATE_RECORDS_TABLE, CREATE_COLLECTION_INDEX],
}];

/// The schema version a fully migrated database reports.
pub const CURRENT_VERSION: i32 = 1;

/// Bring the schema up to [`CURRENT_VERSION`].
///
/// # Errors
///
/// Returns an error if the stored version is unreadable or newer than this
/// build understands, or if a migration fails.
pub fn initialize_schema(conn: &mut Connection) -> Result<()> {
    conn.execute(CREATE_METADATA_TABLE, [])?;

    let version = schema_version(conn)?;
    if version > CURRENT_VERSION {
        return Err(Error::DatabaseMigration {
            message: format!(
                "database schema version {version} is newer than supported version {CURRENT_VERSION}"
            ),
        });
    }

    for migration in MIGRATIONS.iter().filter(|m| m.version > version) {
        let tx = conn.transaction()?;
        for statement in migration.statements {
            tx.execute(statement, [])?;
        }
        tx.execute(
            "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
            (VERSION_KEY, migration.version.to_string()),
        )?;
        tx.commit()?;
        info!(
            version = migration.version,
            "Applied migration: {}", migration.description
        );
    }

    Ok(())
}

/// Read the schema version; 0 for a fresh database.
///
/// # Errors
///
/// Returns an error if the metadata table cannot be read or holds a
/// non-numeric version.
pub fn schema_version(conn: &Connection) -> Result<i32> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM metadata WHERE key = ?1",
            [VERSION_KEY],
            |row| row.get(0),
        )
        .optional()?;

    match value {
        None => Ok(0),
        Some(v) => v.parse().map_err(|_| Error::DatabaseMigration {
            message: format!("invalid schema version: {v}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> Connection {
        Connection::open_in_memory().expect("failed to create in-memory database")
    }

    fn table_exists(conn: &Connection, name: &str) -> bool {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
            [name],
            |row| row.get::<_, i32>(0),
        )
        .unwrap()
            == 1
    }

    #[test]
    fn test_initialize_creates_tables_and_version() {
        let mut conn = fresh();
        initialize_schema(&mut conn).unwrap();

        assert!(table_exists(&conn, "records"));
        assert!(table_exists(&conn, "metadata"));
        assert_eq!(schema_version(&conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_initialize_idempotent() {
        let mut conn = fresh();
        initialize_schema(&mut conn).unwrap();
        initialize_schema(&mut conn).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_fresh_database_reports_zero() {
        let conn = fresh();
        conn.execute(CREATE_METADATA_TABLE, []).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), 0);
    }

    #[test]
    fn test_rejects_newer_schema() {
        let mut conn = fresh();
        conn.execute(CREATE_METADATA_TABLE, []).unwrap();
        conn.execute(
            "INSERT INTO metadata (key, value) VALUES (?1, '99')",
            [VERSION_KEY],
        )
        .unwrap();

        let err = initialize_schema(&mut conn).unwrap_err();
        assert!(err.to_string().contains("newer than supported"));
    }

    #[test]
    fn test_rejects_garbage_version() {
        let mut conn = fresh();
        conn.execute(CREATE_METADATA_TABLE, []).unwrap();
        conn.execute(
            "INSERT INTO metadata (key, value) VALUES (?1, 'one')",
            [VERSION_KEY],
        )
        .unwrap();

        assert!(initialize_schema(&mut conn).is_err());
    }

    #[test]
    fn test_migrations_ordered_and_current() {
        let versions: Vec<_> = MIGRATIONS.iter().map(|m| m.version).collect();
        let mut sorted = versions.clone();
        sorted.sort_unstable();
        assert_eq!(versions, sorted);
        assert_eq!(versions.last(), Some(&CURRENT_VERSION));
    }
}
