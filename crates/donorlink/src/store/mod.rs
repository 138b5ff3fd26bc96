//! Record store contract and implementations.
//!
//! The repository talks to persistence through [`RecordStore`], which
//! models a remote document store with two named collections. Every
//! failure to reach the backing store surfaces as
//! [`Error::StoreUnavailable`](crate::error::Error::StoreUnavailable) so
//! callers can degrade instead of aborting.
//!
//! Two implementations are provided:
//! - [`SqliteStore`]: records persisted in a local `SQLite` file
//! - [`MemoryStore`]: process-local, with a switch to simulate an outage

mod memory;
pub mod migrations;
pub mod schema;
mod sqlite;

use std::fmt;

use crate::config::{Config, StoreBackend};
use crate::error::Result;
use crate::record::{RecordId, RecordKind};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// A named top-level collection in the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    /// Living donor records.
    LivingDonors,
    /// Deceased donor records.
    DeceasedDonors,
}

impl Collection {
    /// Both collections, in load order.
    pub const ALL: [Self; 2] = [Self::LivingDonors, Self::DeceasedDonors];

    /// Name of the collection in the persisted layout.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LivingDonors => "livingDonors",
            Self::DeceasedDonors => "deceasedDonors",
        }
    }

    /// Kind of record held by this collection.
    #[must_use]
    pub fn kind(self) -> RecordKind {
        match self {
            Self::LivingDonors => RecordKind::Living,
            Self::DeceasedDonors => RecordKind::Deceased,
        }
    }
}

impl From<RecordKind> for Collection {
    fn from(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Living => Self::LivingDonors,
            RecordKind::Deceased => Self::DeceasedDonors,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One record as held by the store: its key and its JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    /// Store-assigned identity.
    pub id: RecordId,
    /// Record object without the identity.
    pub body: serde_json::Value,
}

/// A remote-style record store holding named collections.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync + fmt::Debug {
    /// Short name of the implementation, for diagnostics.
    fn backend_name(&self) -> &'static str;

    /// Fetch every record in a collection, in insertion order.
    ///
    /// An absent collection is returned as empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreUnavailable`](crate::error::Error::StoreUnavailable)
    /// if the store cannot be reached.
    async fn fetch_collection(&self, collection: Collection) -> Result<Vec<StoredRecord>>;

    /// Append a record to a collection and return its assigned identity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreUnavailable`](crate::error::Error::StoreUnavailable)
    /// if the store cannot be reached.
    async fn append_record(
        &self,
        collection: Collection,
        body: &serde_json::Value,
    ) -> Result<RecordId>;
}

/// Open the record store selected by the configuration.
///
/// # Errors
///
/// Returns an error if the database cannot be opened.
pub fn open_configured(config: &Config) -> Result<Box<dyn RecordStore>> {
    match config.store.backend {
        StoreBackend::Sqlite => Ok(Box::new(SqliteStore::open(config.database_path())?)),
        StoreBackend::Memory => Ok(Box::new(MemoryStore::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_names() {
        assert_eq!(Collection::LivingDonors.as_str(), "livingDonors");
        assert_eq!(Collection::DeceasedDonors.to_string(), "deceasedDonors");
    }

    #[test]
    fn test_collection_kind_round_trip() {
        for collection in Collection::ALL {
            assert_eq!(Collection::from(collection.kind()), collection);
        }
    }

    #[test]
    fn test_open_configured_memory() {
        let mut config = Config::default();
        config.store.backend = StoreBackend::Memory;

        let store = open_configured(&config).unwrap();
        assert_eq!(store.backend_name(), "memory");
    }

    #[test]
    fn test_open_configured_sqlite() {
        let path = std::env::temp_dir().join(format!(
            "donorlink_open_configured_{}.db",
            std::process::id()
        ));
        let mut config = Config::default();
        config.store.database_path = Some(path.clone());

        let store = open_configured(&config).unwrap();
        assert_eq!(store.backend_name(), "sqlite");

        drop(store);
        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_file(path.with_extension("db-wal"));
        let _ = std::fs::remove_file(path.with_extension("db-shm"));
    }
}
