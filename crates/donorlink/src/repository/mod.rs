//! The donor record repository.
//!
//! [`DonorRepository`] owns the two in-memory collections and is the only
//! thing that mutates them. It is constructed once at startup around a
//! [`RecordStore`] and passed by reference to search and presentation.
//!
//! # Bootstrap
//!
//! [`DonorRepository::load_all`] fetches both collections. A collection that
//! comes back empty is bootstrapped from the built-in [`seed`] records, each
//! persisted individually so it gets a store identity. If the fetch itself
//! fails the seeds are kept in memory only, under local identities, so the
//! rest of the system still has data to work with.

pub mod seed;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::record::{DeceasedDonorRecord, DonorRecord, LivingDonorRecord, RecordId};
use crate::store::{Collection, RecordStore, StoredRecord};

/// How one collection was populated by [`DonorRepository::load_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionLoad {
    /// Records were read from the store.
    Loaded {
        /// Records decoded.
        count: usize,
        /// Stored records that could not be decoded and were skipped.
        skipped: usize,
    },
    /// The store held nothing; seed records were written to it.
    Seeded {
        /// Seeds the store accepted.
        persisted: usize,
        /// Seeds kept in memory because the store refused them.
        local: usize,
    },
    /// The store could not be read; seed records are held in memory only.
    Degraded {
        /// Seeds held in memory.
        count: usize,
    },
    /// The store held nothing and seeding is disabled.
    Empty,
}

impl CollectionLoad {
    /// Check whether the store could not be read.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}

/// Outcome of loading both collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Living donor collection.
    pub living: CollectionLoad,
    /// Deceased donor collection.
    pub deceased: CollectionLoad,
}

impl LoadReport {
    /// Check whether either collection fell back to in-memory seeds.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.living.is_degraded() || self.deceased.is_degraded()
    }
}

/// Record counts held by the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RepositoryStats {
    /// Living donor records.
    pub living: usize,
    /// Deceased donor records.
    pub deceased: usize,
    /// Records with a local identity, not present in the store.
    pub unpersisted: usize,
}

impl RepositoryStats {
    /// Total number of records.
    #[must_use]
    pub fn total(&self) -> usize {
        self.living + self.deceased
    }
}

/// Owner of the living and deceased donor collections.
#[derive(Debug)]
pub struct DonorRepository {
    store: Box<dyn RecordStore>,
    living: Vec<LivingDonorRecord>,
    deceased: Vec<DeceasedDonorRecord>,
    seed_on_empty: bool,
}

impl DonorRepository {
    /// Create an empty repository backed by `store`.
    #[must_use]
    pub fn new(store: Box<dyn RecordStore>) -> Self {
        Self {
            store,
            living: Vec::new(),
            deceased: Vec::new(),
            seed_on_empty: true,
        }
    }

    /// Enable or disable bootstrapping empty collections from seed records.
    #[must_use]
    pub fn with_seed_on_empty(mut self, seed_on_empty: bool) -> Self {
        self.seed_on_empty = seed_on_empty;
        self
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    /// Living donors in collection order.
    #[must_use]
    pub fn living(&self) -> &[LivingDonorRecord] {
        &self.living
    }

    /// Deceased donors in collection order.
    #[must_use]
    pub fn deceased(&self) -> &[DeceasedDonorRecord] {
        &self.deceased
    }

    /// Check whether both collections are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.living.is_empty() && self.deceased.is_empty()
    }

    /// Record counts.
    #[must_use]
    pub fn stats(&self) -> RepositoryStats {
        let local = |id: Option<&RecordId>| id.is_some_and(RecordId::is_local);
        RepositoryStats {
            living: self.living.len(),
            deceased: self.deceased.len(),
            unpersisted: self.living.iter().filter(|r| local(r.id.as_ref())).count()
                + self.deceased.iter().filter(|r| local(r.id.as_ref())).count(),
        }
    }

    /// Find a record of either kind by identity.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<DonorRecord> {
        let matches = |rid: Option<&RecordId>| rid.is_some_and(|r| r.as_str() == id);
        self.living
            .iter()
            .find(|r| matches(r.id.as_ref()))
            .cloned()
            .map(DonorRecord::from)
            .or_else(|| {
                self.deceased
                    .iter()
                    .find(|r| matches(r.id.as_ref()))
                    .cloned()
                    .map(DonorRecord::from)
            })
    }

    /// Load both collections from the store, replacing what is in memory.
    ///
    /// Calling this again when the store already holds data re-reads it
    /// without seeding or duplicating anything.
    pub async fn load_all(&mut self) -> LoadReport {
        let (living, living_load) =
            self.load_collection(Collection::LivingDonors, seed::living_donors)
                .await;
        self.living = living;

        let (deceased, deceased_load) = self
            .load_collection(Collection::DeceasedDonors, seed::deceased_donors)
            .await;
        self.deceased = deceased;

        info!(
            living = self.living.len(),
            deceased = self.deceased.len(),
            "Repository loaded"
        );
        LoadReport {
            living: living_load,
            deceased: deceased_load,
        }
    }

    async fn load_collection<R, F>(&self, collection: Collection, seeds: F) -> (Vec<R>, CollectionLoad)
    where
        R: DeserializeOwned + Serialize + Identified,
        F: FnOnce(chrono::DateTime<Utc>) -> Vec<R>,
    {
        match self.store.fetch_collection(collection).await {
            Ok(stored) if !stored.is_empty() => {
                let total = stored.len();
                let records: Vec<R> = stored
                    .into_iter()
                    .filter_map(|s| decode(collection, s).map_err(|e| warn!("{e}")).ok())
                    .collect();
                let load = CollectionLoad::Loaded {
                    count: records.len(),
                    skipped: total - records.len(),
                };
                (records, load)
            }
            Ok(_) if !self.seed_on_empty => {
                debug!(%collection, "Collection empty and seeding disabled");
                (Vec::new(), CollectionLoad::Empty)
            }
            Ok(_) => {
                info!(%collection, "Collection empty, writing seed records");
                self.persist_seeds(collection, seeds(Utc::now())).await
            }
            Err(e) if !self.seed_on_empty => {
                warn!(%collection, "Failed to load collection: {e}");
                (Vec::new(), CollectionLoad::Empty)
            }
            Err(e) => {
                warn!(%collection, "Failed to load collection, using in-memory seed records: {e}");
                let records: Vec<R> = seeds(Utc::now())
                    .into_iter()
                    .enumerate()
                    .map(|(i, r)| r.identified(RecordId::local(collection.kind(), i)))
                    .collect();
                let load = CollectionLoad::Degraded {
                    count: records.len(),
                };
                (records, load)
            }
        }
    }

    async fn persist_seeds<R>(&self, collection: Collection, seeds: Vec<R>) -> (Vec<R>, CollectionLoad)
    where
        R: Serialize + Identified,
    {
        let mut records = Vec::with_capacity(seeds.len());
        let (mut persisted, mut local) = (0, 0);

        for (i, seed) in seeds.into_iter().enumerate() {
            let id = match self.append(collection, &seed).await {
                Ok(id) => {
                    persisted += 1;
                    id
                }
                Err(e) => {
                    warn!(%collection, "Seed record kept in memory only: {e}");
                    local += 1;
                    RecordId::local(collection.kind(), i)
                }
            };
            records.push(seed.identified(id));
        }

        (records, CollectionLoad::Seeded { persisted, local })
    }

    async fn append<R: Serialize>(&self, collection: Collection, record: &R) -> Result<RecordId> {
        let body = serde_json::to_value(record)?;
        self.store.append_record(collection, &body).await
    }

    /// Persist a new record and append it to its in-memory collection.
    ///
    /// The record is only added to memory once the store has accepted it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreUnavailable`] if the store refused the record;
    /// the in-memory collections are unchanged.
    pub async fn save(&mut self, record: impl Into<DonorRecord>) -> Result<RecordId> {
        let record = record.into();
        let kind = record.kind();
        let collection = Collection::from(kind);

        let id = match &record {
            DonorRecord::Living(r) => self.append(collection, r).await?,
            DonorRecord::Deceased(r) => self.append(collection, r).await?,
        };

        match record {
            DonorRecord::Living(r) => self.living.push(r.with_id(id.clone())),
            DonorRecord::Deceased(r) => self.deceased.push(r.with_id(id.clone())),
        }
        info!(%kind, %id, "Saved donor record");
        Ok(id)
    }
}

/// A record type that can carry a store identity.
trait Identified: Sized {
    fn identified(self, id: RecordId) -> Self;
}

impl Identified for LivingDonorRecord {
    fn identified(self, id: RecordId) -> Self {
        self.with_id(id)
    }
}

impl Identified for DeceasedDonorRecord {
    fn identified(self, id: RecordId) -> Self {
        self.with_id(id)
    }
}

/// Decode a stored body and attach the store key as its identity.
fn decode<R>(collection: Collection, stored: StoredRecord) -> Result<R>
where
    R: DeserializeOwned + Identified,
{
    let StoredRecord { id, body } = stored;
    let record: R = serde_json::from_value(body).map_err(|e| Error::CorruptRecord {
        collection: collection.to_string(),
        id: id.to_string(),
        message: e.to_string(),
    })?;
    Ok(record.identified(id))
}
