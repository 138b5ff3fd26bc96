//! `donorlink` - Organ donor registration and search
//!
//! This library provides the pieces behind the `donorlink` binary: field
//! validation and a multi-step registration wizard, a record repository over
//! a pluggable record store, organ/blood-type/location search, and the
//! presentation of results as cards, details and map markers.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod present;
pub mod record;
pub mod registration;
pub mod repository;
pub mod search;
pub mod store;
pub mod validation;
pub mod wizard;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use record::{DeceasedDonorRecord, DonorRecord, LivingDonorRecord, RecordId, RecordKind};
pub use repository::{DonorRepository, RepositoryStats};
pub use search::{SearchCriteria, SearchResult};
