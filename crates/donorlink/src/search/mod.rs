//! Search and filtering over the donor repository.
//!
//! A search names one organ and optionally narrows by blood type and by a
//! free-text location. Living matches come first, then deceased matches,
//! each in collection order. There is no ranking.
//!
//! A search radius can be supplied but is not applied to the results.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::record::{Address, BloodType, DeceasedDonorRecord, DonorRecord, LivingDonorRecord};
use crate::repository::DonorRepository;

/// What to search for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    /// Organ tag that every match must offer.
    pub organ: String,
    /// Exact blood type filter.
    pub blood_type: Option<BloodType>,
    /// Case-insensitive substring of "city, state, country", matched as
    /// typed, surrounding whitespace included. Empty means no filter.
    pub location: Option<String>,
    /// Search radius in kilometres; accepted but not applied.
    pub radius_km: Option<u32>,
}

impl SearchCriteria {
    /// Criteria matching every donor offering `organ`.
    #[must_use]
    pub fn organ(organ: impl Into<String>) -> Self {
        Self {
            organ: organ.into(),
            ..Self::default()
        }
    }

    /// Narrow to donors of one blood type.
    #[must_use]
    pub fn with_blood_type(mut self, blood_type: BloodType) -> Self {
        self.blood_type = Some(blood_type);
        self
    }

    /// Narrow to donors whose location contains `location`.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Attach a search radius.
    #[must_use]
    pub fn with_radius(mut self, radius_km: u32) -> Self {
        self.radius_km = Some(radius_km);
        self
    }

    /// Compile into a predicate, rejecting criteria without an organ.
    fn compile(&self) -> Result<Filter<'_>> {
        let organ = self.organ.trim();
        if organ.is_empty() {
            return Err(Error::EmptyCriteria);
        }
        let location = self
            .location
            .as_deref()
            .filter(|l| !l.is_empty())
            .map(str::to_lowercase);
        Ok(Filter {
            organ,
            blood_type: self.blood_type,
            location,
        })
    }
}

/// Criteria normalised for matching.
struct Filter<'a> {
    organ: &'a str,
    blood_type: Option<BloodType>,
    location: Option<String>,
}

impl Filter<'_> {
    fn matches(&self, organs: &[String], blood_type: BloodType, address: &Address) -> bool {
        organs.iter().any(|o| o == self.organ)
            && self.blood_type.is_none_or(|bt| bt == blood_type)
            && self.location.as_deref().is_none_or(|needle| {
                address.location_label().to_lowercase().contains(needle)
            })
    }

    fn matches_living(&self, record: &LivingDonorRecord) -> bool {
        self.matches(&record.organs, record.blood_type, &record.address)
    }

    fn matches_deceased(&self, record: &DeceasedDonorRecord) -> bool {
        self.matches(&record.donated_organs, record.blood_type, &record.address)
    }
}

/// Check a living donor against the criteria.
///
/// Criteria without an organ match nothing.
#[must_use]
pub fn matches_living(criteria: &SearchCriteria, record: &LivingDonorRecord) -> bool {
    criteria
        .compile()
        .is_ok_and(|f| f.matches_living(record))
}

/// Check a deceased donor against the criteria.
///
/// Criteria without an organ match nothing.
#[must_use]
pub fn matches_deceased(criteria: &SearchCriteria, record: &DeceasedDonorRecord) -> bool {
    criteria
        .compile()
        .is_ok_and(|f| f.matches_deceased(record))
}

/// Records matching a search, living first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Matches in presentation order.
    pub records: Vec<DonorRecord>,
    /// Number of records searched, across both collections.
    pub total_records: usize,
}

impl SearchResult {
    /// Check whether nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Filter the repository's collections without reloading.
///
/// # Errors
///
/// Returns [`Error::EmptyCriteria`] if no organ was given.
pub fn filter(repo: &DonorRepository, criteria: &SearchCriteria) -> Result<SearchResult> {
    let f = criteria.compile()?;

    let records = repo
        .living()
        .iter()
        .filter(|r| f.matches_living(r))
        .cloned()
        .map(DonorRecord::from)
        .chain(
            repo.deceased()
                .iter()
                .filter(|r| f.matches_deceased(r))
                .cloned()
                .map(DonorRecord::from),
        )
        .collect();

    Ok(SearchResult {
        records,
        total_records: repo.stats().total(),
    })
}

/// Run a search.
///
/// The criteria are checked before the repository is touched. If both
/// collections are empty the repository is loaded first.
///
/// # Errors
///
/// Returns [`Error::EmptyCriteria`] if no organ was given.
pub async fn search(repo: &mut DonorRepository, criteria: &SearchCriteria) -> Result<SearchResult> {
    criteria.compile()?;

    if let Some(radius) = criteria.radius_km {
        debug!(radius_km = radius, "Search radius is not applied");
    }

    if repo.is_empty() {
        info!("No donor records in memory, loading before search");
        repo.load_all().await;
    }

    let result = filter(repo, criteria)?;
    info!(
        organ = %criteria.organ,
        matches = result.len(),
        searched = result.total_records,
        "Search complete"
    );
    Ok(result)
}
