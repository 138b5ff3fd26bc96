//! Core record types for donorlink.
//!
//! This module defines the two donor record shapes, the pieces they share,
//! and [`DonorRecord`], the kind-tagged union the search and presentation
//! layers work with.

mod coordinates;
mod deceased;
mod form;
mod living;
mod types;

use serde::{Deserialize, Serialize};

pub use coordinates::Coordinates;
pub use deceased::{fields as deceased_fields, DeceasedDonorRecord};
pub use form::FormData;
pub use living::{fields as living_fields, LivingDonorRecord};
pub use types::{Address, BloodType, Hospital, ParseBloodTypeError};

/// Store-assigned identity of a persisted record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap an identity string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identity for a record that only exists in memory because the store
    /// could not be reached.
    #[must_use]
    pub fn local(kind: RecordKind, index: usize) -> Self {
        Self(format!("local-{kind}-{index}"))
    }

    /// Check whether this identity was assigned locally rather than by the store.
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.0.starts_with("local-")
    }

    /// Borrow the identity as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which kind of donor a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// A living donor.
    Living,
    /// A deceased donor registered by next of kin.
    Deceased,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Living => write!(f, "living"),
            Self::Deceased => write!(f, "deceased"),
        }
    }
}

/// A donor record of either kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DonorRecord {
    /// A living donor.
    Living(LivingDonorRecord),
    /// A deceased donor.
    Deceased(DeceasedDonorRecord),
}

impl DonorRecord {
    /// The kind of this record.
    #[must_use]
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Living(_) => RecordKind::Living,
            Self::Deceased(_) => RecordKind::Deceased,
        }
    }

    /// The store-assigned identity, if the record has been persisted.
    #[must_use]
    pub fn id(&self) -> Option<&RecordId> {
        match self {
            Self::Living(r) => r.id.as_ref(),
            Self::Deceased(r) => r.id.as_ref(),
        }
    }

    /// Name of the donor.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Living(r) => &r.name,
            Self::Deceased(r) => &r.name,
        }
    }

    /// Organ tags offered by the donor.
    #[must_use]
    pub fn organs(&self) -> &[String] {
        match self {
            Self::Living(r) => &r.organs,
            Self::Deceased(r) => &r.donated_organs,
        }
    }

    /// Blood type of the donor.
    #[must_use]
    pub fn blood_type(&self) -> BloodType {
        match self {
            Self::Living(r) => r.blood_type,
            Self::Deceased(r) => r.blood_type,
        }
    }

    /// Address of the donor (the hospital area for deceased donors).
    #[must_use]
    pub fn address(&self) -> &Address {
        match self {
            Self::Living(r) => &r.address,
            Self::Deceased(r) => &r.address,
        }
    }

    /// Hospital handling the donation.
    #[must_use]
    pub fn hospital(&self) -> &Hospital {
        match self {
            Self::Living(r) => &r.hospital,
            Self::Deceased(r) => &r.hospital,
        }
    }

    /// Parsed coordinates, if the record carries a usable "lat, lng" pair.
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        let text = match self {
            Self::Living(r) => r.coordinates.as_deref(),
            Self::Deceased(r) => r.coordinates.as_deref(),
        };
        text.and_then(Coordinates::parse)
    }
}

impl From<LivingDonorRecord> for DonorRecord {
    fn from(record: LivingDonorRecord) -> Self {
        Self::Living(record)
    }
}

impl From<DeceasedDonorRecord> for DonorRecord {
    fn from(record: DeceasedDonorRecord) -> Self {
        Self::Deceased(record)
    }
}

/// Shared fixtures for record tests across modules.
#[cfg(test)]
pub(crate) mod testing {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::{
        Address, BloodType, DeceasedDonorRecord, Hospital, LivingDonorRecord, RecordKind,
    };

    /// A living donor with the given organs, blood type and city.
    pub fn living(name: &str, organs: &[&str], blood_type: BloodType, city: &str) -> LivingDonorRecord {
        LivingDonorRecord {
            id: None,
            name: name.to_string(),
            age: 35,
            blood_type,
            phone: "+1-555-0123".to_string(),
            email: "donor@example.com".to_string(),
            organs: organs.iter().map(ToString::to_string).collect(),
            hospital: Hospital {
                name: "City General Hospital".to_string(),
                contact: "+1-555-0100".to_string(),
            },
            address: Address {
                country: "US".to_string(),
                state: "New York".to_string(),
                district: "Manhattan".to_string(),
                city: city.to_string(),
                street_address: "123 Medical Ave".to_string(),
                postal_code: "10001".to_string(),
            },
            coordinates: Some("40.7589, -73.9851".to_string()),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            kind: RecordKind::Living,
        }
    }

    /// A deceased donor with the given organs, blood type and city.
    pub fn deceased(
        name: &str,
        organs: &[&str],
        blood_type: BloodType,
        city: &str,
    ) -> DeceasedDonorRecord {
        DeceasedDonorRecord {
            id: None,
            name: name.to_string(),
            age: 65,
            blood_type,
            contact_phone: "+1-555-0200".to_string(),
            contact_email: "family@example.com".to_string(),
            relationship: "spouse".to_string(),
            donated_organs: organs.iter().map(ToString::to_string).collect(),
            donation_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            hospital: Hospital {
                name: "Memorial Hospital".to_string(),
                contact: "+1-555-0201".to_string(),
            },
            address: Address {
                country: "US".to_string(),
                state: "Florida".to_string(),
                district: "Miami-Dade".to_string(),
                city: city.to_string(),
                street_address: "789 Memorial Drive".to_string(),
                postal_code: "33101".to_string(),
            },
            coordinates: Some("25.7617, -80.1918".to_string()),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            kind: RecordKind::Deceased,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{deceased, living};
    use super::*;

    #[test]
    fn test_record_kind_display() {
        assert_eq!(RecordKind::Living.to_string(), "living");
        assert_eq!(RecordKind::Deceased.to_string(), "deceased");
    }

    #[test]
    fn test_record_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&RecordKind::Deceased).unwrap(),
            "\"deceased\""
        );
    }

    #[test]
    fn test_record_id_local() {
        let id = RecordId::local(RecordKind::Living, 2);
        assert_eq!(id.as_str(), "local-living-2");
        assert!(id.is_local());
        assert!(!RecordId::new("a1b2c3").is_local());
    }

    #[test]
    fn test_donor_record_accessors_branch_on_kind() {
        let l: DonorRecord = living("Ann", &["heart"], BloodType::OPositive, "Albany").into();
        let d: DonorRecord = deceased("Bob", &["kidney"], BloodType::ANegative, "Miami").into();

        assert_eq!(l.kind(), RecordKind::Living);
        assert_eq!(d.kind(), RecordKind::Deceased);
        assert_eq!(l.organs(), ["heart".to_string()]);
        assert_eq!(d.organs(), ["kidney".to_string()]);
        assert_eq!(d.blood_type(), BloodType::ANegative);
        assert_eq!(d.address().city, "Miami");
        assert_eq!(l.name(), "Ann");
    }

    #[test]
    fn test_donor_record_coordinates_parsed() {
        let mut record = living("Ann", &["heart"], BloodType::OPositive, "Albany");
        let parsed = DonorRecord::from(record.clone()).coordinates().unwrap();
        assert!((parsed.lat - 40.7589).abs() < 1e-9);

        record.coordinates = Some("not a place".to_string());
        assert!(DonorRecord::from(record.clone()).coordinates().is_none());

        record.coordinates = None;
        assert!(DonorRecord::from(record).coordinates().is_none());
    }

    #[test]
    fn test_donor_record_serializes_with_type_tag() {
        let d: DonorRecord = deceased("Bob", &["kidney"], BloodType::ANegative, "Miami").into();
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["type"], "deceased");
        assert_eq!(json["city"], "Miami");
        assert_eq!(json["donatedOrgans"][0], "kidney");
    }
}
