//! Living donor records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Address, BloodType, FormData, Hospital, RecordId, RecordKind};
use crate::error::{Error, Result};

/// Form field names of the living-donor registration form.
pub mod fields {
    /// Donor's full name.
    pub const NAME: &str = "donorName";
    /// Donor's age in years.
    pub const AGE: &str = "donorAge";
    /// Donor's blood type.
    pub const BLOOD_TYPE: &str = "donorBloodType";
    /// Donor's phone number.
    pub const PHONE: &str = "donorContact";
    /// Donor's email address.
    pub const EMAIL: &str = "donorEmail";
    /// Organ checkbox group.
    pub const ORGANS: &str = "organs";
    /// Hospital name.
    pub const HOSPITAL_NAME: &str = "hospitalName";
    /// Hospital phone number.
    pub const HOSPITAL_CONTACT: &str = "hospitalContact";
    /// Country.
    pub const COUNTRY: &str = "country";
    /// State or province.
    pub const STATE: &str = "state";
    /// District or county.
    pub const DISTRICT: &str = "district";
    /// City.
    pub const CITY: &str = "city";
    /// Street address.
    pub const STREET_ADDRESS: &str = "streetAddress";
    /// Postal code.
    pub const POSTAL_CODE: &str = "postalCode";
    /// "lat, lng" text, usually filled by clicking the map.
    pub const COORDINATES: &str = "coordinates";
}

/// A living donor offering one or more organs or tissues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LivingDonorRecord {
    /// Identity assigned by the record store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Full name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Blood type.
    pub blood_type: BloodType,
    /// Phone number.
    pub phone: String,
    /// Email address.
    pub email: String,
    /// Organ tags the donor offers; never empty.
    pub organs: Vec<String>,
    /// Hospital handling the donation.
    #[serde(flatten)]
    pub hospital: Hospital,
    /// Donor's address.
    #[serde(flatten)]
    pub address: Address,
    /// Optional "lat, lng" text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<String>,
    /// When the record was created.
    pub timestamp: DateTime<Utc>,
    /// Always [`RecordKind::Living`].
    #[serde(rename = "type")]
    pub kind: RecordKind,
}

impl LivingDonorRecord {
    /// Build a record from a submitted living-donor form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidField`] if a required value is missing, the age
    /// or blood type cannot be parsed, or no organ is selected.
    pub fn from_form(form: &FormData, timestamp: DateTime<Utc>) -> Result<Self> {
        let organs = form.checked(fields::ORGANS);
        if organs.is_empty() {
            return Err(Error::invalid_field(
                fields::ORGANS,
                "select at least one organ/tissue",
            ));
        }

        Ok(Self {
            id: None,
            name: form.require(fields::NAME)?,
            age: parse_age(form, fields::AGE)?,
            blood_type: parse_blood_type(form, fields::BLOOD_TYPE)?,
            phone: form.require(fields::PHONE)?,
            email: form.require(fields::EMAIL)?,
            organs,
            hospital: Hospital {
                name: form.require(fields::HOSPITAL_NAME)?,
                contact: form.require(fields::HOSPITAL_CONTACT)?,
            },
            address: Address {
                country: form.require(fields::COUNTRY)?,
                state: form.require(fields::STATE)?,
                district: form.optional(fields::DISTRICT).unwrap_or_default(),
                city: form.require(fields::CITY)?,
                street_address: form.optional(fields::STREET_ADDRESS).unwrap_or_default(),
                postal_code: form.optional(fields::POSTAL_CODE).unwrap_or_default(),
            },
            coordinates: form.optional(fields::COORDINATES),
            timestamp,
            kind: RecordKind::Living,
        })
    }

    /// Return this record with the given store identity attached.
    #[must_use]
    pub fn with_id(mut self, id: RecordId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Parse an age field.
pub(crate) fn parse_age(form: &FormData, field: &str) -> Result<u32> {
    let raw = form.require(field)?;
    raw.parse::<u32>()
        .map_err(|_| Error::invalid_field(field, format!("'{raw}' is not a whole number")))
}

/// Parse a blood type field.
pub(crate) fn parse_blood_type(form: &FormData, field: &str) -> Result<BloodType> {
    form.require(field)?
        .parse()
        .map_err(|e: super::ParseBloodTypeError| Error::invalid_field(field, e.to_string()))
}
