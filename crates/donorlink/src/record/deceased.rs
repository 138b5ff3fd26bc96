//! Deceased donor records, registered by next of kin.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::living::{parse_age, parse_blood_type};
use super::{Address, BloodType, FormData, Hospital, RecordId, RecordKind};
use crate::error::{Error, Result};

/// Form field names of the deceased-donor registration form.
pub mod fields {
    /// Name of the deceased.
    pub const NAME: &str = "deceasedName";
    /// Age of the deceased.
    pub const AGE: &str = "deceasedAge";
    /// Blood type of the deceased.
    pub const BLOOD_TYPE: &str = "deceasedBloodType";
    /// Next-of-kin phone number.
    pub const CONTACT_PHONE: &str = "deceasedContact";
    /// Next-of-kin email address.
    pub const CONTACT_EMAIL: &str = "deceasedEmail";
    /// Relationship of the next of kin to the deceased.
    pub const RELATIONSHIP: &str = "relationship";
    /// Donated organ checkbox group.
    pub const DONATED_ORGANS: &str = "donatedOrgans";
    /// Date of donation, `YYYY-MM-DD`.
    pub const DONATION_DATE: &str = "donationDate";
    /// Hospital name.
    pub const HOSPITAL_NAME: &str = "deceasedHospitalName";
    /// Hospital phone number.
    pub const HOSPITAL_CONTACT: &str = "deceasedHospitalContact";
    /// Country.
    pub const COUNTRY: &str = "deceasedCountry";
    /// State or province.
    pub const STATE: &str = "deceasedState";
    /// District or county.
    pub const DISTRICT: &str = "deceasedDistrict";
    /// City.
    pub const CITY: &str = "deceasedCity";
    /// Street address.
    pub const STREET_ADDRESS: &str = "deceasedStreetAddress";
    /// Postal code.
    pub const POSTAL_CODE: &str = "deceasedPostalCode";
    /// "lat, lng" text.
    pub const COORDINATES: &str = "deceasedCoordinates";
}

/// Date format used by the donation date field.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A deceased donor whose organs were donated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeceasedDonorRecord {
    /// Identity assigned by the record store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Name of the deceased.
    pub name: String,
    /// Age of the deceased.
    pub age: u32,
    /// Blood type of the deceased.
    pub blood_type: BloodType,
    /// Next-of-kin phone number.
    pub contact_phone: String,
    /// Next-of-kin email address.
    pub contact_email: String,
    /// Relationship of the next of kin to the deceased, e.g. "spouse".
    pub relationship: String,
    /// Donated organ tags; never empty.
    pub donated_organs: Vec<String>,
    /// Date the donation took place.
    pub donation_date: NaiveDate,
    /// Hospital handling the donation.
    #[serde(flatten)]
    pub hospital: Hospital,
    /// Address of the donation.
    #[serde(flatten)]
    pub address: Address,
    /// Optional "lat, lng" text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<String>,
    /// When the record was created.
    pub timestamp: DateTime<Utc>,
    /// Always [`RecordKind::Deceased`].
    #[serde(rename = "type")]
    pub kind: RecordKind,
}

impl DeceasedDonorRecord {
    /// Build a record from a submitted deceased-donor form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidField`] if a required value is missing, a value
    /// cannot be parsed, or no organ is selected.
    pub fn from_form(form: &FormData, timestamp: DateTime<Utc>) -> Result<Self> {
        let donated_organs = form.checked(fields::DONATED_ORGANS);
        if donated_organs.is_empty() {
            return Err(Error::invalid_field(
                fields::DONATED_ORGANS,
                "select at least one organ/tissue",
            ));
        }

        let raw_date = form.require(fields::DONATION_DATE)?;
        let donation_date = NaiveDate::parse_from_str(&raw_date, DATE_FORMAT).map_err(|_| {
            Error::invalid_field(
                fields::DONATION_DATE,
                format!("'{raw_date}' is not a YYYY-MM-DD date"),
            )
        })?;

        Ok(Self {
            id: None,
            name: form.require(fields::NAME)?,
            age: parse_age(form, fields::AGE)?,
            blood_type: parse_blood_type(form, fields::BLOOD_TYPE)?,
            contact_phone: form.require(fields::CONTACT_PHONE)?,
            contact_email: form.require(fields::CONTACT_EMAIL)?,
            relationship: form.require(fields::RELATIONSHIP)?,
            donated_organs,
            donation_date,
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
            kind: RecordKind::Deceased,
        })
    }

    /// Return this record with the given store identity attached.
    #[must_use]
    pub fn with_id(mut self, id: RecordId) -> Self {
        self.id = Some(id);
        self
    }
}
