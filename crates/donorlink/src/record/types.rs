//! Value types shared by both record kinds.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// ABO/Rh blood type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodType {
    /// A positive.
    #[serde(rename = "A+")]
    APositive,
    /// A negative.
    #[serde(rename = "A-")]
    ANegative,
    /// B positive.
    #[serde(rename = "B+")]
    BPositive,
    /// B negative.
    #[serde(rename = "B-")]
    BNegative,
    /// AB positive.
    #[serde(rename = "AB+")]
    AbPositive,
    /// AB negative.
    #[serde(rename = "AB-")]
    AbNegative,
    /// O positive.
    #[serde(rename = "O+")]
    OPositive,
    /// O negative.
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodType {
    /// Every blood type, in the order the registration form lists them.
    pub const ALL: [Self; 8] = [
        Self::APositive,
        Self::ANegative,
        Self::BPositive,
        Self::BNegative,
        Self::AbPositive,
        Self::AbNegative,
        Self::OPositive,
        Self::ONegative,
    ];

    /// The conventional label, e.g. `"AB-"`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::APositive => "A+",
            Self::ANegative => "A-",
            Self::BPositive => "B+",
            Self::BNegative => "B-",
            Self::AbPositive => "AB+",
            Self::AbNegative => "AB-",
            Self::OPositive => "O+",
            Self::ONegative => "O-",
        }
    }
}

impl std::fmt::Display for BloodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string is not a recognised blood type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown blood type '{0}' (expected one of A+, A-, B+, B-, AB+, AB-, O+, O-)")]
pub struct ParseBloodTypeError(String);

impl FromStr for BloodType {
    type Err = ParseBloodTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|bt| bt.label() == wanted)
            .ok_or_else(|| ParseBloodTypeError(s.to_string()))
    }
}

/// Postal address of a donor or donating hospital.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    /// Country code or name.
    pub country: String,
    /// State or province.
    pub state: String,
    /// District or county.
    pub district: String,
    /// City.
    pub city: String,
    /// Street address.
    pub street_address: String,
    /// Postal code.
    pub postal_code: String,
}

impl Address {
    /// The "city, state, country" label used for display and location matching.
    #[must_use]
    pub fn location_label(&self) -> String {
        format!("{}, {}, {}", self.city, self.state, self.country)
    }
}

/// Hospital handling a donation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hospital {
    /// Hospital name.
    #[serde(rename = "hospitalName")]
    pub name: String,
    /// Hospital phone number.
    #[serde(rename = "hospitalContact")]
    pub contact: String,
}
