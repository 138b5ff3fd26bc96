//! Result cards, one per matched record.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::record::{DonorRecord, RecordId, RecordKind};

/// Format a date as `M/D/YYYY`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// Badge text shown on a card of the given kind.
#[must_use]
pub fn badge(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Living => "Living Donor",
        RecordKind::Deceased => "Deceased Donor",
    }
}

/// Display heading for a record: deceased names are suffixed.
#[must_use]
pub fn heading(record: &DonorRecord) -> String {
    match record {
        DonorRecord::Living(r) => r.name.clone(),
        DonorRecord::Deceased(r) => format!("{} (Deceased)", r.name),
    }
}

/// Summary card for one search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultCard {
    /// Identity used to select the card.
    pub id: Option<RecordId>,
    /// Record kind.
    pub kind: RecordKind,
    /// Kind badge.
    pub badge: &'static str,
    /// Donor name, marked for deceased donors.
    pub heading: String,
    /// "city, state, country".
    pub location: String,
    /// Blood type label.
    pub blood_type: &'static str,
    /// Hospital name.
    pub hospital: String,
    /// Direct phone for living donors; next-of-kin phone and relationship
    /// for deceased donors.
    pub contact: String,
    /// Donation date, deceased donors only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donated_on: Option<String>,
    /// Organ tags offered.
    pub organs: Vec<String>,
}

impl ResultCard {
    /// Build the card for a record.
    #[must_use]
    pub fn new(record: &DonorRecord) -> Self {
        let (contact, donated_on) = match record {
            DonorRecord::Living(r) => (r.phone.clone(), None),
            DonorRecord::Deceased(r) => (
                format!("{} ({})", r.contact_phone, r.relationship),
                Some(format_date(r.donation_date)),
            ),
        };

        Self {
            id: record.id().cloned(),
            kind: record.kind(),
            badge: badge(record.kind()),
            heading: heading(record),
            location: record.address().location_label(),
            blood_type: record.blood_type().label(),
            hospital: record.hospital().name.clone(),
            contact,
            donated_on,
            organs: record.organs().to_vec(),
        }
    }

    /// Card body as text lines, heading first.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("[{}] {}", self.badge, self.heading),
            format!("  Location:   {}", self.location),
            format!("  Blood Type: {}", self.blood_type),
            format!("  Hospital:   {}", self.hospital),
            format!("  Contact:    {}", self.contact),
        ];
        if let Some(date) = &self.donated_on {
            lines.push(format!("  Donated:    {date}"));
        }
        lines.push(format!("  Organs:     {}", self.organs.join(", ")));
        if let Some(id) = &self.id {
            lines.push(format!("  ID:         {id}"));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::testing::{deceased, living};
    use crate::record::BloodType;

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_date(date), "1/5/2024");
    }

    #[test]
    fn test_living_card() {
        let record: DonorRecord = living("Ann", &["heart", "liver"], BloodType::OPositive, "Albany")
            .with_id(RecordId::new("k1"))
            .into();
        let card = ResultCard::new(&record);

        assert_eq!(card.badge, "Living Donor");
        assert_eq!(card.heading, "Ann");
        assert_eq!(card.location, "Albany, New York, US");
        assert_eq!(card.blood_type, "O+");
        assert_eq!(card.contact, "+1-555-0123");
        assert!(card.donated_on.is_none());
        assert_eq!(card.id, Some(RecordId::new("k1")));

        let lines = card.lines();
        assert_eq!(lines[0], "[Living Donor] Ann");
        assert!(lines.iter().any(|l| l.contains("heart, liver")));
        assert!(!lines.iter().any(|l| l.contains("Donated")));
    }

    #[test]
    fn test_deceased_card_shows_relationship_and_date() {
        let record: DonorRecord = deceased("Bob", &["kidney"], BloodType::ANegative, "Miami").into();
        let card = ResultCard::new(&record);

        assert_eq!(card.badge, "Deceased Donor");
        assert_eq!(card.heading, "Bob (Deceased)");
        assert_eq!(card.contact, "+1-555-0200 (spouse)");
        assert_eq!(card.donated_on.as_deref(), Some("1/15/2024"));
        assert!(card.lines().iter().any(|l| l.contains("Donated:    1/15/2024")));
    }

    #[test]
    fn test_card_json_omits_missing_date() {
        let record: DonorRecord = living("Ann", &["heart"], BloodType::OPositive, "Albany").into();
        let json = serde_json::to_value(ResultCard::new(&record)).unwrap();
        assert!(json.get("donatedOn").is_none());
        assert_eq!(json["kind"], "living");
        assert_eq!(json["bloodType"], "O+");
    }
}
