//! Detail disclosure shown when a card is selected.

use std::fmt;

use serde::Serialize;

use super::card::{format_date, heading};
use crate::record::DonorRecord;

/// Every field of one record worth disclosing, labelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordDetail {
    /// Disclosure title.
    pub title: &'static str,
    /// Label/value pairs in display order.
    pub fields: Vec<(&'static str, String)>,
}

impl RecordDetail {
    /// Build the disclosure for a record.
    #[must_use]
    pub fn new(record: &DonorRecord) -> Self {
        let name = heading(record);
        let organs = record.organs().join(", ");
        let hospital = record.hospital();
        let address = record.address();

        let mut fields = vec![("Name", name)];
        let title = match record {
            DonorRecord::Living(r) => {
                fields.push(("Age", r.age.to_string()));
                fields.push(("Phone", r.phone.clone()));
                fields.push(("Email", r.email.clone()));
                "Living Donor Information"
            }
            DonorRecord::Deceased(r) => {
                fields.push(("Age", r.age.to_string()));
                fields.push((
                    "Contact",
                    format!("{} ({})", r.contact_phone, r.relationship),
                ));
                fields.push(("Email", r.contact_email.clone()));
                fields.push(("Donation Date", format_date(r.donation_date)));
                "Deceased Donor Information"
            }
        };

        fields.push(("Blood Type", record.blood_type().to_string()));
        fields.push((
            "Hospital",
            format!("{} ({})", hospital.name, hospital.contact),
        ));

        let street: Vec<&str> = [
            address.street_address.as_str(),
            address.district.as_str(),
            address.postal_code.as_str(),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
        let mut location = address.location_label();
        if !street.is_empty() {
            location = format!("{}; {location}", street.join(", "));
        }
        fields.push(("Address", location));

        if let Some(c) = record.coordinates() {
            fields.push(("Coordinates", c.to_string()));
        }
        fields.push(("Available Organs", organs));
        if let Some(id) = record.id() {
            fields.push(("ID", id.to_string()));
        }

        Self { title, fields }
    }

    /// Value of a labelled field.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for RecordDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.title)?;
        for (label, value) in &self.fields {
            writeln!(f, "{label}: {value}")?;
        }
        Ok(())
    }
}
