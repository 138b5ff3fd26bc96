//! Built-in sample records used to bootstrap an empty store.

use chrono::{DateTime, NaiveDate, Utc};

use crate::record::{
    Address, BloodType, DeceasedDonorRecord, Hospital, LivingDonorRecord, RecordKind,
};

fn address(state: &str, district: &str, city: &str, street: &str, postal: &str) -> Address {
    Address {
        country: "US".to_string(),
        state: state.to_string(),
        district: district.to_string(),
        city: city.to_string(),
        street_address: street.to_string(),
        postal_code: postal.to_string(),
    }
}

fn hospital(name: &str, contact: &str) -> Hospital {
    Hospital {
        name: name.to_string(),
        contact: contact.to_string(),
    }
}

fn tags(organs: &[&str]) -> Vec<String> {
    organs.iter().map(ToString::to_string).collect()
}

#[allow(clippy::too_many_arguments)]
fn living(
    name: &str,
    age: u32,
    blood_type: BloodType,
    phone: &str,
    email: &str,
    organs: &[&str],
    hospital: Hospital,
    address: Address,
    coordinates: &str,
    timestamp: DateTime<Utc>,
) -> LivingDonorRecord {
    LivingDonorRecord {
        id: None,
        name: name.to_string(),
        age,
        blood_type,
        phone: phone.to_string(),
        email: email.to_string(),
        organs: tags(organs),
        hospital,
        address,
        coordinates: Some(coordinates.to_string()),
        timestamp,
        kind: RecordKind::Living,
    }
}

/// The three sample living donors, stamped with `timestamp`.
#[must_use]
pub fn living_donors(timestamp: DateTime<Utc>) -> Vec<LivingDonorRecord> {
    vec![
        living(
            "John Smith",
            35,
            BloodType::OPositive,
            "+1-555-0123",
            "john.smith@email.com",
            &["heart", "liver", "kidney"],
            hospital("City General Hospital", "+1-555-0100"),
            address("New York", "Manhattan", "New York", "123 Medical Ave", "10001"),
            "40.7589, -73.9851",
            timestamp,
        ),
        living(
            "Sarah Johnson",
            28,
            BloodType::APositive,
            "+1-555-0124",
            "sarah.johnson@email.com",
            &["cornea", "skin", "bone"],
            hospital("Metro Health Center", "+1-555-0101"),
            address("California", "Los Angeles", "Los Angeles", "456 Health Blvd", "90210"),
            "34.0522, -118.2437",
            timestamp,
        ),
        living(
            "Michael Brown",
            42,
            BloodType::BPositive,
            "+1-555-0125",
            "michael.brown@email.com",
            &["lungs", "pancreas"],
            hospital("Regional Medical Center", "+1-555-0102"),
            address("Texas", "Harris", "Houston", "789 Care Street", "77001"),
            "29.7604, -95.3698",
            timestamp,
        ),
    ]
}

/// The two sample deceased donors, stamped with `timestamp`.
#[must_use]
pub fn deceased_donors(timestamp: DateTime<Utc>) -> Vec<DeceasedDonorRecord> {
    let entries = [
        (
            "Robert Wilson",
            65,
            BloodType::ONegative,
            ("+1-555-0200", "family.wilson@email.com", "spouse"),
            &["heart", "liver", "cornea"][..],
            (2024, 1, 15),
            hospital("Memorial Hospital", "+1-555-0201"),
            address("Florida", "Miami-Dade", "Miami", "789 Memorial Drive", "33101"),
            "25.7617, -80.1918",
        ),
        (
            "Maria Garcia",
            45,
            BloodType::APositive,
            ("+1-555-0202", "garcia.family@email.com", "daughter"),
            &["kidney", "pancreas", "skin"][..],
            (2024, 2, 10),
            hospital("General Medical Center", "+1-555-0203"),
            address("Texas", "Dallas", "Dallas", "456 Medical Blvd", "75201"),
            "32.7767, -96.7970",
        ),
    ];

    entries
        .into_iter()
        .map(
            |(name, age, blood_type, (phone, email, relationship), organs, (y, m, d), hospital, address, coordinates)| {
                DeceasedDonorRecord {
                    id: None,
                    name: name.to_string(),
                    age,
                    blood_type,
                    contact_phone: phone.to_string(),
                    contact_email: email.to_string(),
                    relationship: relationship.to_string(),
                    donated_organs: tags(organs),
                    donation_date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
                    hospital,
                    address,
                    coordinates: Some(coordinates.to_string()),
                    timestamp,
                    kind: RecordKind::Deceased,
                }
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Coordinates, DonorRecord};

    #[test]
    fn test_seed_counts() {
        let now = Utc::now();
        assert_eq!(living_donors(now).len(), 3);
        assert_eq!(deceased_donors(now).len(), 2);
    }

    #[test]
    fn test_seeds_have_no_identity_and_valid_coordinates() {
        let now = Utc::now();
        let all: Vec<DonorRecord> = living_donors(now)
            .into_iter()
            .map(DonorRecord::from)
            .chain(deceased_donors(now).into_iter().map(DonorRecord::from))
            .collect();

        for record in &all {
            assert!(record.id().is_none());
            assert!(!record.organs().is_empty());
            assert!(record.coordinates().is_some(), "{}", record.name());
        }
    }

    #[test]
    fn test_seed_values() {
        let now = Utc::now();
        let living = living_donors(now);
        assert_eq!(living[0].name, "John Smith");
        assert_eq!(living[1].address.city, "Los Angeles");
        assert_eq!(living[2].organs, vec!["lungs", "pancreas"]);

        let deceased = deceased_donors(now);
        assert_eq!(deceased[0].address.city, "Miami");
        assert_eq!(deceased[0].blood_type, BloodType::ONegative);
        assert_eq!(
            deceased[1].donation_date,
            NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()
        );
        assert_eq!(
            Coordinates::parse(deceased[1].coordinates.as_deref().unwrap()),
            Coordinates::new(32.7767, -96.7970)
        );
    }
}
