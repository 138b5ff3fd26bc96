//! Step layouts of the two registration forms.

use crate::record::{deceased_fields as dec, living_fields as liv, RecordKind};
use crate::validation::{FieldKind, FieldSpec};

/// One panel of a wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSchema {
    /// Heading shown above the panel.
    pub title: &'static str,
    /// Fields on the panel, in display order.
    pub fields: &'static [FieldSpec],
}

impl StepSchema {
    /// Required fields on this panel.
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.required)
    }
}

/// The ordered panels of one registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormSchema {
    /// Kind of record the form produces.
    pub kind: RecordKind,
    /// Label of the submit control when idle.
    pub submit_label: &'static str,
    /// Panels in order; never empty.
    pub steps: &'static [StepSchema],
}

impl FormSchema {
    /// Schema for the given record kind.
    #[must_use]
    pub fn for_kind(kind: RecordKind) -> &'static Self {
        match kind {
            RecordKind::Living => &LIVING,
            RecordKind::Deceased => &DECEASED,
        }
    }

    /// Number of panels.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    /// Panel at a 1-based step number.
    #[must_use]
    pub fn step(&self, number: usize) -> Option<&StepSchema> {
        number.checked_sub(1).and_then(|i| self.steps.get(i))
    }

    /// Every field of every panel.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.steps.iter().flat_map(|s| s.fields.iter())
    }

    /// Find the 1-based step a field lives on.
    #[must_use]
    pub fn step_of(&self, field: &str) -> Option<usize> {
        self.steps
            .iter()
            .position(|s| s.fields.iter().any(|f| f.name == field))
            .map(|i| i + 1)
    }
}

/// The living-donor registration form.
pub static LIVING: FormSchema = FormSchema {
    kind: RecordKind::Living,
    submit_label: "Submit Registration",
    steps: &[
        StepSchema {
            title: "Personal Information",
            fields: &[
                FieldSpec::required(liv::NAME, "Full Name", FieldKind::Text),
                FieldSpec::required(liv::AGE, "Age", FieldKind::Number),
                FieldSpec::required(liv::BLOOD_TYPE, "Blood Type", FieldKind::Select),
                FieldSpec::required(liv::PHONE, "Phone Number", FieldKind::Phone),
                FieldSpec::required(liv::EMAIL, "Email Address", FieldKind::Email),
            ],
        },
        StepSchema {
            title: "Organs to Donate",
            fields: &[FieldSpec::required(
                liv::ORGANS,
                "Organs/Tissues",
                FieldKind::CheckboxGroup,
            )],
        },
        StepSchema {
            title: "Hospital Information",
            fields: &[
                FieldSpec::required(liv::HOSPITAL_NAME, "Hospital Name", FieldKind::Text),
                FieldSpec::required(liv::HOSPITAL_CONTACT, "Hospital Contact", FieldKind::Phone),
            ],
        },
        StepSchema {
            title: "Location",
            fields: &[
                FieldSpec::required(liv::COUNTRY, "Country", FieldKind::Select),
                FieldSpec::required(liv::STATE, "State/Province", FieldKind::Text),
                FieldSpec::optional(liv::DISTRICT, "District", FieldKind::Text),
                FieldSpec::required(liv::CITY, "City", FieldKind::Text),
                FieldSpec::optional(liv::STREET_ADDRESS, "Street Address", FieldKind::Text),
                FieldSpec::optional(liv::POSTAL_CODE, "Postal Code", FieldKind::Text),
                FieldSpec::optional(liv::COORDINATES, "Coordinates", FieldKind::Text),
            ],
        },
    ],
};

/// The deceased-donor registration form, completed by next of kin.
pub static DECEASED: FormSchema = FormSchema {
    kind: RecordKind::Deceased,
    submit_label: "Register Deceased Donor",
    steps: &[
        StepSchema {
            title: "Deceased Information",
            fields: &[
                FieldSpec::required(dec::NAME, "Full Name", FieldKind::Text),
                FieldSpec::required(dec::AGE, "Age at Death", FieldKind::Number),
                FieldSpec::required(dec::BLOOD_TYPE, "Blood Type", FieldKind::Select),
            ],
        },
        StepSchema {
            title: "Next of Kin",
            fields: &[
                FieldSpec::required(dec::CONTACT_PHONE, "Contact Phone", FieldKind::Phone),
                FieldSpec::required(dec::CONTACT_EMAIL, "Contact Email", FieldKind::Email),
                FieldSpec::required(dec::RELATIONSHIP, "Relationship", FieldKind::Select),
            ],
        },
        StepSchema {
            title: "Donation Details",
            fields: &[
                FieldSpec::required(
                    dec::DONATED_ORGANS,
                    "Donated Organs/Tissues",
                    FieldKind::CheckboxGroup,
                ),
                FieldSpec::required(dec::DONATION_DATE, "Donation Date", FieldKind::Date),
            ],
        },
        StepSchema {
            title: "Hospital & Location",
            fields: &[
                FieldSpec::required(dec::HOSPITAL_NAME, "Hospital Name", FieldKind::Text),
                FieldSpec::required(dec::HOSPITAL_CONTACT, "Hospital Contact", FieldKind::Phone),
                FieldSpec::required(dec::COUNTRY, "Country", FieldKind::Select),
                FieldSpec::required(dec::STATE, "State/Province", FieldKind::Text),
                FieldSpec::optional(dec::DISTRICT, "District", FieldKind::Text),
                FieldSpec::required(dec::CITY, "City", FieldKind::Text),
                FieldSpec::optional(dec::STREET_ADDRESS, "Street Address", FieldKind::Text),
                FieldSpec::optional(dec::POSTAL_CODE, "Postal Code", FieldKind::Text),
                FieldSpec::optional(dec::COORDINATES, "Coordinates", FieldKind::Text),
            ],
        },
    ],
};

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_schemas_have_steps() {
        for schema in [&LIVING, &DECEASED] {
            assert_eq!(schema.total_steps(), 4);
            assert!(schema.steps.iter().all(|s| !s.fields.is_empty()));
        }
    }

    #[test]
    fn test_field_names_unique_per_form() {
        for schema in [&LIVING, &DECEASED] {
            let mut seen = HashSet::new();
            for field in schema.fields() {
                assert!(seen.insert(field.name), "duplicate field {}", field.name);
            }
        }
    }

    #[test]
    fn test_step_lookup_is_one_based() {
        assert!(LIVING.step(0).is_none());
        assert_eq!(LIVING.step(1).unwrap().title, "Personal Information");
        assert!(LIVING.step(5).is_none());
    }

    #[test]
    fn test_step_of() {
        assert_eq!(LIVING.step_of(liv::ORGANS), Some(2));
        assert_eq!(DECEASED.step_of(dec::DONATION_DATE), Some(3));
        assert_eq!(LIVING.step_of("nope"), None);
    }

    #[test]
    fn test_for_kind() {
        assert_eq!(FormSchema::for_kind(RecordKind::Living).kind, RecordKind::Living);
        assert_eq!(
            FormSchema::for_kind(RecordKind::Deceased).submit_label,
            "Register Deceased Donor"
        );
    }

    #[test]
    fn test_optional_location_fields() {
        let optional: Vec<_> = LIVING
            .fields()
            .filter(|f| !f.required)
            .map(|f| f.name)
            .collect();
        assert_eq!(
            optional,
            vec![
                liv::DISTRICT,
                liv::STREET_ADDRESS,
                liv::POSTAL_CODE,
                liv::COORDINATES
            ]
        );
    }
}
