//! Pure field validation rules.
//!
//! Each rule is a plain function of the submitted value(s), so it can be
//! checked without any form surface attached.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Why a single field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ValidationError {
    /// No checkbox in the group was checked.
    #[error("Please select at least one organ/tissue")]
    NoSelection,
    /// The value is not a plausible email address.
    #[error("Please enter a valid email address")]
    InvalidEmail,
    /// The value is not a plausible phone number.
    #[error("Please enter a valid phone number")]
    InvalidPhone,
    /// The value is blank.
    #[error("This field is required")]
    Required,
}

/// A compiled validation pattern.
#[derive(Debug)]
pub struct FieldPattern {
    /// Name of the pattern for identification.
    pub name: &'static str,

    /// Description of what this pattern accepts.
    pub description: &'static str,

    regex: Regex,
}

impl FieldPattern {
    /// Create a new field pattern.
    ///
    /// # Panics
    ///
    /// Panics if the regex pattern is invalid.
    #[must_use]
    pub fn new(name: &'static str, description: &'static str, pattern: &str) -> Self {
        Self {
            name,
            description,
            regex: Regex::new(pattern).expect("Invalid regex pattern"),
        }
    }

    /// Check if the whole value is accepted by this pattern.
    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

static EMAIL: LazyLock<FieldPattern> = LazyLock::new(|| {
    FieldPattern::new(
        "email",
        "local@domain.tld with no whitespace",
        r"^[^\s@]+@[^\s@]+\.[^\s@]+$",
    )
});

static PHONE: LazyLock<FieldPattern> = LazyLock::new(|| {
    FieldPattern::new(
        "phone",
        "optional '+' then 1-16 digits, first digit non-zero",
        r"^\+?[1-9][0-9]{0,15}$",
    )
});

/// Check an email address.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL.matches(value)
}

/// Check a phone number; whitespace anywhere in the value is ignored.
#[must_use]
pub fn is_valid_phone(value: &str) -> bool {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    PHONE.matches(&compact)
}

/// Check that a value is not blank.
#[must_use]
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Check that at least one box in a checkbox group is checked.
#[must_use]
pub fn has_selection(values: &[String]) -> bool {
    values.iter().any(|v| is_present(v))
}
