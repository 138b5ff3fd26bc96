//! Flat form data as delivered by the form surface.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Field-name to value mapping for one submitted form.
///
/// A name that appears more than once (a checkbox group) keeps every value
/// in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    values: BTreeMap<String, Vec<String>>,
}

/// A JSON form value: a single string or a list of checked values.
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonValue {
    One(String),
    Many(Vec<String>),
}

impl FormData {
    /// Create empty form data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build form data from name/value pairs, collapsing repeated names.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut form = Self::new();
        for (name, value) in pairs {
            form.append(name, value);
        }
        form
    }

    /// Parse a JSON object whose values are strings or string arrays.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not such an object.
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: BTreeMap<String, JsonValue> = serde_json::from_str(text)?;
        let values = raw
            .into_iter()
            .map(|(name, value)| match value {
                JsonValue::One(v) => (name, vec![v]),
                JsonValue::Many(vs) => (name, vs),
            })
            .collect();
        Ok(Self { values })
    }

    /// Serialize as a JSON object of string arrays, readable by
    /// [`FormData::from_json`].
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.values)?)
    }

    /// Take every field present in `other`, replacing this form's values
    /// for those names.
    pub fn overlay(&mut self, other: FormData) {
        self.values.extend(other.values);
    }

    /// Add a value under `name`, keeping any existing values.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values
            .entry(name.into())
            .or_default()
            .push(value.into());
    }

    /// Replace every value under `name` with a single value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), vec![value.into()]);
    }

    /// Remove every value under `name`.
    pub fn remove(&mut self, name: &str) {
        self.values.remove(name);
    }

    /// First value under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .and_then(|vs| vs.first())
            .map(String::as_str)
    }

    /// All values under `name`; empty if the field was not submitted.
    #[must_use]
    pub fn get_all(&self, name: &str) -> &[String] {
        self.values
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Trimmed value of a field that must be present and non-blank.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidField`] if the field is missing or blank.
    pub fn require(&self, name: &str) -> Result<String> {
        self.optional(name)
            .ok_or_else(|| Error::invalid_field(name, "this field is required"))
    }

    /// Trimmed value of a field, or `None` if missing or blank.
    #[must_use]
    pub fn optional(&self, name: &str) -> Option<String> {
        self.get(name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(ToString::to_string)
    }

    /// Non-blank values of a checkbox group, trimmed.
    #[must_use]
    pub fn checked(&self, name: &str) -> Vec<String> {
        self.get_all(name)
            .iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(ToString::to_string)
            .collect()
    }

    /// Check whether no field has been submitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Clear every field, as the form surface does after a submission.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}
