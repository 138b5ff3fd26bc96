//! Inline error markers attached to form fields.

use std::collections::BTreeMap;

use super::ValidationError;

/// Receives the visible side effect of validating a field.
pub trait FieldAnnotator {
    /// Show an error marker next to `field`, replacing any existing one.
    fn mark(&mut self, field: &str, error: ValidationError);

    /// Remove the marker next to `field`, if any.
    fn clear(&mut self, field: &str);
}

/// The set of error markers currently shown on a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMarkers {
    markers: BTreeMap<String, ValidationError>,
}

impl ErrorMarkers {
    /// Create an empty marker set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The marker shown next to `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<ValidationError> {
        self.markers.get(field).copied()
    }

    /// Check whether `field` currently shows a marker.
    #[must_use]
    pub fn is_marked(&self, field: &str) -> bool {
        self.markers.contains_key(field)
    }

    /// Number of fields showing a marker.
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Check whether no field shows a marker.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Iterate over marked fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ValidationError)> {
        self.markers.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Remove every marker.
    pub fn clear_all(&mut self) {
        self.markers.clear();
    }
}

impl FieldAnnotator for ErrorMarkers {
    fn mark(&mut self, field: &str, error: ValidationError) {
        self.markers.insert(field.to_string(), error);
    }

    fn clear(&mut self, field: &str) {
        self.markers.remove(field);
    }
}
