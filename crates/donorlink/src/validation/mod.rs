//! Field validation for wizard steps.
//!
//! Validation is split in two halves:
//!
//! - **Rules** ([`rules`]): pure predicates deciding whether a value is
//!   acceptable for a field kind.
//!
//! - **Markers** ([`FieldAnnotator`]): the visible side effect, an inline
//!   error shown next to a failing field and removed once it passes.
//!
//! # Example
//!
//! ```
//! use donorlink::record::FormData;
//! use donorlink::validation::{validate_fields, ErrorMarkers, FieldKind, FieldSpec};
//!
//! let fields = [
//!     FieldSpec::required("donorName", "Full name", FieldKind::Text),
//!     FieldSpec::required("donorEmail", "Email", FieldKind::Email),
//! ];
//! let form = FormData::from_pairs([("donorName", "Jane"), ("donorEmail", "jane@")]);
//! let mut markers = ErrorMarkers::new();
//!
//! assert!(!validate_fields(&fields, &form, &mut markers));
//! assert!(markers.is_marked("donorEmail"));
//! assert!(!markers.is_marked("donorName"));
//! ```

mod markers;
pub mod rules;

use tracing::trace;

use crate::record::FormData;

pub use markers::{ErrorMarkers, FieldAnnotator};
pub use rules::ValidationError;

/// How a form field is entered, which decides the rule applied to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Free text.
    Text,
    /// Numeric input.
    Number,
    /// Calendar date.
    Date,
    /// Choice from a fixed list.
    Select,
    /// Email address.
    Email,
    /// Telephone number.
    Phone,
    /// Several checkboxes sharing one name.
    CheckboxGroup,
}

/// One field of a wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Form field name.
    pub name: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Input kind.
    pub kind: FieldKind,
    /// Whether the field must pass validation before the step can be left.
    pub required: bool,
}

impl FieldSpec {
    /// A required field.
    #[must_use]
    pub const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
        }
    }

    /// An optional field; never validated.
    #[must_use]
    pub const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
        }
    }
}

/// Check one field against the rule for its kind.
///
/// # Errors
///
/// Returns the [`ValidationError`] describing why the value was rejected.
pub fn check_field(field: &FieldSpec, form: &FormData) -> Result<(), ValidationError> {
    let value = form.get(field.name).unwrap_or_default();
    match field.kind {
        FieldKind::CheckboxGroup => rules::has_selection(form.get_all(field.name))
            .then_some(())
            .ok_or(ValidationError::NoSelection),
        FieldKind::Email => rules::is_valid_email(value)
            .then_some(())
            .ok_or(ValidationError::InvalidEmail),
        FieldKind::Phone => rules::is_valid_phone(value)
            .then_some(())
            .ok_or(ValidationError::InvalidPhone),
        FieldKind::Text | FieldKind::Number | FieldKind::Date | FieldKind::Select => {
            rules::is_present(value)
                .then_some(())
                .ok_or(ValidationError::Required)
        }
    }
}

/// Validate every required field, marking failures and clearing passes.
///
/// Every field is checked and annotated; a failure does not stop the
/// remaining fields from being checked. Returns `true` if all passed.
pub fn validate_fields<'a, I, A>(fields: I, form: &FormData, annotator: &mut A) -> bool
where
    I: IntoIterator<Item = &'a FieldSpec>,
    A: FieldAnnotator + ?Sized,
{
    let mut all_valid = true;
    for field in fields.into_iter().filter(|f| f.required) {
        match check_field(field, form) {
            Ok(()) => annotator.clear(field.name),
            Err(error) => {
                trace!(field = field.name, %error, "Field failed validation");
                annotator.mark(field.name, error);
                all_valid = false;
            }
        }
    }
    all_valid
}
