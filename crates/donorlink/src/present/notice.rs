//! User-facing notices.

use std::fmt;

use serde::Serialize;

use crate::error::Error;
use crate::record::RecordKind;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    /// Neutral information.
    Info,
    /// An action completed.
    Success,
    /// An action failed.
    Error,
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Short heading.
    pub title: String,
    /// Body text; may be empty.
    pub message: String,
    /// Whether repeating the same action may succeed.
    pub retryable: bool,
}

impl Notice {
    fn new(level: NoticeLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
            retryable: false,
        }
    }

    /// Registration completed.
    #[must_use]
    pub fn saved(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Living => Self::new(
                NoticeLevel::Success,
                "Registration Successful!",
                "Thank you for registering as an organ donor. Your information has been saved.",
            ),
            RecordKind::Deceased => Self::new(
                NoticeLevel::Success,
                "Deceased Donor Registered!",
                "Thank you for registering the deceased donor. \
                 Their donated organs are now available for those in need.",
            ),
        }
    }

    /// Registration could not be saved.
    #[must_use]
    pub fn save_failed(kind: RecordKind) -> Self {
        let message = match kind {
            RecordKind::Living => "Error saving donor information. Please try again.",
            RecordKind::Deceased => "Error saving deceased donor information. Please try again.",
        };
        Self {
            retryable: true,
            ..Self::new(NoticeLevel::Error, "Save failed", message)
        }
    }

    /// A search matched nothing.
    #[must_use]
    pub fn no_results(total_records: usize) -> Self {
        Self::new(
            NoticeLevel::Info,
            "No donors found",
            format!(
                "Try adjusting your search criteria or expanding your search radius. \
                 Total donors in database: {total_records}"
            ),
        )
    }

    /// Notice for an error that reached the user.
    #[must_use]
    pub fn from_error(err: &Error) -> Self {
        match err {
            Error::EmptyCriteria => Self::new(
                NoticeLevel::Error,
                "Please select an organ to search for",
                "",
            ),
            Error::InvalidField { .. } => {
                Self::new(NoticeLevel::Error, "Invalid form data", err.to_string())
            }
            Error::RecordNotFound(id) => {
                Self::new(NoticeLevel::Error, "Donor not found", format!("No donor with id {id}"))
            }
            _ => Self {
                retryable: err.is_retryable(),
                ..Self::new(NoticeLevel::Error, "Something went wrong", err.to_string())
            },
        }
    }
}

impl From<&Error> for Notice {
    fn from(err: &Error) -> Self {
        Self::from_error(err)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)?;
        if !self.message.is_empty() {
            write!(f, "\n{}", self.message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_criteria_notice() {
        let notice = Notice::from_error(&Error::EmptyCriteria);
        assert_eq!(notice.title, "Please select an organ to search for");
        assert_eq!(notice.to_string(), "Please select an organ to search for");
        assert!(!notice.retryable);
    }

    #[test]
    fn test_save_failed_is_retryable() {
        let notice = Notice::save_failed(RecordKind::Living);
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(
            notice.message,
            "Error saving donor information. Please try again."
        );
        assert!(notice.retryable);
    }

    #[test]
    fn test_saved_differs_per_kind() {
        assert_eq!(Notice::saved(RecordKind::Deceased).title, "Deceased Donor Registered!");
        assert_ne!(
            Notice::saved(RecordKind::Living).title,
            Notice::saved(RecordKind::Deceased).title
        );
    }

    #[test]
    fn test_no_results_includes_total() {
        let notice = Notice::no_results(5);
        assert_eq!(notice.title, "No donors found");
        assert!(notice.message.ends_with("Total donors in database: 5"));
    }

    #[test]
    fn test_store_error_retryable() {
        let err = Error::store_unavailable("fetch", "offline");
        let notice = Notice::from(&err);
        assert!(notice.retryable);
        assert!(notice.message.contains("offline"));
    }
}
