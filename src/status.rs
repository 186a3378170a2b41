use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Render a timestamp the way the lending desk prints dates
#[must_use]
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%a %b %e %T %Y").to_string()
}

/// Lending status of a single book record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BookStatus {
    /// Book is on the shelf and can be issued
    #[default]
    Available,
    /// Book is lent out until `due_date`
    Issued {
        /// When the book was handed out
        issue_date: DateTime<Utc>,
        /// Last day the book can be returned without a fee
        due_date: DateTime<Utc>,
    },
}

impl BookStatus {
    /// Short label used in listings
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Issued { .. } => "Issued",
        }
    }

    /// Get a human-readable description of the status
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Available => "Book is available for issue".to_string(),
            Self::Issued { due_date, .. } => {
                format!("Book is issued until {}", format_timestamp(*due_date))
            }
        }
    }

    /// Whether the book is currently lent out
    #[must_use]
    pub fn is_issued(&self) -> bool {
        matches!(self, Self::Issued { .. })
    }

    /// Issue timestamp, present only while issued
    #[must_use]
    pub fn issue_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Available => None,
            Self::Issued { issue_date, .. } => Some(*issue_date),
        }
    }

    /// Due timestamp, present only while issued
    #[must_use]
    pub fn due_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Available => None,
            Self::Issued { due_date, .. } => Some(*due_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn available_has_no_dates() {
        let status = BookStatus::default();
        assert_eq!(status, BookStatus::Available);
        assert!(!status.is_issued());
        assert!(status.issue_date().is_none());
        assert!(status.due_date().is_none());
        assert_eq!(status.label(), "Available");
    }

    #[test]
    fn issued_exposes_both_dates() {
        let issue_date = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).single().unwrap_or_default();
        let due_date = Utc.with_ymd_and_hms(2024, 3, 8, 9, 0, 0).single().unwrap_or_default();
        let status = BookStatus::Issued { issue_date, due_date };

        assert!(status.is_issued());
        assert_eq!(status.issue_date(), Some(issue_date));
        assert_eq!(status.due_date(), Some(due_date));
        assert_eq!(status.label(), "Issued");
        assert!(status.description().contains("Mar  8"));
    }

    #[test]
    fn serializes_with_state_tag() {
        let json = serde_json::to_string(&BookStatus::Available).unwrap_or_default();
        assert_eq!(json, r#"{"state":"available"}"#);
    }
}
