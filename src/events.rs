use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::BookId;

/// Something that happened to the catalog, reported to observers
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum LendingEvent {
    /// A record was appended
    Added {
        /// Book identifier
        id: BookId,
        /// Book title
        title: String,
    },
    /// A record was removed
    Deleted {
        /// Book identifier
        id: BookId,
        /// Title of the removed record
        title: String,
    },
    /// Title or author changed
    Updated {
        /// Book identifier
        id: BookId,
    },
    /// A book was handed to a borrower
    Issued {
        /// Book identifier
        id: BookId,
        /// Who took the book; not kept on the record
        borrower: String,
        /// Issue timestamp
        issue_date: DateTime<Utc>,
        /// Due timestamp
        due_date: DateTime<Utc>,
    },
    /// A book came back
    Returned {
        /// Book identifier
        id: BookId,
        /// Fee charged on return
        late_fee: f64,
    },
}

impl LendingEvent {
    /// The book this event concerns
    #[must_use]
    pub fn book_id(&self) -> BookId {
        match self {
            Self::Added { id, .. }
            | Self::Deleted { id, .. }
            | Self::Updated { id }
            | Self::Issued { id, .. }
            | Self::Returned { id, .. } => *id,
        }
    }
}
