use serde::{Deserialize, Serialize};

use crate::{record::BookRecord, status::format_timestamp};

/// Snapshot of the catalog for display
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", content = "books", rename_all = "snake_case")]
pub enum Listing {
    /// The catalog holds no records
    Empty,
    /// Records in insertion order
    Books(Vec<BookRecord>),
}

impl Listing {
    /// Records in the snapshot; empty slice for `Listing::Empty`
    #[must_use]
    pub fn books(&self) -> &[BookRecord] {
        match self {
            Self::Empty => &[],
            Self::Books(books) => books,
        }
    }
}

/// Rendering of catalog snapshots
#[derive(Debug)]
pub struct ListingView;

impl ListingView {
    /// Plain-text listing, one line per record plus dates for issued books
    #[must_use]
    pub fn render_text(listing: &Listing) -> String {
        let books = match listing {
            Listing::Empty => return "No books in the library!".to_string(),
            Listing::Books(books) => books,
        };

        let mut out = String::from("Library Books:");
        for book in books {
            out.push_str(&format!(
                "\nID: {}, Title: {}, Author: {}, Status: {}",
                book.id(),
                book.title,
                book.author,
                book.status.label()
            ));
            if let (Some(issue_date), Some(due_date)) =
                (book.status.issue_date(), book.status.due_date())
            {
                out.push_str(&format!(
                    "\nIssue Date: {}\nLast Return Date: {}",
                    format_timestamp(issue_date),
                    format_timestamp(due_date)
                ));
            }
        }
        out
    }

    /// Pretty-printed JSON of the snapshot
    ///
    /// # Errors
    ///
    /// Returns the serializer error if the snapshot cannot be encoded.
    pub fn render_json(listing: &Listing) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(listing)
    }
}
