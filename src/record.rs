use std::{fmt, num::ParseIntError, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{registry::RegistryError, status::BookStatus};

/// Caller-assigned catalog identifier of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct BookId(pub u32);

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<u32> for BookId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// One catalog entry representing a single copy of a book
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BookRecord {
    /// Identifier, fixed at creation
    id: BookId,
    /// Book title
    pub title: String,
    /// Book author
    pub author: String,
    /// Lending status, including issue and due dates while issued
    pub status: BookStatus,
}

impl BookRecord {
    /// Create an available record
    #[must_use]
    pub fn new(id: BookId, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self { id, title: title.into(), author: author.into(), status: BookStatus::Available }
    }

    /// The record's identifier
    #[must_use]
    pub fn id(&self) -> BookId {
        self.id
    }

    /// Overwrite the fields selected by `update`, leaving status untouched
    pub(crate) fn apply(&mut self, update: BookUpdate) {
        match update {
            BookUpdate::Title(title) => self.title = title,
            BookUpdate::Author(author) => self.author = author,
            BookUpdate::Both { title, author } => {
                self.title = title;
                self.author = author;
            }
        }
    }
}

impl fmt::Display for BookRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' (ID: {})", self.title, self.id)
    }
}

/// Which descriptive fields of a record to overwrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookUpdate {
    /// Replace the title only
    Title(String),
    /// Replace the author only
    Author(String),
    /// Replace title and author
    Both {
        /// New title
        title: String,
        /// New author
        author: String,
    },
}

impl BookUpdate {
    /// Build an update from a numbered menu selection
    ///
    /// `1` selects the title, `2` the author and `3` both.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidSelection` for any other number, or when
    /// the value for a selected field is missing.
    pub fn from_choice(
        choice: u32,
        title: Option<String>,
        author: Option<String>,
    ) -> Result<Self, RegistryError> {
        match (choice, title, author) {
            (1, Some(title), _) => Ok(Self::Title(title)),
            (2, _, Some(author)) => Ok(Self::Author(author)),
            (3, Some(title), Some(author)) => Ok(Self::Both { title, author }),
            (1..=3, _, _) => {
                Err(RegistryError::InvalidSelection(format!("missing value for choice {choice}")))
            }
            _ => Err(RegistryError::InvalidSelection(format!("unknown choice {choice}"))),
        }
    }

    /// Confirmation shown after the update is applied
    #[must_use]
    pub fn confirmation(&self) -> &'static str {
        match self {
            Self::Title(_) => "Title updated successfully!",
            Self::Author(_) => "Author updated successfully!",
            Self::Both { .. } => "Title and Author updated successfully!",
        }
    }
}
