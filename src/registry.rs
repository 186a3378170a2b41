use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{
    clock::{Clock, SystemClock},
    events::LendingEvent,
    fees,
    listing::Listing,
    observers::{LendingObserver, OverdueNotifier, TransitionLogger},
    record::{BookId, BookRecord, BookUpdate},
    status::{BookStatus, format_timestamp},
};

/// Errors returned by registry operations
///
/// Every failure is detected before the registry is touched, so a failed
/// call never leaves a record half-updated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No record carries the requested id
    #[error("Book with ID {0} not found!")]
    NotFound(BookId),
    /// Issue requested for a book that is already out
    #[error("Book with ID {0} is already issued!")]
    AlreadyIssued(BookId),
    /// Return requested for a book that is on the shelf
    #[error("Book with ID {0} is not issued!")]
    NotIssued(BookId),
    /// Update requested with an unknown field selection
    #[error("Invalid choice! No updates made ({0})")]
    InvalidSelection(String),
    /// Delete requested while the catalog holds no records
    #[error("Library is empty!")]
    EmptyRegistry,
}

/// Result alias for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Confirmation of a successful issue
#[derive(Debug, Clone, PartialEq)]
pub struct IssueReceipt {
    /// Book identifier
    pub id: BookId,
    /// Book title at issue time
    pub title: String,
    /// Who took the book
    pub borrower: String,
    /// When the book was issued
    pub issue_date: DateTime<Utc>,
    /// When the book is due back
    pub due_date: DateTime<Utc>,
}

impl fmt::Display for IssueReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Book '{}' (ID: {}) issued to {}.", self.title, self.id, self.borrower)?;
        writeln!(f, "Issue Date: {}", format_timestamp(self.issue_date))?;
        write!(f, "Last Return Date: {}", format_timestamp(self.due_date))
    }
}

/// Outcome of a successful return
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnReceipt {
    /// Book identifier
    pub id: BookId,
    /// Book title
    pub title: String,
    /// Fractional days past the due date, negative when early
    pub overdue_days: f64,
    /// Fee owed
    pub late_fee: f64,
}

impl ReturnReceipt {
    /// Whether a fee was charged
    #[must_use]
    pub fn is_late(&self) -> bool {
        self.late_fee > 0.0
    }
}

impl fmt::Display for ReturnReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_late() {
            write!(
                f,
                "Book '{}' (ID: {}) returned late by {:.2} days. Late fee: {:.2}",
                self.title, self.id, self.overdue_days, self.late_fee
            )
        } else {
            write!(f, "Book '{}' (ID: {}) returned on time. No late fee.", self.title, self.id)
        }
    }
}

/// Confirmation of a successful title/author update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateReceipt {
    /// Book identifier
    pub id: BookId,
    /// Title after the update
    pub title: String,
    /// Author after the update
    pub author: String,
    /// Which fields changed, as shown to the user
    pub confirmation: &'static str,
}

impl fmt::Display for UpdateReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.confirmation)
    }
}

/// Books the lending desk starts with
const DEFAULT_CATALOG: [(u32, &str, &str); 4] = [
    (101, "Python Programming", "John Doe"),
    (102, "C++ for Beginners", "Jane Smith"),
    (103, "Data Structures and Algorithms", "Robert Johnson"),
    (104, "Introduction to AI", "Emily Brown"),
];

/// In-memory catalog of book records with issue/return tracking
///
/// Records keep insertion order. Ids are not required to be unique; every
/// lookup acts on the first record with a matching id.
pub struct BookRegistry {
    /// Records in insertion order
    books: Vec<BookRecord>,
    /// Time source for issue and return
    clock: Box<dyn Clock>,
    /// Registered change observers
    observers: Vec<Box<dyn LendingObserver>>,
}

impl fmt::Debug for BookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookRegistry")
            .field("books", &self.books)
            .field("observers_count", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl Default for BookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BookRegistry {
    /// Create an empty registry on the system clock
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Create an empty registry reading time from `clock`
    #[must_use]
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self { books: Vec::new(), clock: Box::new(clock), observers: Vec::new() }
    }

    /// Attach the logging and overdue observers
    pub fn register_standard_observers(&mut self) {
        self.register_observer(Box::new(TransitionLogger));
        self.register_observer(Box::new(OverdueNotifier));
    }

    /// Register an observer to be notified of catalog changes
    pub fn register_observer(&mut self, observer: Box<dyn LendingObserver>) {
        self.observers.push(observer);
    }

    /// Add the four starter books
    pub fn seed_default_catalog(&mut self) {
        for (id, title, author) in DEFAULT_CATALOG {
            self.add_book(BookId(id), title, author);
        }
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the catalog holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Records in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, BookRecord> {
        self.books.iter()
    }

    /// Append an available record; duplicate ids are accepted
    pub fn add_book(&mut self, id: BookId, title: &str, author: &str) {
        self.books.push(BookRecord::new(id, title, author));
        tracing::debug!(%id, count = self.books.len(), "record appended");
        notify(&self.observers, &LendingEvent::Added { id, title: title.to_string() });
    }

    /// Remove the first record with `id`
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::EmptyRegistry` when there are no records and
    /// `RegistryError::NotFound` when no record matches.
    pub fn delete_book(&mut self, id: BookId) -> RegistryResult<BookRecord> {
        if self.books.is_empty() {
            return Err(RegistryError::EmptyRegistry);
        }

        let position =
            self.books.iter().position(|book| book.id() == id).ok_or(RegistryError::NotFound(id))?;
        let removed = self.books.remove(position);

        notify(&self.observers, &LendingEvent::Deleted { id, title: removed.title.clone() });
        Ok(removed)
    }

    /// First record with `id`, if any
    #[must_use]
    pub fn find_book(&self, id: BookId) -> Option<&BookRecord> {
        self.books.iter().find(|book| book.id() == id)
    }

    /// Mutable access to the first record with `id`
    fn find_book_mut(books: &mut [BookRecord], id: BookId) -> RegistryResult<&mut BookRecord> {
        books.iter_mut().find(|book| book.id() == id).ok_or(RegistryError::NotFound(id))
    }

    /// Lend a book out for the standard loan period
    ///
    /// The borrower's name appears in the receipt and the event only; the
    /// record does not keep it.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if no record matches and
    /// `RegistryError::AlreadyIssued` if the book is already out.
    pub fn issue_book(&mut self, id: BookId, borrower: &str) -> RegistryResult<IssueReceipt> {
        let record = Self::find_book_mut(&mut self.books, id)?;
        if record.status.is_issued() {
            return Err(RegistryError::AlreadyIssued(id));
        }

        let issue_date = self.clock.now();
        let due_date = fees::due_date_for(issue_date);
        record.status = BookStatus::Issued { issue_date, due_date };

        let receipt = IssueReceipt {
            id,
            title: record.title.clone(),
            borrower: borrower.to_string(),
            issue_date,
            due_date,
        };
        notify(
            &self.observers,
            &LendingEvent::Issued { id, borrower: receipt.borrower.clone(), issue_date, due_date },
        );
        Ok(receipt)
    }

    /// Take a book back, charging for every day past its due date
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if no record matches and
    /// `RegistryError::NotIssued` if the book is not out.
    pub fn return_book(&mut self, id: BookId) -> RegistryResult<ReturnReceipt> {
        let record = Self::find_book_mut(&mut self.books, id)?;
        let BookStatus::Issued { due_date, .. } = record.status else {
            return Err(RegistryError::NotIssued(id));
        };

        let returned_at = self.clock.now();
        let late_fee = fees::late_fee(due_date, returned_at);
        let overdue_days = fees::overdue_days(due_date, returned_at);
        record.status = BookStatus::Available;

        notify(&self.observers, &LendingEvent::Returned { id, late_fee });
        Ok(ReturnReceipt { id, title: record.title.clone(), overdue_days, late_fee })
    }

    /// Overwrite title, author, or both; status and dates are untouched
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if no record matches.
    pub fn update_book(&mut self, id: BookId, update: BookUpdate) -> RegistryResult<&BookRecord> {
        let record = Self::find_book_mut(&mut self.books, id)?;
        record.apply(update);
        notify(&self.observers, &LendingEvent::Updated { id });
        Ok(&*record)
    }

    /// Update from a numbered field selection (1 title, 2 author, 3 both)
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if no record matches, then
    /// `RegistryError::InvalidSelection` for an unknown or incomplete choice.
    pub fn update_book_by_choice(
        &mut self,
        id: BookId,
        choice: u32,
        title: Option<String>,
        author: Option<String>,
    ) -> RegistryResult<UpdateReceipt> {
        if self.find_book(id).is_none() {
            return Err(RegistryError::NotFound(id));
        }
        let update = BookUpdate::from_choice(choice, title, author)?;
        let confirmation = update.confirmation();
        let record = self.update_book(id, update)?;
        Ok(UpdateReceipt {
            id,
            title: record.title.clone(),
            author: record.author.clone(),
            confirmation,
        })
    }

    /// Snapshot of all records in insertion order
    #[must_use]
    pub fn list_books(&self) -> Listing {
        if self.books.is_empty() { Listing::Empty } else { Listing::Books(self.books.clone()) }
    }
}

impl<'a> IntoIterator for &'a BookRegistry {
    type Item = &'a BookRecord;
    type IntoIter = std::slice::Iter<'a, BookRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Deliver `event` to every observer
fn notify(observers: &[Box<dyn LendingObserver>], event: &LendingEvent) {
    tracing::trace!(id = %event.book_id(), observers = observers.len(), "notifying observers");
    for observer in observers {
        observer.on_event(event);
    }
}
