//! In-memory book lending tracker.
//!
//! This crate keeps a catalog of book records, lends them out for a fixed
//! loan period and charges a flat daily fee for late returns.

pub mod clock;
pub mod events;
pub mod fees;
pub mod listing;
pub mod menu;
pub mod observers;
pub mod record;
pub mod registry;
pub mod status;

pub use clock::{Clock, ManualClock, SystemClock};
pub use events::LendingEvent;
pub use listing::{Listing, ListingView};
pub use menu::{MenuChoice, Session, SessionError};
pub use record::{BookId, BookRecord, BookUpdate};
pub use registry::{
    BookRegistry, IssueReceipt, RegistryError, RegistryResult, ReturnReceipt, UpdateReceipt,
};
pub use status::BookStatus;
