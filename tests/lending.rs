use chrono::{TimeDelta, TimeZone, Utc};
use lending_tracker::{
    BookId, BookRegistry, BookStatus, Listing, ListingView, ManualClock, RegistryError,
};
use rstest::rstest;

#[test]
fn issue_then_late_return_scenario() {
    let issued_at = Utc.with_ymd_and_hms(2025, 2, 3, 8, 30, 0).single().unwrap_or_default();
    let clock = ManualClock::new(issued_at);
    let mut registry = BookRegistry::with_clock(clock.clone());

    registry.add_book(BookId(101), "A", "X");
    let receipt = registry.issue_book(BookId(101), "Bob");
    assert!(receipt.is_ok());

    let status = registry.find_book(BookId(101)).map(|book| book.status);
    let due = status.and_then(|status| status.due_date());
    let issue = status.and_then(|status| status.issue_date());
    assert_eq!(issue, Some(issued_at));
    assert_eq!(due.map(|due| due.signed_duration_since(issued_at)), Some(TimeDelta::days(7)));

    clock.advance(TimeDelta::days(10));
    let receipt = registry.return_book(BookId(101));
    let fee = receipt.as_ref().map(|r| r.late_fee).unwrap_or_default();
    assert!((fee - 30.0).abs() < 1e-9);

    let status = registry.find_book(BookId(101)).map(|book| book.status);
    assert_eq!(status, Some(BookStatus::Available));
}

#[test]
fn delete_unknown_on_empty_registry_does_not_panic() {
    let mut registry = BookRegistry::new();
    assert_eq!(registry.delete_book(BookId(999)).map(|_| ()), Err(RegistryError::EmptyRegistry));
    assert_eq!(registry.list_books(), Listing::Empty);
}

#[rstest]
#[case(&[101, 102, 103])]
#[case(&[3, 3, 1])]
#[case(&[42])]
fn listing_follows_add_order(#[case] ids: &[u32]) {
    let mut registry = BookRegistry::new();
    for id in ids {
        registry.add_book(BookId(*id), "Title", "Author");
    }

    let listed: Vec<u32> = registry.list_books().books().iter().map(|book| book.id().0).collect();
    assert_eq!(listed, ids);
}

#[test]
fn listing_is_a_snapshot() {
    let mut registry = BookRegistry::new();
    registry.add_book(BookId(1), "Before", "X");
    let listing = registry.list_books();

    registry.add_book(BookId(2), "After", "Y");
    assert_eq!(listing.books().len(), 1);
    assert!(ListingView::render_text(&listing).contains("Title: Before"));
}
