//! Loan period and late fee rules.
//!
//! Both are fixed: a book is due seven days after it is issued and every
//! day past that costs a flat [`DAILY_LATE_FEE`], counted fractionally.

use chrono::{DateTime, TimeDelta, Utc};

/// Days a book may stay out before fees accrue
pub const LOAN_PERIOD_DAYS: i64 = 7;

/// Fee charged per day past the due date
pub const DAILY_LATE_FEE: f64 = 10.0;

/// Milliseconds in one day
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Due date for a book issued at `issue_date`
///
/// Saturates at the latest representable instant.
#[must_use]
pub fn due_date_for(issue_date: DateTime<Utc>) -> DateTime<Utc> {
    issue_date
        .checked_add_signed(TimeDelta::days(LOAN_PERIOD_DAYS))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Fractional days between `due_date` and `returned_at`, negative when early
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn overdue_days(due_date: DateTime<Utc>, returned_at: DateTime<Utc>) -> f64 {
    returned_at.signed_duration_since(due_date).num_milliseconds() as f64 / MILLIS_PER_DAY
}

/// Fee owed for returning at `returned_at` a book due at `due_date`
#[must_use]
pub fn late_fee(due_date: DateTime<Utc>, returned_at: DateTime<Utc>) -> f64 {
    let days = overdue_days(due_date, returned_at);
    if days > 0.0 { days * DAILY_LATE_FEE } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn due() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).single().unwrap_or_default()
    }

    #[rstest]
    fn due_date_is_exactly_one_week_later(due: DateTime<Utc>) {
        let due_date = due_date_for(due);
        assert_eq!(due_date.signed_duration_since(due).num_seconds(), 604_800);
    }

    #[test]
    fn due_date_saturates_at_end_of_time() {
        let late_issue =
            DateTime::<Utc>::MAX_UTC.checked_sub_signed(TimeDelta::days(2)).unwrap_or_default();
        assert_eq!(due_date_for(late_issue), DateTime::<Utc>::MAX_UTC);
        assert_eq!(due_date_for(DateTime::<Utc>::MAX_UTC), DateTime::<Utc>::MAX_UTC);
    }

    #[rstest]
    #[case(TimeDelta::days(-3), 0.0)]
    #[case(TimeDelta::zero(), 0.0)]
    #[case(TimeDelta::days(1), 10.0)]
    #[case(TimeDelta::days(3), 30.0)]
    #[case(TimeDelta::hours(12), 5.0)]
    #[case(TimeDelta::hours(36), 15.0)]
    fn fee_is_ten_per_elapsed_day(
        due: DateTime<Utc>,
        #[case] late_by: TimeDelta,
        #[case] expected: f64,
    ) {
        let returned_at = due.checked_add_signed(late_by).unwrap_or(due);
        let fee = late_fee(due, returned_at);
        assert!((fee - expected).abs() < 1e-9, "fee {fee} != {expected}");
    }

    #[rstest]
    fn early_return_counts_negative_days(due: DateTime<Utc>) {
        let returned_at = due.checked_sub_signed(TimeDelta::days(2)).unwrap_or(due);
        assert!((overdue_days(due, returned_at) + 2.0).abs() < 1e-9);
    }
}
