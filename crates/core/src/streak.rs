//! Consecutive-day streak arithmetic.
//!
//! Used for both the login streak and the correct-answer streak: a streak
//! increments when the last recorded date is exactly one day before today,
//! is unchanged on a same-day repeat, and resets to 1 after a gap.

use chrono::NaiveDate;

/// Result of advancing a streak to `today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakOutcome {
    /// Same-day repeat; nothing to write.
    Unchanged,
    /// The streak continues (or starts) with the contained value.
    Advanced(i32),
}

/// Advance a streak given its last recorded date and current length.
pub fn advance(last: Option<NaiveDate>, current: i32, today: NaiveDate) -> StreakOutcome {
    match last {
        Some(d) if d == today => StreakOutcome::Unchanged,
        Some(d) if today - d == chrono::Duration::days(1) => {
            StreakOutcome::Advanced(current + 1)
        }
        // Gap of more than one day, a future-dated record, or no record.
        _ => StreakOutcome::Advanced(1),
    }
}

/// New value for a stored longest-streak column.
pub fn longest(previous_longest: i32, current: i32) -> i32 {
    previous_longest.max(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn first_ever_starts_at_one() {
        assert_matches!(advance(None, 0, date(2025, 6, 1)), StreakOutcome::Advanced(1));
    }

    #[test]
    fn same_day_is_a_noop() {
        assert_matches!(
            advance(Some(date(2025, 6, 1)), 4, date(2025, 6, 1)),
            StreakOutcome::Unchanged
        );
    }

    #[test]
    fn next_day_increments() {
        assert_eq!(
            advance(Some(date(2025, 5, 31)), 4, date(2025, 6, 1)),
            StreakOutcome::Advanced(5)
        );
    }

    #[test]
    fn gap_resets_to_one() {
        assert_eq!(
            advance(Some(date(2025, 5, 29)), 4, date(2025, 6, 1)),
            StreakOutcome::Advanced(1)
        );
    }

    #[test]
    fn increment_across_month_boundary() {
        assert_eq!(
            advance(Some(date(2025, 5, 31)), 1, date(2025, 6, 1)),
            StreakOutcome::Advanced(2)
        );
    }

    #[test]
    fn longest_keeps_the_max() {
        assert_eq!(longest(7, 5), 7);
        assert_eq!(longest(5, 8), 8);
    }
}
