//! Consecutive-day streak calculation.
//!
//! A streak is a maximal run of calendar days with no gap greater than one
//! day between consecutive check-in dates. The input is a *set* of distinct
//! dates: order is irrelevant to the caller and same-day duplicates collapse
//! before they reach this module.
//!
//! The reference "today" is always caller-supplied, never read from the
//! clock, so every function here is pure and testable without time mocking.

use crate::types::StreakResult;
use chrono::{Duration, NaiveDate};
use std::collections::BTreeSet;

/// Streak milestones, in days.
pub const MILESTONES: [u32; 8] = [3, 7, 14, 30, 60, 90, 180, 365];

/// Compute streak counters for a set of check-in dates.
///
/// - Current streak: anchored at `reference` if present, else `reference - 1`
///   if present, else 0; walks backward one calendar day at a time until the
///   first missing day.
/// - Longest streak: maximal run of adjacent dates anywhere in the set.
/// - Weekly consistency: distinct dates in the trailing 7-day window ending
///   at `reference`, over 7, as a rounded percentage capped at 100.
pub fn compute(dates: &BTreeSet<NaiveDate>, reference: NaiveDate) -> StreakResult {
    if dates.is_empty() {
        return StreakResult::default();
    }

    StreakResult {
        current_streak: current_streak(dates, reference),
        longest_streak: longest_streak(dates),
        total_checkins: dates.len() as u32,
        weekly_consistency_pct: weekly_consistency_pct(dates, reference),
    }
}

fn current_streak(dates: &BTreeSet<NaiveDate>, reference: NaiveDate) -> u32 {
    // The streak is still "current" if it reaches today or ended yesterday.
    let anchor = if dates.contains(&reference) {
        reference
    } else {
        let yesterday = reference - Duration::days(1);
        if dates.contains(&yesterday) {
            yesterday
        } else {
            return 0;
        }
    };

    let mut streak = 0u32;
    let mut day = anchor;
    while dates.contains(&day) {
        streak += 1;
        day -= Duration::days(1);
    }
    streak
}

fn longest_streak(dates: &BTreeSet<NaiveDate>) -> u32 {
    let mut longest = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;

    for &date in dates {
        run = match prev {
            Some(p) if date - p == Duration::days(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(date);
    }
    longest
}

fn weekly_consistency_pct(dates: &BTreeSet<NaiveDate>, reference: NaiveDate) -> u8 {
    let window_start = reference - Duration::days(7);
    let in_window = dates
        .iter()
        .filter(|&&d| d >= window_start && d <= reference)
        .count();
    let pct = (in_window as f64 / 7.0 * 100.0).round() as u32;
    pct.min(100) as u8
}

/// The highest milestone the given streak has reached, if any.
pub fn current_milestone(streak: u32) -> Option<u32> {
    MILESTONES.iter().rev().find(|&&m| streak >= m).copied()
}

/// The next milestone ahead of the given streak, if any remain.
pub fn next_milestone(streak: u32) -> Option<u32> {
    MILESTONES.iter().find(|&&m| streak < m).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn dates(spec: &[&str]) -> BTreeSet<NaiveDate> {
        spec.iter().map(|s| date(s)).collect()
    }

    #[test]
    fn test_empty_set_is_all_zeros() {
        let result = compute(&BTreeSet::new(), date("2024-06-03"));
        assert_eq!(result, StreakResult::default());
    }

    #[test]
    fn test_unbroken_run_through_reference() {
        let set = dates(&["2024-06-01", "2024-06-02", "2024-06-03"]);
        let result = compute(&set, date("2024-06-03"));
        assert_eq!(result.current_streak, 3);
        assert_eq!(result.longest_streak, 3);
        assert_eq!(result.total_checkins, 3);
    }

    #[test]
    fn test_gap_breaks_both_streaks() {
        let set = dates(&["2024-06-01", "2024-06-03"]);
        let result = compute(&set, date("2024-06-03"));
        assert_eq!(result.current_streak, 1);
        assert_eq!(result.longest_streak, 1);
    }

    #[test]
    fn test_single_date_on_reference() {
        let set = dates(&["2024-06-03"]);
        let result = compute(&set, date("2024-06-03"));
        assert_eq!(result.current_streak, 1);
        assert_eq!(result.longest_streak, 1);
    }

    #[test]
    fn test_streak_ending_yesterday_still_counts() {
        let set = dates(&["2024-06-01", "2024-06-02"]);
        let result = compute(&set, date("2024-06-03"));
        assert_eq!(result.current_streak, 2);
    }

    #[test]
    fn test_streak_resets_after_two_missing_days() {
        // Neither the reference nor the day before is present, so the
        // current streak is 0 regardless of older history.
        let set = dates(&["2024-05-28", "2024-05-29", "2024-05-30", "2024-06-01"]);
        let result = compute(&set, date("2024-06-03"));
        assert_eq!(result.current_streak, 0);
        assert_eq!(result.longest_streak, 3);
    }

    #[test]
    fn test_longest_exceeds_current() {
        let set = dates(&[
            "2024-05-01",
            "2024-05-02",
            "2024-05-03",
            "2024-05-04",
            "2024-05-05",
            "2024-06-02",
            "2024-06-03",
        ]);
        let result = compute(&set, date("2024-06-03"));
        assert_eq!(result.current_streak, 2);
        assert_eq!(result.longest_streak, 5);
        assert!(result.longest_streak >= result.current_streak);
    }

    #[test]
    fn test_current_streak_monotonicity() {
        // Reference plus the N days preceding it gives N+1.
        let reference = date("2024-06-30");
        for n in 0..10u32 {
            let set: BTreeSet<NaiveDate> = (0..=n)
                .map(|i| reference - Duration::days(i as i64))
                .collect();
            let result = compute(&set, reference);
            assert_eq!(result.current_streak, n + 1);
        }
    }

    #[test]
    fn test_weekly_consistency() {
        // 7 of the trailing days present -> 100%.
        let reference = date("2024-06-14");
        let set: BTreeSet<NaiveDate> =
            (0..7).map(|i| reference - Duration::days(i)).collect();
        let result = compute(&set, reference);
        assert_eq!(result.weekly_consistency_pct, 100);

        // 3 of 7 -> round(3/7*100) = 43%.
        let set = dates(&["2024-06-12", "2024-06-13", "2024-06-14"]);
        let result = compute(&set, reference);
        assert_eq!(result.weekly_consistency_pct, 43);
    }

    #[test]
    fn test_weekly_consistency_caps_at_100() {
        // The window boundary is inclusive of reference - 7, so 8 days can
        // qualify; the percentage is still capped.
        let reference = date("2024-06-14");
        let set: BTreeSet<NaiveDate> =
            (0..8).map(|i| reference - Duration::days(i)).collect();
        let result = compute(&set, reference);
        assert_eq!(result.weekly_consistency_pct, 100);
    }

    #[test]
    fn test_old_dates_outside_week_window_ignored() {
        let set = dates(&["2024-05-01", "2024-06-14"]);
        let result = compute(&set, date("2024-06-14"));
        assert_eq!(result.weekly_consistency_pct, 14); // round(1/7*100)
    }

    #[test]
    fn test_milestones() {
        assert_eq!(current_milestone(0), None);
        assert_eq!(current_milestone(2), None);
        assert_eq!(current_milestone(3), Some(3));
        assert_eq!(current_milestone(10), Some(7));
        assert_eq!(current_milestone(400), Some(365));

        assert_eq!(next_milestone(0), Some(3));
        assert_eq!(next_milestone(3), Some(7));
        assert_eq!(next_milestone(100), Some(180));
        assert_eq!(next_milestone(365), None);
    }
}
