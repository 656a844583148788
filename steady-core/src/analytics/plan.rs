//! Plan completion-rate aggregation.

use crate::types::PlanRecord;

/// Aggregate completion rate over a window of plan records, 0-100.
///
/// Sums across all records first so that a day with many actions weighs
/// more than a day with one. An empty window (or one with no planned
/// actions) yields 0.
pub fn completion_rate(plans: &[PlanRecord]) -> u8 {
    let mut completed = 0u64;
    let mut total = 0u64;
    for plan in plans {
        completed += plan.completed_count as u64;
        total += plan.total_count as u64;
    }

    if total == 0 {
        return 0;
    }
    let pct = (completed as f64 / total as f64 * 100.0).round() as u64;
    pct.min(100) as u8
}
