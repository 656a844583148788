//! Summary assemblers.
//!
//! The engine's computation units ([`streak`], [`trend`], [`insight`],
//! [`plan`]) are pure functions over in-memory data. The assemblers in this
//! module do the only I/O: they fetch a bounded window of records from the
//! store, hand the materialized collections to the engine, and package the
//! results for presentation.
//!
//! The reference date is always caller-supplied; nothing here reads the
//! clock, so two calls with the same inputs yield identical outputs.
//!
//! [`streak`]: super::streak
//! [`trend`]: super::trend
//! [`insight`]: super::insight
//! [`plan`]: super::plan

use crate::analytics::{insight, plan, streak, trend};
use crate::db::Database;
use crate::error::Result;
use crate::types::{MetricKey, StreakResult, TrendResult};
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

/// How many check-ins the streak assembler fetches at most: one year.
const STREAK_HISTORY_LIMIT: u32 = 365;

/// A date-bounded summary of trends, plan completion, and insights.
#[derive(Debug, Clone, Serialize)]
pub struct WeeklySummary {
    /// First day of the analyzed window (inclusive)
    pub period_start: NaiveDate,
    /// Last day of the analyzed window (inclusive, the reference date)
    pub period_end: NaiveDate,
    /// Check-in records found in the window
    pub checkin_count: usize,
    /// Per-metric trend results; only metrics with at least one sample appear
    pub trends: HashMap<MetricKey, TrendResult>,
    /// Aggregate plan completion rate for the window, 0-100
    pub completion_rate: u8,
    /// Natural-language observations, at least one
    pub insights: Vec<String>,
}

/// Streak counters plus milestone context.
#[derive(Debug, Clone, Serialize)]
pub struct StreakInfo {
    /// Computed streak counters
    pub streaks: StreakResult,
    /// Highest milestone the current streak has reached
    pub milestone: Option<u32>,
    /// Next milestone ahead of the current streak
    pub next_milestone: Option<u32>,
}

/// Assemble a weekly summary for the window ending at `reference`.
///
/// Fetches `weeks_back` weeks of check-ins and plans, runs the trend
/// analyzer once per metric that has samples, reduces plans to a completion
/// rate, and composes insights from the per-metric results.
pub fn weekly_summary(
    db: &Database,
    user: &str,
    reference: NaiveDate,
    weeks_back: u32,
) -> Result<WeeklySummary> {
    let period_start = reference - Duration::days(7 * weeks_back.max(1) as i64);

    tracing::debug!(user, %period_start, %reference, "Assembling weekly summary");

    let checkins = db.get_checkins_between(user, period_start, reference)?;
    let plans = db.get_plans_between(user, period_start, reference)?;

    // Group samples chronologically per metric. Duplicate same-day records
    // contribute one sample each; de-duplication is a caller concern.
    let mut series: HashMap<MetricKey, Vec<f64>> = HashMap::new();
    for checkin in &checkins {
        for key in MetricKey::ALL {
            if let Some(&value) = checkin.metrics.get(&key) {
                series.entry(key).or_default().push(value);
            }
        }
    }

    let trends: HashMap<MetricKey, TrendResult> = series
        .into_iter()
        .map(|(key, values)| (key, trend::analyze(&values, key.is_inverted())))
        .collect();

    let completion_rate = plan::completion_rate(&plans);
    let insights = insight::compose(&trends);

    tracing::info!(
        user,
        checkins = checkins.len(),
        plans = plans.len(),
        completion_rate,
        insights = insights.len(),
        "Weekly summary assembled"
    );

    Ok(WeeklySummary {
        period_start,
        period_end: reference,
        checkin_count: checkins.len(),
        trends,
        completion_rate,
        insights,
    })
}

/// Assemble streak info from up to one year of check-in history.
pub fn streak_info(db: &Database, user: &str, reference: NaiveDate) -> Result<StreakInfo> {
    let dates = db.get_recent_checkin_dates(user, STREAK_HISTORY_LIMIT)?;

    tracing::debug!(user, dates = dates.len(), %reference, "Assembling streak info");

    let streaks = streak::compute(&dates, reference);

    Ok(StreakInfo {
        milestone: streak::current_milestone(streaks.current_streak),
        next_milestone: streak::next_milestone(streaks.current_streak),
        streaks,
    })
}
