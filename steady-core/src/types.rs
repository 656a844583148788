//! Core domain types for steady
//!
//! These types represent the canonical data model: daily check-in records,
//! daily plan records, and the derived analytics shapes computed from them.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Check-in** | A user-submitted daily snapshot of self-reported wellness metrics |
//! | **Metric** | One tracked dimension (mood, stress, ...), scored 0-10 |
//! | **Inverted metric** | A metric where a numeric decrease is improvement (stress, anxiety) |
//! | **Streak** | A maximal run of consecutive calendar days with a check-in present |
//! | **Plan** | A day's micro-goal tally: actions completed out of actions planned |
//!
//! All date handling is calendar-day based using [`chrono::NaiveDate`].
//! No timezone conversion happens anywhere in the engine; callers are
//! responsible for producing dates in the user's intended local calendar.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================
// Metric keys
// ============================================

/// The fixed set of tracked wellness metrics.
///
/// Each key carries a static polarity: for most metrics a higher score is
/// better, but for [`MetricKey::Stress`] and [`MetricKey::Anxiety`] a
/// numeric decrease is the desirable direction (see [`MetricKey::is_inverted`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    Mood,
    Stress,
    Sleep,
    Energy,
    Focus,
    Anxiety,
}

impl MetricKey {
    /// All metric keys, in presentation order.
    pub const ALL: [MetricKey; 6] = [
        MetricKey::Mood,
        MetricKey::Stress,
        MetricKey::Sleep,
        MetricKey::Energy,
        MetricKey::Focus,
        MetricKey::Anxiety,
    ];

    /// Returns the identifier used in database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::Mood => "mood",
            MetricKey::Stress => "stress",
            MetricKey::Sleep => "sleep",
            MetricKey::Energy => "energy",
            MetricKey::Focus => "focus",
            MetricKey::Anxiety => "anxiety",
        }
    }

    /// Returns the title-cased display name for this metric
    pub fn display_name(&self) -> &'static str {
        match self {
            MetricKey::Mood => "Mood",
            MetricKey::Stress => "Stress",
            MetricKey::Sleep => "Sleep",
            MetricKey::Energy => "Energy",
            MetricKey::Focus => "Focus",
            MetricKey::Anxiety => "Anxiety",
        }
    }

    /// Whether a numeric decrease in this metric represents improvement.
    pub fn is_inverted(&self) -> bool {
        matches!(self, MetricKey::Stress | MetricKey::Anxiety)
    }
}

impl std::str::FromStr for MetricKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mood" => Ok(MetricKey::Mood),
            "stress" => Ok(MetricKey::Stress),
            "sleep" => Ok(MetricKey::Sleep),
            "energy" => Ok(MetricKey::Energy),
            "focus" => Ok(MetricKey::Focus),
            "anxiety" => Ok(MetricKey::Anxiety),
            _ => Err(format!("unknown metric key: {}", s)),
        }
    }
}

impl std::fmt::Display for MetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================
// Stored records
// ============================================

/// A user-submitted daily check-in.
///
/// One record nominally exists per user per calendar day. Duplicates for the
/// same date can arrive from concurrent writes and are tolerated: the streak
/// path de-duplicates by date, the trend path treats each row as one sample.
/// Records are immutable once written and never deleted by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckinRecord {
    /// Self-reported calendar day (no time component)
    pub date: NaiveDate,
    /// Metric scores in 0-10
    pub metrics: HashMap<MetricKey, f64>,
}

/// A day's plan tally, used only for completion-rate aggregation.
///
/// `completed_count <= total_count` is expected but not enforced here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlanRecord {
    /// Calendar day the plan belongs to
    pub date: NaiveDate,
    /// Actions completed
    pub completed_count: u32,
    /// Actions planned
    pub total_count: u32,
}

// ============================================
// Derived results
// ============================================

/// Direction of a metric series over the analyzed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Stable,
    Declining,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Stable => "stable",
            Trend::Declining => "declining",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classification of one metric's series over a window.
///
/// Recomputed on every query, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendResult {
    /// Arithmetic mean of all samples (0.0 when the series is empty)
    pub average: f64,
    /// Direction of the series, polarity-aware
    pub trend: Trend,
    /// The analyzed samples, chronological
    pub values: Vec<f64>,
}

/// Streak counters derived from a user's check-in date set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakResult {
    /// Consecutive days ending at (or the day before) the reference date
    pub current_streak: u32,
    /// Longest consecutive run anywhere in the history
    pub longest_streak: u32,
    /// Distinct check-in days in the history
    pub total_checkins: u32,
    /// Distinct check-in days in the trailing week, as a percentage of 7
    pub weekly_consistency_pct: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_key_roundtrip() {
        for key in MetricKey::ALL {
            let parsed: MetricKey = key.as_str().parse().unwrap();
            assert_eq!(parsed, key);
        }
        assert!("heartrate".parse::<MetricKey>().is_err());
    }

    #[test]
    fn test_metric_polarity() {
        assert!(MetricKey::Stress.is_inverted());
        assert!(MetricKey::Anxiety.is_inverted());
        assert!(!MetricKey::Mood.is_inverted());
        assert!(!MetricKey::Sleep.is_inverted());
        assert!(!MetricKey::Energy.is_inverted());
        assert!(!MetricKey::Focus.is_inverted());
    }

    #[test]
    fn test_trend_display() {
        assert_eq!(Trend::Improving.to_string(), "improving");
        assert_eq!(Trend::Stable.as_str(), "stable");
        assert_eq!(Trend::Declining.as_str(), "declining");
    }
}
