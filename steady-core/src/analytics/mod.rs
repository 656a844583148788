//! Analytics engine for steady.
//!
//! Converts a user's raw history of daily check-ins into:
//! - consecutive-day streak counters ([`streak`])
//! - per-metric trend classifications over a rolling window ([`trend`])
//! - plan-completion rates ([`plan`])
//! - short natural-language insights ([`insight`])
//!
//! The four computation units are pure functions over in-memory data: no
//! internal state, no I/O, no clock reads. The [`summary`] assemblers fetch
//! record windows from the store and compose the units into user-facing
//! results.

pub mod insight;
pub mod plan;
pub mod streak;
pub mod summary;
pub mod trend;

pub use plan::completion_rate;
pub use streak::{current_milestone, next_milestone, MILESTONES};
pub use summary::{streak_info, weekly_summary, StreakInfo, WeeklySummary};
pub use trend::{MIN_TREND_SAMPLES, TREND_DEAD_ZONE};
