//! Natural-language insight composition.
//!
//! A rule-based classifier with accumulation semantics: every rule in
//! [`RULES`] is evaluated, all matching rules emit their sentence, and only
//! the absence of *every* signal falls back to the default message. Rule
//! order controls presentation order, not suppression, so new rules can be
//! appended without disturbing existing ones.

use crate::types::{MetricKey, Trend, TrendResult};
use std::collections::HashMap;

/// One insight rule: an independent predicate and its sentence builder.
struct InsightRule {
    applies: fn(&HashMap<MetricKey, TrendResult>) -> bool,
    message: fn(&HashMap<MetricKey, TrendResult>) -> String,
}

const RULES: &[InsightRule] = &[
    InsightRule {
        applies: |trends| !improving_metrics(trends).is_empty(),
        message: |trends| {
            format!(
                "{} trending in a positive direction - keep doing what you're doing.",
                improving_metrics(trends).join(", ")
            )
        },
    },
    InsightRule {
        applies: |trends| average_below(trends, MetricKey::Mood, 4.0),
        message: |_| {
            "Your mood has been on the lower side lately. Be gentle with yourself, \
             and consider reaching out to someone you trust."
                .to_string()
        },
    },
    InsightRule {
        applies: |trends| average_above(trends, MetricKey::Stress, 7.0),
        message: |_| {
            "Stress has been running high this week. A short daily wind-down \
             routine can help take the edge off."
                .to_string()
        },
    },
    InsightRule {
        applies: |trends| average_below(trends, MetricKey::Sleep, 5.0),
        message: |_| {
            "Sleep quality looks low. Protecting a consistent bedtime is one of \
             the highest-leverage changes you can make."
                .to_string()
        },
    },
];

/// Sentence emitted when no rule fires.
const BASELINE_INSIGHT: &str =
    "You're holding a steady baseline this week. Consistency itself is progress.";

/// Compose insights from per-metric trend results.
///
/// Always returns at least one sentence.
pub fn compose(trends: &HashMap<MetricKey, TrendResult>) -> Vec<String> {
    let mut insights: Vec<String> = RULES
        .iter()
        .filter(|rule| (rule.applies)(trends))
        .map(|rule| (rule.message)(trends))
        .collect();

    if insights.is_empty() {
        insights.push(BASELINE_INSIGHT.to_string());
    }
    insights
}

/// Display names of all improving metrics, in presentation order.
fn improving_metrics(trends: &HashMap<MetricKey, TrendResult>) -> Vec<&'static str> {
    MetricKey::ALL
        .iter()
        .filter(|key| {
            trends
                .get(key)
                .is_some_and(|t| t.trend == Trend::Improving)
        })
        .map(|key| key.display_name())
        .collect()
}

fn average_below(trends: &HashMap<MetricKey, TrendResult>, key: MetricKey, bound: f64) -> bool {
    trends.get(&key).is_some_and(|t| t.average < bound)
}

fn average_above(trends: &HashMap<MetricKey, TrendResult>, key: MetricKey, bound: f64) -> bool {
    trends.get(&key).is_some_and(|t| t.average > bound)
}
