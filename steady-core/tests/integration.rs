//! Integration tests for the steady analytics pipeline
//!
//! These tests exercise the end-to-end flow: insert check-in and plan
//! records into a database, then assemble weekly summaries and streak info
//! through the public API.

use chrono::{Duration, NaiveDate};
use steady_core::analytics::{streak_info, weekly_summary};
use steady_core::db::Database;
use steady_core::types::{CheckinRecord, MetricKey, PlanRecord, Trend};
use tempfile::TempDir;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn open_db() -> Database {
    let db = Database::open_in_memory().unwrap();
    db.migrate().unwrap();
    db
}

fn insert_day(db: &Database, user: &str, day: NaiveDate, metrics: &[(MetricKey, f64)]) {
    db.insert_checkin(
        user,
        &CheckinRecord {
            date: day,
            metrics: metrics.iter().copied().collect(),
        },
    )
    .unwrap();
}

// ============================================
// Weekly summary flow
// ============================================

#[test]
fn test_two_week_summary_end_to_end() {
    let db = open_db();
    let reference = date("2024-06-14");

    // Two weeks of daily check-ins: mood climbs, stress falls, sleep steady.
    let moods = [3.0, 3.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 7.0, 8.0, 8.0, 8.0, 9.0, 9.0];
    let stresses = [8.0, 8.0, 8.0, 7.0, 7.0, 7.0, 7.0, 3.0, 3.0, 3.0, 3.0, 2.0, 2.0, 2.0];
    for (i, (&mood, &stress)) in moods.iter().zip(stresses.iter()).enumerate() {
        let day = reference - Duration::days((13 - i) as i64);
        insert_day(
            &db,
            "alice",
            day,
            &[
                (MetricKey::Mood, mood),
                (MetricKey::Stress, stress),
                (MetricKey::Sleep, 7.0),
            ],
        );
    }

    for i in 0..14 {
        db.insert_plan(
            "alice",
            &PlanRecord {
                date: reference - Duration::days(i),
                completed_count: 2,
                total_count: 3,
            },
        )
        .unwrap();
    }

    let summary = weekly_summary(&db, "alice", reference, 2).unwrap();

    assert_eq!(summary.period_end, reference);
    assert_eq!(summary.period_start, reference - Duration::days(14));
    assert_eq!(summary.checkin_count, 14);

    // Rising mood improves; falling stress also improves (inverted metric).
    assert_eq!(summary.trends[&MetricKey::Mood].trend, Trend::Improving);
    assert_eq!(summary.trends[&MetricKey::Stress].trend, Trend::Improving);
    assert_eq!(summary.trends[&MetricKey::Sleep].trend, Trend::Stable);

    // 14 * 2 completed of 14 * 3 planned = 67%.
    assert_eq!(summary.completion_rate, 67);

    // Mood and Stress improving: the combined improvement sentence fires.
    assert!(summary.insights[0].contains("Mood"));
    assert!(summary.insights[0].contains("Stress"));
}

#[test]
fn test_summary_for_fresh_user_is_baseline_only() {
    let db = open_db();
    let summary = weekly_summary(&db, "fresh", date("2024-06-14"), 2).unwrap();

    assert_eq!(summary.checkin_count, 0);
    assert!(summary.trends.is_empty());
    assert_eq!(summary.completion_rate, 0);
    assert_eq!(summary.insights.len(), 1);
    assert!(summary.insights[0].contains("steady baseline"));
}

#[test]
fn test_summary_accumulates_multiple_concerns() {
    let db = open_db();
    let reference = date("2024-06-14");

    // A rough week: low mood, high stress, poor sleep, all flat.
    for i in 0..7 {
        insert_day(
            &db,
            "alice",
            reference - Duration::days(i),
            &[
                (MetricKey::Mood, 3.0),
                (MetricKey::Stress, 8.0),
                (MetricKey::Sleep, 4.0),
            ],
        );
    }

    let summary = weekly_summary(&db, "alice", reference, 1).unwrap();
    assert_eq!(summary.insights.len(), 3);
}

#[test]
fn test_summary_json_export_shape() {
    let db = open_db();
    let reference = date("2024-06-14");
    insert_day(&db, "alice", reference, &[(MetricKey::Mood, 6.0)]);

    let summary = weekly_summary(&db, "alice", reference, 1).unwrap();
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["period_end"], "2024-06-14");
    assert_eq!(json["checkin_count"], 1);
    assert_eq!(json["trends"]["mood"]["trend"], "stable");
    assert!(json["insights"].as_array().unwrap().len() >= 1);
}

// ============================================
// Streak info flow
// ============================================

#[test]
fn test_streak_info_end_to_end() {
    let db = open_db();
    let reference = date("2024-06-14");

    // 5-day active run ending today, plus an older 8-day run.
    for i in 0..5 {
        insert_day(
            &db,
            "alice",
            reference - Duration::days(i),
            &[(MetricKey::Mood, 6.0)],
        );
    }
    for i in 0..8 {
        insert_day(
            &db,
            "alice",
            date("2024-05-01") + Duration::days(i),
            &[(MetricKey::Mood, 6.0)],
        );
    }

    let info = streak_info(&db, "alice", reference).unwrap();
    assert_eq!(info.streaks.current_streak, 5);
    assert_eq!(info.streaks.longest_streak, 8);
    assert_eq!(info.streaks.total_checkins, 13);
    assert_eq!(info.streaks.weekly_consistency_pct, 71); // round(5/7*100)
    assert_eq!(info.milestone, Some(3));
    assert_eq!(info.next_milestone, Some(7));
}

#[test]
fn test_streak_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("steady.db");
    let reference = date("2024-06-14");

    {
        let db = Database::open(&path).unwrap();
        db.migrate().unwrap();
        for i in 0..3 {
            insert_day(
                &db,
                "alice",
                reference - Duration::days(i),
                &[(MetricKey::Mood, 6.0)],
            );
        }
    }

    let db = Database::open(&path).unwrap();
    db.migrate().unwrap();
    let info = streak_info(&db, "alice", reference).unwrap();
    assert_eq!(info.streaks.current_streak, 3);
}

#[test]
fn test_assemblers_are_deterministic() {
    let db = open_db();
    let reference = date("2024-06-14");
    for i in 0..6 {
        insert_day(
            &db,
            "alice",
            reference - Duration::days(i),
            &[(MetricKey::Mood, 4.0 + i as f64)],
        );
    }

    let first = weekly_summary(&db, "alice", reference, 2).unwrap();
    let second = weekly_summary(&db, "alice", reference, 2).unwrap();
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}
