//! Database repository layer
//!
//! Provides query and insert operations for check-in and plan records.
//! Collections are scoped per user; reads return bounded, chronologically
//! ordered windows so the analytics engine never touches the store directly.

use crate::error::{Error, Result};
use crate::types::{CheckinRecord, MetricKey, PlanRecord};
use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection, Row};
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::sync::Mutex;

/// Database handle with connection pooling (single connection for now)
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create a database at the given path
    pub fn open(path: &PathBuf) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // WAL mode for better concurrency between the CLI and future readers
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run migrations on this database
    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        super::schema::run_migrations(&conn)
    }

    // ============================================
    // Check-in operations
    // ============================================

    /// Insert a check-in record for a user.
    ///
    /// Metric values are clamped to the 0-10 score range before storage.
    pub fn insert_checkin(&self, user_id: &str, checkin: &CheckinRecord) -> Result<()> {
        let metrics: HashMap<&str, f64> = checkin
            .metrics
            .iter()
            .map(|(key, value)| (key.as_str(), value.clamp(0.0, 10.0)))
            .collect();

        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO checkins (user_id, date, metrics, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                user_id,
                checkin.date.to_string(),
                serde_json::to_string(&metrics)?,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Fetch all check-ins for a user within a date window, oldest first.
    ///
    /// Duplicate same-day records are returned as separate rows in insertion
    /// order; de-duplication is the caller's concern.
    pub fn get_checkins_between(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CheckinRecord>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT date, metrics FROM checkins
            WHERE user_id = ?1 AND date >= ?2 AND date <= ?3
            ORDER BY date ASC, id ASC
            "#,
        )?;

        let records = stmt
            .query_map(
                params![user_id, start.to_string(), end.to_string()],
                Self::row_to_checkin,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    /// Fetch the distinct dates of a user's most recent check-ins.
    ///
    /// `limit` caps how many most-recent dates are considered (the streak
    /// assembler passes 365 for up to one year of history).
    pub fn get_recent_checkin_dates(&self, user_id: &str, limit: u32) -> Result<BTreeSet<NaiveDate>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT DISTINCT date FROM checkins
            WHERE user_id = ?1
            ORDER BY date DESC
            LIMIT ?2
            "#,
        )?;

        let mut dates = BTreeSet::new();
        let rows = stmt.query_map(params![user_id, limit], |row| row.get::<_, String>(0))?;
        for row in rows {
            let raw = row?;
            let date = raw
                .parse::<NaiveDate>()
                .map_err(|_| Error::InvalidDate(raw))?;
            dates.insert(date);
        }
        Ok(dates)
    }

    /// Count all check-in rows for a user.
    pub fn count_checkins(&self, user_id: &str) -> Result<u32> {
        let conn = self.conn.lock().unwrap();
        let count: u32 = conn.query_row(
            "SELECT COUNT(*) FROM checkins WHERE user_id = ?1",
            [user_id],
            |r| r.get(0),
        )?;
        Ok(count)
    }

    fn row_to_checkin(row: &Row) -> rusqlite::Result<CheckinRecord> {
        let date_str: String = row.get("date")?;
        let metrics_str: String = row.get("metrics")?;

        // Stored dates and metric maps are produced by insert_checkin, but
        // stay defensive: unparseable dates fall back to epoch-ish defaults
        // and unknown metric keys or non-numeric values are filtered out.
        let raw: HashMap<String, serde_json::Value> =
            serde_json::from_str(&metrics_str).unwrap_or_default();
        let metrics: HashMap<MetricKey, f64> = raw
            .into_iter()
            .filter_map(|(key, value)| {
                let key = key.parse::<MetricKey>().ok()?;
                let value = value.as_f64()?;
                Some((key, value))
            })
            .collect();

        Ok(CheckinRecord {
            date: date_str
                .parse()
                .unwrap_or(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()),
            metrics,
        })
    }

    // ============================================
    // Plan operations
    // ============================================

    /// Insert a plan record for a user.
    pub fn insert_plan(&self, user_id: &str, plan: &PlanRecord) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO plans (user_id, date, completed_count, total_count, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                user_id,
                plan.date.to_string(),
                plan.completed_count,
                plan.total_count,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Fetch all plans for a user within a date window, oldest first.
    pub fn get_plans_between(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PlanRecord>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT date, completed_count, total_count FROM plans
            WHERE user_id = ?1 AND date >= ?2 AND date <= ?3
            ORDER BY date ASC, id ASC
            "#,
        )?;

        let records = stmt
            .query_map(
                params![user_id, start.to_string(), end.to_string()],
                |row| {
                    let date_str: String = row.get("date")?;
                    Ok(PlanRecord {
                        date: date_str
                            .parse()
                            .unwrap_or(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()),
                        completed_count: row.get("completed_count")?,
                        total_count: row.get("total_count")?,
                    })
                },
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }
}
