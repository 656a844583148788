//! # steady-core
//!
//! Core library for steady - a daily wellness check-in tracker.
//!
//! This library provides:
//! - Domain types for check-ins, plans, and derived analytics
//! - Database storage layer with SQLite
//! - The analytics engine: streaks, trends, insights, summaries
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! Data flows through two layers:
//! - **Stored:** Immutable per-user check-in and plan documents in SQLite
//! - **Derived:** Streaks, trends, and insights, recomputed on every query
//!   from a bounded window of stored records (never persisted)
//!
//! The computation units in [`analytics`] are pure functions: the reference
//! "today" is always caller-supplied, so identical inputs yield identical
//! outputs with no hidden clock reads.
//!
//! ## Example
//!
//! ```rust,no_run
//! use steady_core::{analytics, Config, Database};
//!
//! let db = Database::open(&Config::database_path()).expect("failed to open database");
//! db.migrate().expect("failed to run migrations");
//!
//! let today = chrono::Local::now().date_naive();
//! let info = analytics::streak_info(&db, "default", today).expect("streak info");
//! println!("current streak: {} days", info.streaks.current_streak);
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use db::Database;
pub use error::{Error, Result};
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod types;
