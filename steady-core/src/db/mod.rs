//! SQLite storage layer for check-in and plan records.

pub mod repo;
pub mod schema;

pub use repo::Database;
pub use schema::SCHEMA_VERSION;
