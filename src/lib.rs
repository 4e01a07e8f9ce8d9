//! # dbseed - SQLite fixture loader
//!
//! Initializes a local SQLite database file with a fixed schema and a small
//! hardcoded dataset, then runs one join query to verify what was written.
//! Two schema variants exist: surrogate user ids, or a composite natural key
//! with an order history table.

pub mod cli;
pub mod core;
pub mod db;
pub mod error;

// Re-export commonly used types
pub use crate::core::{FixtureRepository, ReportRow, Variant};
pub use crate::error::{Error, Result};

pub use crate::db::Connection;
