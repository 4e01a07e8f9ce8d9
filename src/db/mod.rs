//! Database layer for dbseed.
//!
//! Handles SQLite database connection, schema creation, and low-level queries.

mod connection;
pub mod schema;

pub use connection::{Connection, DbPath};
pub use schema::{HistoryRow, OrderRow, Schema, UserRow};
