//! Core fixture models and operations.

pub mod fixture;
pub mod report;
pub mod repository;
pub mod variant;

pub use report::ReportRow;
pub use repository::{FixtureRepository, RemovalSummary, SeedSummary};
pub use variant::Variant;
