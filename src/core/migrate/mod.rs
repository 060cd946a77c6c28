//! Migration pipeline core
//!
//! The orchestrator and the summary it produces.

pub mod orchestrator;
pub mod summary;

pub use orchestrator::{MigrateOptions, Migrator};
pub use summary::MigrationSummary;
