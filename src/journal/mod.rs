//! Migration event journal
//!
//! Structured tallies of per-asset outcomes, shared between the source
//! producer and the orchestrator.

pub mod recorder;

pub use recorder::{EventKind, Journal};
