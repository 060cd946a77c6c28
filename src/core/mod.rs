//! Core business logic
//!
//! This module contains the migration orchestration logic.

pub mod migrate;
