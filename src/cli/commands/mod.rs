//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod init;
pub mod migrate;
pub mod status;
pub mod validate;
