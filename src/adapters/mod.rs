//! External system adapters
//!
//! Adapters connect the migration core to concrete source collections and
//! destination stores. The core only sees the traits defined in the
//! `source` and `destination` submodules.

pub mod destination;
pub mod source;
