// Ferry - Media Library Migration Tool
// Copyright (c) 2025 Ferry Contributors
// Licensed under the MIT License

//! # Ferry - Media Library Migration
//!
//! Ferry is a migration tool built in Rust that moves photo and video libraries
//! between asset stores, skipping whatever the destination already holds.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Browsing** a source library as a cancellable stream of asset groups
//! - **Deduplicating** against an upfront index of the destination's contents
//! - **Writing** assets into a date-based destination layout
//! - **Accounting** for every asset as written, skipped, or failed
//!
//! ## Architecture
//!
//! Ferry follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (the migration orchestrator and its summary)
//! - [`adapters`] - Source and destination integrations (folder trees)
//! - [`domain`] - Core domain types and models
//! - [`journal`] - Per-run event counters
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ferry::adapters::destination::{AssetWriter, FolderWriter};
//! use ferry::adapters::source::{AssetSource, FolderSource};
//! use ferry::core::migrate::{MigrateOptions, Migrator};
//! use ferry::journal::Journal;
//! use std::sync::Arc;
//! use tokio::sync::watch;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let journal = Arc::new(Journal::new());
//!
//!     let source: Arc<dyn AssetSource> =
//!         Arc::new(FolderSource::new("/photos/takeout", Arc::clone(&journal)));
//!     let destination: Arc<dyn AssetWriter> = Arc::new(FolderWriter::new("/photos/library"));
//!
//!     // The sender side is usually wired to SIGINT; dropping it leaves the
//!     // migration running to completion.
//!     let (_stop, shutdown) = watch::channel(false);
//!
//!     let migrator = Migrator::new(source, destination, journal, MigrateOptions::default());
//!     let summary = migrator.run(shutdown).await?;
//!
//!     println!("Migrated {} assets", summary.written);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! ### Existence Index
//!
//! Destinations that can enumerate their contents let the migrator skip
//! already-present assets without attempting a write:
//!
//! ```rust,no_run
//! use ferry::adapters::destination::{AssetWriter, FolderWriter};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let writer = FolderWriter::new("/photos/library");
//!
//! if let Some(inventory) = writer.as_inventory() {
//!     let existing = inventory.scan_existing().await?;
//!     println!("{} assets already stored", existing.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Custom Extension Filters
//!
//! Discovery defaults to common photo and video extensions and can be
//! narrowed or widened per run:
//!
//! ```rust,no_run
//! use ferry::adapters::source::FolderSource;
//! use ferry::journal::Journal;
//! use std::sync::Arc;
//!
//! let journal = Arc::new(Journal::new());
//! let source = FolderSource::new("/photos/takeout", journal)
//!     .with_extensions(&["arw".to_string(), "nef".to_string()]);
//! ```
//!
//! ## Error Handling
//!
//! Ferry uses the [`domain::FerryError`] type for all errors, following Rust best practices:
//!
//! ```rust,no_run
//! use ferry::domain::Result;
//!
//! fn example() -> Result<()> {
//!     // Errors are automatically converted using the ? operator
//!     let config = ferry::config::load_config("ferry.toml")?;
//!     println!("Source: {}", config.source.path);
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Ferry uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!("Starting migration");
//! warn!(asset = "IMG_0001.jpg", "Asset skipped");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod journal;
pub mod logging;
