//! assetcat engine - lifecycle and referential-consistency orchestration
//!
//! Coordinates the rules in `assetcat-core` with the SQLite store in
//! `assetcat-store`, one transaction per operation. [`Catalog`] is the
//! entry point.

pub mod catalog;
pub mod commands;

pub use catalog::Catalog;
pub use commands::association::LinkOutcome;
pub use commands::engine_command::{apply_engine_command, EngineCommand, EngineCommandResult};
pub use commands::seed_import::SeedImportSummary;
