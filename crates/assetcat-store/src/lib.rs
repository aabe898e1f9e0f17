//! assetcat store - SQLite persistence for the asset catalog
//!
//! Provides:
//! - Connection management and pragmas
//! - Embedded schema migrations with checksums
//! - Per-table-family repositories (`NodeRepo`, `AssociationRepo`)
//! - Seed format v0 parsing and digests

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;
pub mod seed;

pub use errors::Result;
pub use repo::{AssociationRepo, NodeRepo};
