//! Repository layer: one repository per table family
//!
//! Table and column names come from the `NodeKind` / `AssociationKind`
//! metadata, which are `&'static str` constants, so formatting them into
//! SQL never interpolates caller input.

pub mod association_repo;
pub mod hydration;
pub mod node_repo;
pub mod seed_repo;

pub use association_repo::AssociationRepo;
pub use node_repo::NodeRepo;
pub use seed_repo::{SeedImportRecord, SeedRepo};

use chrono::{DateTime, TimeZone, Utc};

/// Decode a millisecond timestamp column
pub(crate) fn millis(column: usize, ms: i64) -> rusqlite::Result<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(column, ms))
}
