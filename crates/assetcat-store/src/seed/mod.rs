//! Seed import support
//!
//! Provides:
//! - Seed format v0 schema
//! - YAML parser with validation and path resolution
//! - Digest canonicalization
//!
//! Applying a seed happens in the engine, through the same lifecycle
//! operations as any other write.

pub mod digest;
pub mod format_v0;
pub mod parser;

pub use digest::compute_seed_digest;
pub use format_v0::{
    SeedArea, SeedAsset, SeedCoordinate, SeedDevice, SeedEntry, SeedLink, SeedPlant, SeedSpace,
    SeedV0,
};
pub use parser::{parse_seed_file, parse_seed_str, path_key, PATH_SEPARATOR};
