//! Migration framework
//!
//! - Embedded SQL migrations, applied in order
//! - Idempotent re-application
//! - Checksums recorded per migration and verified on every run

mod checksums;
mod embedded;
mod runner;

pub use runner::{applied_migrations, apply_migrations};
