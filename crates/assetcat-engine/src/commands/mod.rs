//! Command orchestration layer
//!
//! Each public function runs one catalog operation in its own transaction
//! (see [`tx`]) and coordinates the core rules with the store.

pub mod association;
pub mod cascade;
pub mod engine_command;
pub mod lifecycle;
pub mod queries;
pub mod seed_import;
pub(crate) mod tx;
pub mod uniqueness;

pub use tx::STORE_FAILURE_MESSAGE;
