//! Core types shared across assetcat crates
//!
//! - **Correlation types**: RequestId tagging one engine operation
//! - **Editor identity**: EditorId carried into every audit field
//! - **Schema constants**: Canonical field keys and event names for logging

pub mod correlation;
pub mod editor;
pub mod schema;

pub use correlation::RequestId;
pub use editor::EditorId;
