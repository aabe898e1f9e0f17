//! assetcat core - domain model and rules of the asset catalog
//!
//! - Node and association kinds with their parent and endpoint metadata
//! - Name normalisation and validation
//! - Soft-delete guard table and lifecycle transitions
//! - The error facility (`ExError`) and structured logging macros
//!
//! Nothing here touches storage; the store and engine crates build on it.

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod rules;

pub use errors::{CatalogError, ExError, ExErrorKind, Result};
pub use model::{
    Association, AssociationKey, AssociationKind, AssociationView, ListFilter, Node, NodeDraft,
    NodeKind, NodeTree, NodeUpdate, NodeView, ParentLink, Side,
};
