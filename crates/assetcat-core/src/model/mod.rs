pub mod association;
pub mod kind;
pub mod node;
pub mod view;

pub use association::{Association, AssociationKey, AssociationKind, Side};
pub use kind::{NodeKind, ParentLink};
pub use node::{Node, NodeDraft, NodeUpdate};
pub use view::{AssociationView, ListFilter, NodeTree, NodeView};
