//! Read-side projections returned to callers
//!
//! Views are plain serialisable records built by hand from store rows.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::association::{Association, AssociationKind};
use super::kind::NodeKind;
use super::node::Node;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeView {
    pub kind: NodeKind,
    pub id: i64,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<i64>,
    pub is_deleted: bool,
    pub editor_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Node> for NodeView {
    fn from(node: Node) -> Self {
        Self {
            kind: node.kind,
            id: node.id,
            name: node.name,
            description: node.description,
            parent_id: node.parent_id,
            model_id: node.model_id,
            is_deleted: node.deleted,
            editor_id: node.editor_id,
            created_at: node.created_at,
            updated_at: node.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssociationView {
    pub kind: AssociationKind,
    pub left_id: i64,
    pub right_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub is_deleted: bool,
    pub editor_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Association> for AssociationView {
    fn from(row: Association) -> Self {
        Self {
            kind: row.key.kind,
            left_id: row.key.left_id,
            right_id: row.key.right_id,
            value: row.value,
            is_deleted: row.deleted,
            editor_id: row.editor_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A node with its child nodes (recursively) and the links touching it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeTree {
    #[serde(flatten)]
    pub node: NodeView,
    pub children: Vec<NodeTree>,
    pub links: Vec<AssociationView>,
}

impl NodeTree {
    /// Total number of nodes in this subtree, including the root
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(NodeTree::size).sum::<usize>()
    }
}

/// Row selection for list queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Include soft-deleted rows (trash view)
    pub include_deleted: bool,
}

impl ListFilter {
    pub fn active() -> Self {
        Self {
            include_deleted: false,
        }
    }

    pub fn all() -> Self {
        Self {
            include_deleted: true,
        }
    }
}
