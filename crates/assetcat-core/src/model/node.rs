use chrono::{DateTime, Utc};

use super::kind::NodeKind;

/// A node in the location hierarchy or one of the taxonomies
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,

    /// Store-assigned identity
    pub id: i64,

    pub name: String,

    pub description: String,

    /// Scope parent (plant for an area, device for a model, ...)
    pub parent_id: Option<i64>,

    /// Second parent; only set for assets
    pub model_id: Option<i64>,

    /// Tombstone flag - if true, this node is soft-deleted
    pub deleted: bool,

    /// Id of the user who last touched the row
    pub editor_id: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Node {
    /// Id of the parent reached through the given FK column
    pub fn parent_by_column(&self, column: &str) -> Option<i64> {
        match (self.kind.scope_parent(), self.kind.model_parent()) {
            (Some(link), _) if link.column == column => self.parent_id,
            (_, Some(link)) if link.column == column => self.model_id,
            _ => None,
        }
    }

    /// Short label for messages, e.g. `plant 3`
    pub fn label(&self) -> String {
        format!("{} {}", self.kind, self.id)
    }
}

/// Fields supplied when creating a node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeDraft {
    pub name: String,
    pub description: String,

    /// Required for every kind with a scope parent
    pub parent_id: Option<i64>,

    /// Required for assets
    pub model_id: Option<i64>,
}

impl NodeDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn under(mut self, parent_id: i64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_model(mut self, model_id: i64) -> Self {
        self.model_id = Some(model_id);
        self
    }
}

/// Field edits applied by an update; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl NodeUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset() -> Node {
        let now = Utc::now();
        Node {
            kind: NodeKind::Asset,
            id: 9,
            name: "Pump".to_string(),
            description: String::new(),
            parent_id: Some(3),
            model_id: Some(4),
            deleted: false,
            editor_id: "u1".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_parent_by_column() {
        let node = asset();
        assert_eq!(node.parent_by_column("coordinate_id"), Some(3));
        assert_eq!(node.parent_by_column("model_id"), Some(4));
        assert_eq!(node.parent_by_column("plant_id"), None);
        assert_eq!(node.label(), "asset 9");
    }

    #[test]
    fn test_draft_builder() {
        let draft = NodeDraft::named("Pump").under(3).with_model(4);
        assert_eq!(draft.parent_id, Some(3));
        assert_eq!(draft.model_id, Some(4));
        assert!(draft.description.is_empty());
    }
}
