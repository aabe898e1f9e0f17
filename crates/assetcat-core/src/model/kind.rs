use serde::{Deserialize, Serialize};

/// Every node kind in the catalog
///
/// The hierarchy is Plant → Area → Space → Coordinate → Asset, the device
/// taxonomy is Device → Model (→ Asset as its second parent), and the
/// remaining kinds are flat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Plant,
    Area,
    Space,
    Coordinate,
    Asset,
    Device,
    Model,
    Parameter,
    Category,
    Detail,
    Situation,
    Question,
    Communicate,
}

/// A required foreign-key edge from a node to one of its parents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentLink {
    pub kind: NodeKind,
    pub column: &'static str,
}

impl NodeKind {
    pub const ALL: [NodeKind; 13] = [
        NodeKind::Plant,
        NodeKind::Area,
        NodeKind::Space,
        NodeKind::Coordinate,
        NodeKind::Asset,
        NodeKind::Device,
        NodeKind::Model,
        NodeKind::Parameter,
        NodeKind::Category,
        NodeKind::Detail,
        NodeKind::Situation,
        NodeKind::Question,
        NodeKind::Communicate,
    ];

    /// Stable lowercase name, also the table name
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Plant => "plant",
            NodeKind::Area => "area",
            NodeKind::Space => "space",
            NodeKind::Coordinate => "coordinate",
            NodeKind::Asset => "asset",
            NodeKind::Device => "device",
            NodeKind::Model => "model",
            NodeKind::Parameter => "parameter",
            NodeKind::Category => "category",
            NodeKind::Detail => "detail",
            NodeKind::Situation => "situation",
            NodeKind::Question => "question",
            NodeKind::Communicate => "communicate",
        }
    }

    pub fn table(self) -> &'static str {
        self.as_str()
    }

    /// Primary key column (`plant_id`, `area_id`, ...)
    pub fn id_column(self) -> &'static str {
        match self {
            NodeKind::Plant => "plant_id",
            NodeKind::Area => "area_id",
            NodeKind::Space => "space_id",
            NodeKind::Coordinate => "coordinate_id",
            NodeKind::Asset => "asset_id",
            NodeKind::Device => "device_id",
            NodeKind::Model => "model_id",
            NodeKind::Parameter => "parameter_id",
            NodeKind::Category => "category_id",
            NodeKind::Detail => "detail_id",
            NodeKind::Situation => "situation_id",
            NodeKind::Question => "question_id",
            NodeKind::Communicate => "communicate_id",
        }
    }

    /// The parent whose children share a name scope
    ///
    /// `None` means names are unique across the whole table.
    pub fn scope_parent(self) -> Option<ParentLink> {
        let (kind, column) = match self {
            NodeKind::Area => (NodeKind::Plant, "plant_id"),
            NodeKind::Space => (NodeKind::Area, "area_id"),
            NodeKind::Coordinate => (NodeKind::Space, "space_id"),
            NodeKind::Asset => (NodeKind::Coordinate, "coordinate_id"),
            NodeKind::Model => (NodeKind::Device, "device_id"),
            _ => return None,
        };
        Some(ParentLink { kind, column })
    }

    /// The second, cross-hierarchy parent (only Asset → Model)
    pub fn model_parent(self) -> Option<ParentLink> {
        match self {
            NodeKind::Asset => Some(ParentLink {
                kind: NodeKind::Model,
                column: "model_id",
            }),
            _ => None,
        }
    }

    /// All required parents, scope parent first
    pub fn parent_links(self) -> Vec<ParentLink> {
        self.scope_parent()
            .into_iter()
            .chain(self.model_parent())
            .collect()
    }

    /// Child edges: `(child kind, FK column on the child)`
    pub fn child_links(self) -> Vec<(NodeKind, ParentLink)> {
        NodeKind::ALL
            .iter()
            .flat_map(|child| {
                child
                    .parent_links()
                    .into_iter()
                    .filter(move |link| link.kind == self)
                    .map(move |link| (*child, link))
            })
            .collect()
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s.trim().to_ascii_lowercase())
            .ok_or_else(|| format!("unknown node kind '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchy_scope_parents() {
        assert_eq!(NodeKind::Plant.scope_parent(), None);
        assert_eq!(
            NodeKind::Area.scope_parent().map(|p| p.kind),
            Some(NodeKind::Plant)
        );
        assert_eq!(
            NodeKind::Asset.scope_parent().map(|p| p.kind),
            Some(NodeKind::Coordinate)
        );
        assert_eq!(
            NodeKind::Model.scope_parent().map(|p| p.column),
            Some("device_id")
        );
    }

    #[test]
    fn test_asset_has_two_parents() {
        let parents: Vec<NodeKind> = NodeKind::Asset
            .parent_links()
            .iter()
            .map(|p| p.kind)
            .collect();
        assert_eq!(parents, vec![NodeKind::Coordinate, NodeKind::Model]);
    }

    #[test]
    fn test_child_links_inverse_of_parents() {
        let model_children: Vec<NodeKind> =
            NodeKind::Model.child_links().iter().map(|(k, _)| *k).collect();
        assert_eq!(model_children, vec![NodeKind::Asset]);

        assert!(NodeKind::Question.child_links().is_empty());
    }

    #[test]
    fn test_from_str_round_trip() {
        for kind in NodeKind::ALL {
            assert_eq!(kind.as_str().parse::<NodeKind>().unwrap(), kind);
        }
        assert!("Plant".parse::<NodeKind>().is_ok());
        assert!("warehouse".parse::<NodeKind>().is_err());
    }
}
