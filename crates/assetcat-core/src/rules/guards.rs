//! Soft-delete guard table
//!
//! A node may only be soft-deleted when none of its blockers has an
//! active row referencing it. Blockers are listed per kind here and
//! evaluated uniformly by the engine.

use crate::model::AssociationKind as A;
use crate::model::NodeKind as N;
use crate::model::Side::{Left, Right};
use crate::model::{AssociationKind, NodeKind, Side};

/// A relation whose active rows prevent a node from being soft-deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blocker {
    /// Active child nodes of `kind` whose `column` points at the node
    Child {
        kind: NodeKind,
        column: &'static str,
    },
    /// Active association rows with the node on `side`
    Link { kind: AssociationKind, side: Side },
}

impl Blocker {
    /// Relation name used in conflict messages
    pub fn label(&self) -> &'static str {
        match self {
            Blocker::Child { kind, .. } => kind.as_str(),
            Blocker::Link { kind, .. } => kind.as_str(),
        }
    }
}

const fn child(kind: NodeKind, column: &'static str) -> Blocker {
    Blocker::Child { kind, column }
}

const fn link(kind: AssociationKind, side: Side) -> Blocker {
    Blocker::Link { kind, side }
}

const PLANT: &[Blocker] = &[child(N::Area, "plant_id")];

const AREA: &[Blocker] = &[
    child(N::Space, "area_id"),
    link(A::CommunicateArea, Right),
];

const SPACE: &[Blocker] = &[
    child(N::Coordinate, "space_id"),
    link(A::CommunicateSpace, Right),
];

const COORDINATE: &[Blocker] = &[
    child(N::Asset, "coordinate_id"),
    link(A::CommunicateCoordinate, Right),
];

const ASSET: &[Blocker] = &[
    link(A::AssetCategory, Left),
    link(A::AssetDetail, Left),
    link(A::AssetSituation, Left),
    link(A::CommunicateAsset, Right),
];

const DEVICE: &[Blocker] = &[
    child(N::Model, "device_id"),
    link(A::DeviceSituation, Left),
    link(A::CommunicateDevice, Right),
];

const MODEL: &[Blocker] = &[
    child(N::Asset, "model_id"),
    link(A::ModelParameter, Left),
    link(A::CommunicateModel, Right),
];

const PARAMETER: &[Blocker] = &[
    link(A::ModelParameter, Right),
    link(A::SituationParameter, Right),
];

const CATEGORY: &[Blocker] = &[
    link(A::AssetCategory, Right),
    link(A::CategorySituation, Left),
    link(A::CommunicateCategory, Right),
];

const DETAIL: &[Blocker] = &[
    link(A::AssetDetail, Right),
    link(A::SituationDetail, Right),
];

const SITUATION: &[Blocker] = &[
    link(A::AssetSituation, Right),
    link(A::CategorySituation, Right),
    link(A::DeviceSituation, Right),
    link(A::SituationDetail, Left),
    link(A::SituationParameter, Left),
    link(A::SituationQuestion, Left),
];

const QUESTION: &[Blocker] = &[link(A::SituationQuestion, Right)];

const COMMUNICATE: &[Blocker] = &[
    link(A::CommunicateArea, Left),
    link(A::CommunicateAsset, Left),
    link(A::CommunicateCategory, Left),
    link(A::CommunicateCoordinate, Left),
    link(A::CommunicateDevice, Left),
    link(A::CommunicateModel, Left),
    link(A::CommunicateSpace, Left),
];

/// Blockers that gate soft-deleting a node of `kind`
pub fn blockers(kind: NodeKind) -> &'static [Blocker] {
    match kind {
        N::Plant => PLANT,
        N::Area => AREA,
        N::Space => SPACE,
        N::Coordinate => COORDINATE,
        N::Asset => ASSET,
        N::Device => DEVICE,
        N::Model => MODEL,
        N::Parameter => PARAMETER,
        N::Category => CATEGORY,
        N::Detail => DETAIL,
        N::Situation => SITUATION,
        N::Question => QUESTION,
        N::Communicate => COMMUNICATE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_every_child_edge() {
        for kind in NodeKind::ALL {
            for (child_kind, parent_link) in kind.child_links() {
                let expected = child(child_kind, parent_link.column);
                assert!(
                    blockers(kind).contains(&expected),
                    "{} is missing child blocker {:?}",
                    kind,
                    expected
                );
            }
        }
    }

    #[test]
    fn test_table_covers_every_association_endpoint() {
        for kind in NodeKind::ALL {
            for (assoc, side) in AssociationKind::touching(kind) {
                assert!(
                    blockers(kind).contains(&link(assoc, side)),
                    "{} is missing link blocker {} ({:?})",
                    kind,
                    assoc,
                    side
                );
            }
        }
    }

    #[test]
    fn test_table_has_no_stray_entries() {
        for kind in NodeKind::ALL {
            for blocker in blockers(kind) {
                match *blocker {
                    Blocker::Child { kind: c, column } => {
                        assert!(c
                            .parent_links()
                            .iter()
                            .any(|p| p.kind == kind && p.column == column));
                    }
                    Blocker::Link { kind: a, side } => {
                        assert_eq!(a.endpoint(side), kind);
                    }
                }
            }
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(blockers(NodeKind::Plant)[0].label(), "area");
        assert_eq!(blockers(NodeKind::Question)[0].label(), "situation_question");
    }
}
