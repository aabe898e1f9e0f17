use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::kind::NodeKind;

/// Every many-to-many association kind
///
/// An association row is keyed by `(left_id, right_id)` and is itself a
/// soft-deletable entity with its own audit fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationKind {
    AssetCategory,
    AssetDetail,
    AssetSituation,
    ModelParameter,
    CategorySituation,
    DeviceSituation,
    SituationDetail,
    SituationParameter,
    SituationQuestion,
    CommunicateArea,
    CommunicateAsset,
    CommunicateCategory,
    CommunicateCoordinate,
    CommunicateDevice,
    CommunicateModel,
    CommunicateSpace,
}

/// Which endpoint of an association a node sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl AssociationKind {
    pub const ALL: [AssociationKind; 16] = [
        AssociationKind::AssetCategory,
        AssociationKind::AssetDetail,
        AssociationKind::AssetSituation,
        AssociationKind::ModelParameter,
        AssociationKind::CategorySituation,
        AssociationKind::DeviceSituation,
        AssociationKind::SituationDetail,
        AssociationKind::SituationParameter,
        AssociationKind::SituationQuestion,
        AssociationKind::CommunicateArea,
        AssociationKind::CommunicateAsset,
        AssociationKind::CommunicateCategory,
        AssociationKind::CommunicateCoordinate,
        AssociationKind::CommunicateDevice,
        AssociationKind::CommunicateModel,
        AssociationKind::CommunicateSpace,
    ];

    /// `(left, right)` endpoint kinds
    pub fn endpoints(self) -> (NodeKind, NodeKind) {
        use NodeKind::*;
        match self {
            AssociationKind::AssetCategory => (Asset, Category),
            AssociationKind::AssetDetail => (Asset, Detail),
            AssociationKind::AssetSituation => (Asset, Situation),
            AssociationKind::ModelParameter => (Model, Parameter),
            AssociationKind::CategorySituation => (Category, Situation),
            AssociationKind::DeviceSituation => (Device, Situation),
            AssociationKind::SituationDetail => (Situation, Detail),
            AssociationKind::SituationParameter => (Situation, Parameter),
            AssociationKind::SituationQuestion => (Situation, Question),
            AssociationKind::CommunicateArea => (Communicate, Area),
            AssociationKind::CommunicateAsset => (Communicate, Asset),
            AssociationKind::CommunicateCategory => (Communicate, Category),
            AssociationKind::CommunicateCoordinate => (Communicate, Coordinate),
            AssociationKind::CommunicateDevice => (Communicate, Device),
            AssociationKind::CommunicateModel => (Communicate, Model),
            AssociationKind::CommunicateSpace => (Communicate, Space),
        }
    }

    pub fn left(self) -> NodeKind {
        self.endpoints().0
    }

    pub fn right(self) -> NodeKind {
        self.endpoints().1
    }

    pub fn endpoint(self, side: Side) -> NodeKind {
        match side {
            Side::Left => self.left(),
            Side::Right => self.right(),
        }
    }

    /// FK column for the given side; mirrors the endpoint's primary key name
    pub fn column(self, side: Side) -> &'static str {
        self.endpoint(side).id_column()
    }

    /// Whether rows of this kind carry a free-text `value`
    pub fn carries_value(self) -> bool {
        matches!(
            self,
            AssociationKind::AssetDetail | AssociationKind::ModelParameter
        )
    }

    /// Stable lowercase name, also the table name
    pub fn as_str(self) -> &'static str {
        match self {
            AssociationKind::AssetCategory => "asset_category",
            AssociationKind::AssetDetail => "asset_detail",
            AssociationKind::AssetSituation => "asset_situation",
            AssociationKind::ModelParameter => "model_parameter",
            AssociationKind::CategorySituation => "category_situation",
            AssociationKind::DeviceSituation => "device_situation",
            AssociationKind::SituationDetail => "situation_detail",
            AssociationKind::SituationParameter => "situation_parameter",
            AssociationKind::SituationQuestion => "situation_question",
            AssociationKind::CommunicateArea => "communicate_area",
            AssociationKind::CommunicateAsset => "communicate_asset",
            AssociationKind::CommunicateCategory => "communicate_category",
            AssociationKind::CommunicateCoordinate => "communicate_coordinate",
            AssociationKind::CommunicateDevice => "communicate_device",
            AssociationKind::CommunicateModel => "communicate_model",
            AssociationKind::CommunicateSpace => "communicate_space",
        }
    }

    pub fn table(self) -> &'static str {
        self.as_str()
    }

    /// Association kinds touching `node`, with the side it occupies
    pub fn touching(node: NodeKind) -> Vec<(AssociationKind, Side)> {
        let mut out = Vec::new();
        for kind in AssociationKind::ALL {
            if kind.left() == node {
                out.push((kind, Side::Left));
            }
            if kind.right() == node {
                out.push((kind, Side::Right));
            }
        }
        out
    }
}

impl std::fmt::Display for AssociationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AssociationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        AssociationKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| format!("unknown association kind '{}'", s))
    }
}

/// Composite key of one association row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssociationKey {
    pub kind: AssociationKind,
    pub left_id: i64,
    pub right_id: i64,
}

impl AssociationKey {
    pub fn new(kind: AssociationKind, left_id: i64, right_id: i64) -> Self {
        Self {
            kind,
            left_id,
            right_id,
        }
    }
}

impl std::fmt::Display for AssociationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.kind, self.left_id, self.right_id)
    }
}

/// One persisted association row
#[derive(Debug, Clone, PartialEq)]
pub struct Association {
    pub key: AssociationKey,

    /// Free-text value (only for kinds where `carries_value()` holds)
    pub value: Option<String>,

    /// Tombstone flag
    pub deleted: bool,

    /// Id of the user who last touched the row
    pub editor_id: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
