use crate::model::AssociationKind;

/// Asset links that lose their meaning when the asset changes model
///
/// Each of these has the asset on one side; the engine removes every
/// such row, whatever its delete state, before re-pointing the asset.
pub const MODEL_REASSIGN_INVALIDATES: [AssociationKind; 4] = [
    AssociationKind::AssetCategory,
    AssociationKind::AssetDetail,
    AssociationKind::AssetSituation,
    AssociationKind::CommunicateAsset,
];
