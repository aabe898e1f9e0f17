//! Asset model reassignment and the link removal it implies

#![allow(clippy::result_large_err)]

use assetcat_core::errors::CatalogError;
use assetcat_core::model::{AssociationKey, NodeKind, Side};
use assetcat_core::rules::cascade::MODEL_REASSIGN_INVALIDATES;
use assetcat_core_types::EditorId;
use assetcat_store::errors::Result;
use assetcat_store::{AssociationRepo, NodeRepo};
use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::commands::lifecycle::{require_active_reference, require_node};
use crate::commands::tx;

pub(crate) fn reassign_asset_model_in(
    conn: &Connection,
    asset_id: i64,
    model_id: i64,
    editor: &EditorId,
    now: DateTime<Utc>,
) -> Result<Vec<AssociationKey>> {
    let asset = require_node(conn, NodeKind::Asset, asset_id)?;
    if asset.deleted {
        return Err(CatalogError::EntityDeleted {
            entity: asset.label(),
        }
        .into());
    }
    require_active_reference(conn, NodeKind::Model, model_id)?;
    if asset.model_id == Some(model_id) {
        return Err(CatalogError::AlreadyAssigned { asset_id, model_id }.into());
    }

    let mut removed = Vec::new();
    for kind in MODEL_REASSIGN_INVALIDATES {
        let side = if kind.left() == NodeKind::Asset {
            Side::Left
        } else {
            Side::Right
        };
        removed.extend(AssociationRepo::delete_all_for(conn, kind, side, asset_id)?);
    }

    NodeRepo::set_model(conn, asset_id, model_id, editor.as_str(), now)?;
    tracing::debug!(
        node_id = asset_id,
        model_id,
        removed = removed.len(),
        "asset reassigned"
    );
    Ok(removed)
}

/// Point an asset at another model, removing its model-dependent links
///
/// Every AssetCategory, AssetDetail, AssetSituation and CommunicateAsset
/// row of the asset is removed, soft-deleted or not. Returns the removed
/// keys. All of it happens in one transaction.
///
/// # Errors
/// * `NotFound` - no such asset, or the model is absent or soft-deleted
/// * `Conflict` - the asset is soft-deleted or already on that model
pub fn reassign_asset_model(
    conn: &mut Connection,
    asset_id: i64,
    model_id: i64,
    editor: &EditorId,
) -> Result<Vec<AssociationKey>> {
    tx::write(conn, "asset_reassign_model", |tx| {
        reassign_asset_model_in(tx, asset_id, model_id, editor, Utc::now())
    })
}
