//! Command-enum surface over every mutating catalog operation

#![allow(clippy::result_large_err)]

use assetcat_core::model::{AssociationKey, NodeDraft, NodeKind, NodeUpdate};
use assetcat_core_types::EditorId;
use assetcat_store::errors::Result;
use assetcat_store::seed::SeedV0;
use rusqlite::Connection;
use serde::Serialize;

use crate::commands::association::{self, LinkOutcome};
use crate::commands::cascade;
use crate::commands::lifecycle;
use crate::commands::seed_import::{self, SeedImportSummary};

/// A mutating catalog command
#[derive(Debug, Clone)]
pub enum EngineCommand {
    CreateNode {
        kind: NodeKind,
        draft: NodeDraft,
    },
    UpdateNode {
        kind: NodeKind,
        id: i64,
        update: NodeUpdate,
    },
    MarkDeleteNode {
        kind: NodeKind,
        id: i64,
    },
    MarkUndeleteNode {
        kind: NodeKind,
        id: i64,
    },
    PurgeNode {
        kind: NodeKind,
        id: i64,
    },
    ReassignAssetModel {
        asset_id: i64,
        model_id: i64,
    },
    AddOrReactivateLink {
        key: AssociationKey,
        value: Option<String>,
    },
    UpdateLink {
        key: AssociationKey,
        value: Option<String>,
    },
    MarkDeleteLink {
        key: AssociationKey,
    },
    PurgeLink {
        key: AssociationKey,
    },
    ImportSeed {
        seed: Box<SeedV0>,
        source: Option<String>,
    },
}

/// Result of applying an engine command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum EngineCommandResult {
    NodeCreated { kind: NodeKind, id: i64 },
    NodeUpdated { kind: NodeKind, id: i64 },
    NodeDeleted { kind: NodeKind, id: i64 },
    NodeRestored { kind: NodeKind, id: i64 },
    NodePurged { kind: NodeKind, id: i64 },
    AssetReassigned {
        asset_id: i64,
        model_id: i64,
        removed_links: Vec<AssociationKey>,
    },
    LinkWritten {
        key: AssociationKey,
        outcome: LinkOutcome,
    },
    LinkUpdated { key: AssociationKey },
    LinkDeleted { key: AssociationKey },
    LinkPurged { key: AssociationKey },
    SeedImported(SeedImportSummary),
}

/// Apply a command in its own transaction on behalf of `editor`
///
/// # Errors
/// Whatever the underlying operation returns; see the functions in
/// [`crate::commands`].
pub fn apply_engine_command(
    cmd: EngineCommand,
    conn: &mut Connection,
    editor: &EditorId,
) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::CreateNode { kind, draft } => {
            let id = lifecycle::create_node(conn, kind, &draft, editor)?;
            Ok(EngineCommandResult::NodeCreated { kind, id })
        }
        EngineCommand::UpdateNode { kind, id, update } => {
            lifecycle::update_node(conn, kind, id, &update, editor)?;
            Ok(EngineCommandResult::NodeUpdated { kind, id })
        }
        EngineCommand::MarkDeleteNode { kind, id } => {
            lifecycle::mark_delete_node(conn, kind, id, editor)?;
            Ok(EngineCommandResult::NodeDeleted { kind, id })
        }
        EngineCommand::MarkUndeleteNode { kind, id } => {
            lifecycle::mark_undelete_node(conn, kind, id, editor)?;
            Ok(EngineCommandResult::NodeRestored { kind, id })
        }
        EngineCommand::PurgeNode { kind, id } => {
            lifecycle::purge_node(conn, kind, id)?;
            Ok(EngineCommandResult::NodePurged { kind, id })
        }
        EngineCommand::ReassignAssetModel { asset_id, model_id } => {
            let removed_links = cascade::reassign_asset_model(conn, asset_id, model_id, editor)?;
            Ok(EngineCommandResult::AssetReassigned {
                asset_id,
                model_id,
                removed_links,
            })
        }
        EngineCommand::AddOrReactivateLink { key, value } => {
            let outcome = association::add_or_reactivate(conn, key, value.as_deref(), editor)?;
            Ok(EngineCommandResult::LinkWritten { key, outcome })
        }
        EngineCommand::UpdateLink { key, value } => {
            association::update_association(conn, key, value.as_deref(), editor)?;
            Ok(EngineCommandResult::LinkUpdated { key })
        }
        EngineCommand::MarkDeleteLink { key } => {
            association::mark_delete_association(conn, key, editor)?;
            Ok(EngineCommandResult::LinkDeleted { key })
        }
        EngineCommand::PurgeLink { key } => {
            association::purge_association(conn, key)?;
            Ok(EngineCommandResult::LinkPurged { key })
        }
        EngineCommand::ImportSeed { seed, source } => {
            let summary = seed_import::import_seed(conn, &seed, source.as_deref(), editor)?;
            Ok(EngineCommandResult::SeedImported(summary))
        }
    }
}
