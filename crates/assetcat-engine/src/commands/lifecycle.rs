//! Node lifecycle: create, update, mark-delete, mark-undelete, purge
//!
//! The `*_in` functions run inside a caller's transaction and are shared
//! with the seed importer; the public functions wrap each in its own
//! transaction.

#![allow(clippy::result_large_err)]

use assetcat_core::errors::CatalogError;
use assetcat_core::model::{Node, NodeDraft, NodeKind, NodeUpdate};
use assetcat_core::rules::guards::{blockers, Blocker};
use assetcat_core::rules::lifecycle::{transition, LifecycleState, Transition};
use assetcat_core::rules::naming::{normalize_name, validate_name};
use assetcat_core_types::EditorId;
use assetcat_store::errors::Result;
use assetcat_store::{AssociationRepo, NodeRepo};
use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::commands::tx;
use crate::commands::uniqueness::ensure_name_free;

/// Load a node or fail with `NodeNotFound`
pub(crate) fn require_node(conn: &Connection, kind: NodeKind, id: i64) -> Result<Node> {
    NodeRepo::get(conn, kind, id)?.ok_or_else(|| CatalogError::NodeNotFound { kind, id }.into())
}

/// Load a referenced node that must be active, or fail with `ReferenceNotFound`
pub(crate) fn require_active_reference(conn: &Connection, kind: NodeKind, id: i64) -> Result<Node> {
    match NodeRepo::get(conn, kind, id)? {
        Some(node) if !node.deleted => Ok(node),
        _ => Err(CatalogError::ReferenceNotFound { kind, id }.into()),
    }
}

/// Check the draft's parent ids against the kind's parent links
fn check_parents(conn: &Connection, kind: NodeKind, draft: &NodeDraft) -> Result<()> {
    let slots = [
        (kind.scope_parent(), draft.parent_id, "parent"),
        (kind.model_parent(), draft.model_id, "model"),
    ];
    for (link, supplied, label) in slots {
        match (link, supplied) {
            (Some(link), Some(id)) => {
                require_active_reference(conn, link.kind, id)?;
            }
            (Some(link), None) => {
                return Err(CatalogError::MissingParent {
                    kind,
                    parent: link.kind,
                }
                .into())
            }
            (None, Some(_)) => {
                return Err(CatalogError::UnexpectedParent {
                    kind,
                    parent: label,
                }
                .into())
            }
            (None, None) => {}
        }
    }
    Ok(())
}

pub(crate) fn create_node_in(
    conn: &Connection,
    kind: NodeKind,
    draft: &NodeDraft,
    editor: &EditorId,
    now: DateTime<Utc>,
) -> Result<i64> {
    validate_name(kind, &draft.name)?;
    check_parents(conn, kind, draft)?;
    ensure_name_free(conn, kind, draft.parent_id, &draft.name, None)?;

    let id = NodeRepo::insert(conn, kind, draft, editor.as_str(), now)?;
    tracing::debug!(node_kind = kind.as_str(), node_id = id, "node created");
    Ok(id)
}

pub(crate) fn update_node_in(
    conn: &Connection,
    kind: NodeKind,
    id: i64,
    update: &NodeUpdate,
    editor: &EditorId,
    now: DateTime<Utc>,
) -> Result<()> {
    let node = require_node(conn, kind, id)?;
    if node.deleted {
        return Err(CatalogError::EntityDeleted {
            entity: node.label(),
        }
        .into());
    }
    if update.is_empty() {
        return Ok(());
    }

    let name = match &update.name {
        Some(name) => {
            validate_name(kind, name)?;
            if normalize_name(name) != normalize_name(&node.name) {
                ensure_name_free(conn, kind, node.parent_id, name, Some(id))?;
            }
            name.as_str()
        }
        None => node.name.as_str(),
    };
    let description = update.description.as_deref().unwrap_or(&node.description);

    NodeRepo::update_fields(conn, kind, id, name, description, editor.as_str(), now)
}

/// Relation labels with active rows still pointing at the node
fn active_blockers(conn: &Connection, node: &Node) -> Result<Vec<String>> {
    let mut blocking = Vec::new();
    for blocker in blockers(node.kind) {
        let count = match *blocker {
            Blocker::Child { kind, column } => {
                NodeRepo::count_active_children(conn, kind, column, node.id)?
            }
            Blocker::Link { kind, side } => {
                AssociationRepo::count_active_for(conn, kind, side, node.id)?
            }
        };
        if count > 0 {
            blocking.push(format!("{} ({} active)", blocker.label(), count));
        }
    }
    Ok(blocking)
}

pub(crate) fn mark_delete_node_in(
    conn: &Connection,
    kind: NodeKind,
    id: i64,
    editor: &EditorId,
    now: DateTime<Utc>,
) -> Result<()> {
    let node = require_node(conn, kind, id)?;
    transition(
        &node.label(),
        LifecycleState::from_deleted(node.deleted),
        Transition::MarkDelete,
    )?;

    let blocking = active_blockers(conn, &node)?;
    if !blocking.is_empty() {
        return Err(CatalogError::ActiveDependents { kind, id, blocking }.into());
    }

    NodeRepo::set_deleted(conn, kind, id, true, editor.as_str(), now)
}

pub(crate) fn mark_undelete_node_in(
    conn: &Connection,
    kind: NodeKind,
    id: i64,
    editor: &EditorId,
    now: DateTime<Utc>,
) -> Result<()> {
    let node = require_node(conn, kind, id)?;
    transition(
        &node.label(),
        LifecycleState::from_deleted(node.deleted),
        Transition::MarkUndelete,
    )?;

    for link in kind.parent_links() {
        let Some(parent_id) = node.parent_by_column(link.column) else {
            continue;
        };
        match NodeRepo::get(conn, link.kind, parent_id)? {
            None => {
                return Err(CatalogError::ReferenceNotFound {
                    kind: link.kind,
                    id: parent_id,
                }
                .into())
            }
            Some(parent) if parent.deleted => {
                return Err(CatalogError::ParentDeleted {
                    kind,
                    id,
                    parent: link.kind,
                    parent_id,
                }
                .into())
            }
            Some(_) => {}
        }
    }

    ensure_name_free(conn, kind, node.parent_id, &node.name, Some(id))?;

    NodeRepo::set_deleted(conn, kind, id, false, editor.as_str(), now)
}

pub(crate) fn purge_node_in(conn: &Connection, kind: NodeKind, id: i64) -> Result<()> {
    let node = require_node(conn, kind, id)?;
    transition(
        &node.label(),
        LifecycleState::from_deleted(node.deleted),
        Transition::Purge,
    )?;

    NodeRepo::delete(conn, kind, id)?;
    tracing::debug!(node_kind = kind.as_str(), node_id = id, "node purged");
    Ok(())
}

/// Create an active node and return its id
///
/// # Errors
/// * `InvalidInput` - blank or over-long name, missing or unexpected parent
/// * `NotFound` - a parent is absent or soft-deleted
/// * `Conflict` - an active sibling already has this name
pub fn create_node(
    conn: &mut Connection,
    kind: NodeKind,
    draft: &NodeDraft,
    editor: &EditorId,
) -> Result<i64> {
    tx::write(conn, "node_create", |tx| {
        create_node_in(tx, kind, draft, editor, Utc::now())
    })
}

/// Edit name and/or description of an active node
///
/// # Errors
/// * `NotFound` - no such node
/// * `Conflict` - the node is soft-deleted, or the new name collides
/// * `InvalidInput` - blank or over-long name
pub fn update_node(
    conn: &mut Connection,
    kind: NodeKind,
    id: i64,
    update: &NodeUpdate,
    editor: &EditorId,
) -> Result<()> {
    tx::write(conn, "node_update", |tx| {
        update_node_in(tx, kind, id, update, editor, Utc::now())
    })
}

/// Soft-delete a node that nothing active depends on
///
/// # Errors
/// * `NotFound` - no such node
/// * `Conflict` - already deleted, or active children/links remain (listed
///   in the error's `blocking()`)
pub fn mark_delete_node(
    conn: &mut Connection,
    kind: NodeKind,
    id: i64,
    editor: &EditorId,
) -> Result<()> {
    tx::write(conn, "node_mark_delete", |tx| {
        mark_delete_node_in(tx, kind, id, editor, Utc::now())
    })
}

/// Restore a soft-deleted node
///
/// # Errors
/// * `NotFound` - no such node
/// * `Conflict` - not deleted, a parent is deleted, or the name is now taken
pub fn mark_undelete_node(
    conn: &mut Connection,
    kind: NodeKind,
    id: i64,
    editor: &EditorId,
) -> Result<()> {
    tx::write(conn, "node_mark_undelete", |tx| {
        mark_undelete_node_in(tx, kind, id, editor, Utc::now())
    })
}

/// Physically remove a soft-deleted node and everything beneath it
///
/// # Errors
/// * `NotFound` - no such node
/// * `Conflict` - the node is still active
pub fn purge_node(conn: &mut Connection, kind: NodeKind, id: i64) -> Result<()> {
    tx::write(conn, "node_purge", |tx| purge_node_in(tx, kind, id))
}
