//! Read-side operations

#![allow(clippy::result_large_err)]

use assetcat_core::errors::CatalogError;
use assetcat_core::model::{
    AssociationKey, AssociationKind, AssociationView, ListFilter, NodeKind, NodeTree, NodeView,
};
use assetcat_store::errors::Result;
use assetcat_store::repo::hydration;
use assetcat_store::{AssociationRepo, NodeRepo};
use rusqlite::Connection;

use crate::commands::lifecycle::require_node;
use crate::commands::tx;

/// A node by id, soft-deleted or not
///
/// # Errors
/// * `NotFound` - no such node
pub fn get_node(conn: &mut Connection, kind: NodeKind, id: i64) -> Result<NodeView> {
    tx::read(conn, "node_get", |tx| {
        require_node(tx, kind, id).map(NodeView::from)
    })
}

/// # Errors
/// * `StoreFailure` - the read failed
pub fn list_nodes(conn: &mut Connection, kind: NodeKind, filter: ListFilter) -> Result<Vec<NodeView>> {
    tx::read(conn, "node_list", |tx| {
        Ok(NodeRepo::list(tx, kind, filter)?
            .into_iter()
            .map(NodeView::from)
            .collect())
    })
}

/// Every node of `kind` with its subtree and links
///
/// # Errors
/// * `StoreFailure` - the read failed
pub fn list_nodes_with_children(
    conn: &mut Connection,
    kind: NodeKind,
    filter: ListFilter,
) -> Result<Vec<NodeTree>> {
    tx::read(conn, "node_list_tree", |tx| {
        hydration::load_forest(tx, kind, filter)
    })
}

/// One node with its subtree and links
///
/// # Errors
/// * `NotFound` - no such node
pub fn get_node_tree(
    conn: &mut Connection,
    kind: NodeKind,
    id: i64,
    filter: ListFilter,
) -> Result<NodeTree> {
    tx::read(conn, "node_tree", |tx| {
        let node = require_node(tx, kind, id)?;
        hydration::load_tree(tx, node, filter)
    })
}

/// # Errors
/// * `NotFound` - no such association
pub fn get_association(conn: &mut Connection, key: AssociationKey) -> Result<AssociationView> {
    tx::read(conn, "link_get", |tx| {
        AssociationRepo::get(tx, key)?
            .map(AssociationView::from)
            .ok_or_else(|| {
                CatalogError::AssociationNotFound {
                    kind: key.kind,
                    left_id: key.left_id,
                    right_id: key.right_id,
                }
                .into()
            })
    })
}

/// # Errors
/// * `StoreFailure` - the read failed
pub fn list_associations(
    conn: &mut Connection,
    kind: AssociationKind,
    filter: ListFilter,
) -> Result<Vec<AssociationView>> {
    tx::read(conn, "link_list", |tx| {
        Ok(AssociationRepo::list(tx, kind, filter)?
            .into_iter()
            .map(AssociationView::from)
            .collect())
    })
}

/// Links touching one node; `NotFound` if the node does not exist
///
/// # Errors
/// * `NotFound` - no such node
pub fn list_links_for_node(
    conn: &mut Connection,
    kind: NodeKind,
    id: i64,
    filter: ListFilter,
) -> Result<Vec<AssociationView>> {
    tx::read(conn, "link_list_for_node", |tx| {
        require_node(tx, kind, id)?;
        hydration::load_links(tx, kind, id, filter)
    })
}
