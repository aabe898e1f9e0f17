//! Hydration of node trees: a node, its children (recursively) and the
//! association rows touching each node

#![allow(clippy::result_large_err)]

use assetcat_core::model::{AssociationKind, AssociationView, ListFilter, Node, NodeKind, NodeTree};
use rusqlite::Connection;

use crate::errors::Result;
use crate::repo::{AssociationRepo, NodeRepo};

/// Build the tree rooted at `node`
///
/// Children follow every child edge of the node's kind (an asset appears
/// under both its coordinate and its model). `filter` applies at every
/// level, to child nodes and to links alike.
pub fn load_tree(conn: &Connection, node: Node, filter: ListFilter) -> Result<NodeTree> {
    let mut children = Vec::new();
    for (child_kind, link) in node.kind.child_links() {
        for child in NodeRepo::list_children(conn, child_kind, link.column, node.id, filter)? {
            children.push(load_tree(conn, child, filter)?);
        }
    }

    let links = load_links(conn, node.kind, node.id, filter)?;

    Ok(NodeTree {
        node: node.into(),
        children,
        links,
    })
}

/// Trees for every node of `kind` that passes `filter`, ordered by id
pub fn load_forest(conn: &Connection, kind: NodeKind, filter: ListFilter) -> Result<Vec<NodeTree>> {
    NodeRepo::list(conn, kind, filter)?
        .into_iter()
        .map(|node| load_tree(conn, node, filter))
        .collect()
}

/// Association rows touching one node, grouped in association-kind order
pub fn load_links(
    conn: &Connection,
    kind: NodeKind,
    id: i64,
    filter: ListFilter,
) -> Result<Vec<AssociationView>> {
    let mut links = Vec::new();
    for (assoc, side) in AssociationKind::touching(kind) {
        links.extend(
            AssociationRepo::list_for_node(conn, assoc, side, id, filter)?
                .into_iter()
                .map(AssociationView::from),
        );
    }
    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_catalog_in_memory;
    use assetcat_core::model::{AssociationKey, NodeDraft};
    use chrono::Utc;

    #[test]
    fn test_tree_follows_hierarchy_and_links() {
        let conn = open_catalog_in_memory().unwrap();
        let now = Utc::now();
        let plant = NodeRepo::insert(&conn, NodeKind::Plant, &NodeDraft::named("P"), "u1", now).unwrap();
        let area = NodeRepo::insert(&conn, NodeKind::Area, &NodeDraft::named("A").under(plant), "u1", now)
            .unwrap();
        let gone = NodeRepo::insert(&conn, NodeKind::Area, &NodeDraft::named("B").under(plant), "u1", now)
            .unwrap();
        NodeRepo::set_deleted(&conn, NodeKind::Area, gone, true, "u1", now).unwrap();
        let comm = NodeRepo::insert(&conn, NodeKind::Communicate, &NodeDraft::named("Alert"), "u1", now)
            .unwrap();
        AssociationRepo::insert(
            &conn,
            AssociationKey::new(AssociationKind::CommunicateArea, comm, area),
            None,
            "u1",
            now,
        )
        .unwrap();

        let active = load_forest(&conn, NodeKind::Plant, ListFilter::active()).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].size(), 2);
        assert_eq!(active[0].children[0].node.id, area);
        assert_eq!(active[0].children[0].links.len(), 1);

        let all = load_forest(&conn, NodeKind::Plant, ListFilter::all()).unwrap();
        assert_eq!(all[0].size(), 3);
    }
}
