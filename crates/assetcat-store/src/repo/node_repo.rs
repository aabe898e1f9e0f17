//! Persistence for the thirteen node tables

#![allow(clippy::result_large_err)]

use assetcat_core::model::{ListFilter, Node, NodeDraft, NodeKind};
use assetcat_core::rules::naming::normalize_name;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::millis;
use crate::errors::{from_rusqlite, Result};

/// SQLite repository for nodes of every kind
pub struct NodeRepo;

/// `SELECT` list shared by every node query; absent parents read as NULL
fn select_columns(kind: NodeKind) -> String {
    let scope = kind.scope_parent().map_or("NULL", |p| p.column);
    let model = kind.model_parent().map_or("NULL", |p| p.column);
    format!(
        "{}, name, description, {}, {}, is_deleted, editor_id, created_at, updated_at",
        kind.id_column(),
        scope,
        model
    )
}

fn map_node(kind: NodeKind, row: &Row<'_>) -> rusqlite::Result<Node> {
    let deleted: i64 = row.get(5)?;
    Ok(Node {
        kind,
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        parent_id: row.get(3)?,
        model_id: row.get(4)?,
        deleted: deleted != 0,
        editor_id: row.get(6)?,
        created_at: millis(7, row.get(7)?)?,
        updated_at: millis(8, row.get(8)?)?,
    })
}

fn deleted_clause(filter: ListFilter) -> &'static str {
    if filter.include_deleted {
        ""
    } else {
        " AND is_deleted = 0"
    }
}

impl NodeRepo {
    /// Insert an active node and return its new id
    ///
    /// Parent ids are written as given; callers check the parents first.
    pub fn insert(
        conn: &Connection,
        kind: NodeKind,
        draft: &NodeDraft,
        editor_id: &str,
        now: DateTime<Utc>,
    ) -> Result<i64> {
        let mut columns = vec!["name", "name_key", "description"];
        let mut parents: Vec<i64> = Vec::new();
        if let (Some(link), Some(id)) = (kind.scope_parent(), draft.parent_id) {
            columns.push(link.column);
            parents.push(id);
        }
        if let (Some(link), Some(id)) = (kind.model_parent(), draft.model_id) {
            columns.push(link.column);
            parents.push(id);
        }
        columns.extend(["is_deleted", "editor_id", "created_at", "updated_at"]);

        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            kind.table(),
            columns.join(", "),
            placeholders.join(", ")
        );

        let name = draft.name.trim();
        let ts = now.timestamp_millis();
        let mut values: Vec<Box<dyn rusqlite::ToSql>> = vec![
            Box::new(name.to_string()),
            Box::new(normalize_name(name)),
            Box::new(draft.description.clone()),
        ];
        values.extend(parents.into_iter().map(|id| Box::new(id) as Box<dyn rusqlite::ToSql>));
        values.push(Box::new(0_i64));
        values.push(Box::new(editor_id.to_string()));
        values.push(Box::new(ts));
        values.push(Box::new(ts));

        conn.execute(&sql, rusqlite::params_from_iter(values.iter()))
            .map_err(from_rusqlite)?;

        Ok(conn.last_insert_rowid())
    }

    /// Load a node regardless of its delete state
    pub fn get(conn: &Connection, kind: NodeKind, id: i64) -> Result<Option<Node>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ?1",
            select_columns(kind),
            kind.table(),
            kind.id_column()
        );
        conn.query_row(&sql, [id], |row| map_node(kind, row))
            .optional()
            .map_err(from_rusqlite)
    }

    /// All nodes of a kind, ordered by id
    pub fn list(conn: &Connection, kind: NodeKind, filter: ListFilter) -> Result<Vec<Node>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE 1 = 1{} ORDER BY {}",
            select_columns(kind),
            kind.table(),
            deleted_clause(filter),
            kind.id_column()
        );
        let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
        let nodes = stmt
            .query_map([], |row| map_node(kind, row))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(nodes)
    }

    /// Nodes of `kind` whose FK `column` points at `parent_id`, ordered by id
    pub fn list_children(
        conn: &Connection,
        kind: NodeKind,
        column: &str,
        parent_id: i64,
        filter: ListFilter,
    ) -> Result<Vec<Node>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ?1{} ORDER BY {}",
            select_columns(kind),
            kind.table(),
            column,
            deleted_clause(filter),
            kind.id_column()
        );
        let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
        let nodes = stmt
            .query_map([parent_id], |row| map_node(kind, row))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(nodes)
    }

    /// Active nodes of `kind` whose FK `column` points at `parent_id`
    pub fn count_active_children(
        conn: &Connection,
        kind: NodeKind,
        column: &str,
        parent_id: i64,
    ) -> Result<i64> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE {} = ?1 AND is_deleted = 0",
            kind.table(),
            column
        );
        conn.query_row(&sql, [parent_id], |row| row.get(0))
            .map_err(from_rusqlite)
    }

    /// Whether an active node other than `exclude_id` holds `name_key` in the scope
    ///
    /// `scope_parent_id` is ignored for kinds without a scope parent.
    pub fn name_taken(
        conn: &Connection,
        kind: NodeKind,
        scope_parent_id: Option<i64>,
        name_key: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool> {
        let exclude = exclude_id.unwrap_or(-1);
        let found = match (kind.scope_parent(), scope_parent_id) {
            (Some(link), Some(parent_id)) => {
                let sql = format!(
                    "SELECT 1 FROM {} WHERE {} = ?1 AND name_key = ?2 AND is_deleted = 0 AND {} != ?3 LIMIT 1",
                    kind.table(),
                    link.column,
                    kind.id_column()
                );
                conn.query_row(&sql, params![parent_id, name_key, exclude], |_| Ok(()))
                    .optional()
            }
            _ => {
                let sql = format!(
                    "SELECT 1 FROM {} WHERE name_key = ?1 AND is_deleted = 0 AND {} != ?2 LIMIT 1",
                    kind.table(),
                    kind.id_column()
                );
                conn.query_row(&sql, params![name_key, exclude], |_| Ok(()))
                    .optional()
            }
        }
        .map_err(from_rusqlite)?;
        Ok(found.is_some())
    }

    /// Overwrite name and description, refreshing `name_key`
    pub fn update_fields(
        conn: &Connection,
        kind: NodeKind,
        id: i64,
        name: &str,
        description: &str,
        editor_id: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let sql = format!(
            "UPDATE {} SET name = ?1, name_key = ?2, description = ?3, editor_id = ?4, updated_at = ?5 WHERE {} = ?6",
            kind.table(),
            kind.id_column()
        );
        let name = name.trim();
        conn.execute(
            &sql,
            params![
                name,
                normalize_name(name),
                description,
                editor_id,
                now.timestamp_millis(),
                id
            ],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    pub fn set_deleted(
        conn: &Connection,
        kind: NodeKind,
        id: i64,
        deleted: bool,
        editor_id: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let sql = format!(
            "UPDATE {} SET is_deleted = ?1, editor_id = ?2, updated_at = ?3 WHERE {} = ?4",
            kind.table(),
            kind.id_column()
        );
        conn.execute(
            &sql,
            params![i64::from(deleted), editor_id, now.timestamp_millis(), id],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    /// Point an asset at a different model
    pub fn set_model(
        conn: &Connection,
        asset_id: i64,
        model_id: i64,
        editor_id: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        conn.execute(
            "UPDATE asset SET model_id = ?1, editor_id = ?2, updated_at = ?3 WHERE asset_id = ?4",
            params![model_id, editor_id, now.timestamp_millis(), asset_id],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    /// Physically remove a node; FK cascades remove dependent rows
    ///
    /// Returns the number of rows removed from the node table (0 or 1).
    pub fn delete(conn: &Connection, kind: NodeKind, id: i64) -> Result<usize> {
        let sql = format!(
            "DELETE FROM {} WHERE {} = ?1",
            kind.table(),
            kind.id_column()
        );
        conn.execute(&sql, [id]).map_err(from_rusqlite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_catalog_in_memory;

    fn plant(conn: &Connection, name: &str) -> i64 {
        NodeRepo::insert(conn, NodeKind::Plant, &NodeDraft::named(name), "u1", Utc::now()).unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let conn = open_catalog_in_memory().unwrap();
        let plant_id = plant(&conn, "  North  ");
        let area_id = NodeRepo::insert(
            &conn,
            NodeKind::Area,
            &NodeDraft::named("Boiler").with_description("hot").under(plant_id),
            "u2",
            Utc::now(),
        )
        .unwrap();

        let area = NodeRepo::get(&conn, NodeKind::Area, area_id).unwrap().unwrap();
        assert_eq!(area.name, "Boiler");
        assert_eq!(area.description, "hot");
        assert_eq!(area.parent_id, Some(plant_id));
        assert_eq!(area.model_id, None);
        assert!(!area.deleted);
        assert_eq!(area.editor_id, "u2");

        let stored = NodeRepo::get(&conn, NodeKind::Plant, plant_id).unwrap().unwrap();
        assert_eq!(stored.name, "North");
        assert!(NodeRepo::get(&conn, NodeKind::Plant, 999).unwrap().is_none());
    }

    #[test]
    fn test_name_taken_ignores_deleted_and_self() {
        let conn = open_catalog_in_memory().unwrap();
        let id = plant(&conn, "North");

        assert!(NodeRepo::name_taken(&conn, NodeKind::Plant, None, "north", None).unwrap());
        assert!(!NodeRepo::name_taken(&conn, NodeKind::Plant, None, "north", Some(id)).unwrap());

        NodeRepo::set_deleted(&conn, NodeKind::Plant, id, true, "u1", Utc::now()).unwrap();
        assert!(!NodeRepo::name_taken(&conn, NodeKind::Plant, None, "north", None).unwrap());
    }

    #[test]
    fn test_name_scope_is_per_parent() {
        let conn = open_catalog_in_memory().unwrap();
        let a = plant(&conn, "A");
        let b = plant(&conn, "B");
        NodeRepo::insert(&conn, NodeKind::Area, &NodeDraft::named("Yard").under(a), "u1", Utc::now())
            .unwrap();

        assert!(NodeRepo::name_taken(&conn, NodeKind::Area, Some(a), "yard", None).unwrap());
        assert!(!NodeRepo::name_taken(&conn, NodeKind::Area, Some(b), "yard", None).unwrap());
    }

    #[test]
    fn test_list_filters_deleted() {
        let conn = open_catalog_in_memory().unwrap();
        plant(&conn, "A");
        let b = plant(&conn, "B");
        NodeRepo::set_deleted(&conn, NodeKind::Plant, b, true, "u1", Utc::now()).unwrap();

        assert_eq!(NodeRepo::list(&conn, NodeKind::Plant, ListFilter::active()).unwrap().len(), 1);
        assert_eq!(NodeRepo::list(&conn, NodeKind::Plant, ListFilter::all()).unwrap().len(), 2);
    }

    #[test]
    fn test_delete_cascades_to_children() {
        let conn = open_catalog_in_memory().unwrap();
        let p = plant(&conn, "A");
        let area = NodeRepo::insert(&conn, NodeKind::Area, &NodeDraft::named("Yard").under(p), "u1", Utc::now())
            .unwrap();

        assert_eq!(NodeRepo::delete(&conn, NodeKind::Plant, p).unwrap(), 1);
        assert!(NodeRepo::get(&conn, NodeKind::Area, area).unwrap().is_none());
        assert_eq!(NodeRepo::delete(&conn, NodeKind::Plant, p).unwrap(), 0);
    }
}
