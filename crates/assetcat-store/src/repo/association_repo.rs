//! Persistence for the sixteen association tables

#![allow(clippy::result_large_err)]

use assetcat_core::model::{Association, AssociationKey, AssociationKind, ListFilter, Side};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::millis;
use crate::errors::{from_rusqlite, Result};

/// SQLite repository for association rows of every kind
pub struct AssociationRepo;

fn select_columns(kind: AssociationKind) -> String {
    format!(
        "{}, {}, {}, is_deleted, editor_id, created_at, updated_at",
        kind.column(Side::Left),
        kind.column(Side::Right),
        if kind.carries_value() { "value" } else { "NULL" }
    )
}

fn key_clause(kind: AssociationKind) -> String {
    format!(
        "{} = ?1 AND {} = ?2",
        kind.column(Side::Left),
        kind.column(Side::Right)
    )
}

fn map_association(kind: AssociationKind, row: &Row<'_>) -> rusqlite::Result<Association> {
    let deleted: i64 = row.get(3)?;
    Ok(Association {
        key: AssociationKey::new(kind, row.get(0)?, row.get(1)?),
        value: row.get(2)?,
        deleted: deleted != 0,
        editor_id: row.get(4)?,
        created_at: millis(5, row.get(5)?)?,
        updated_at: millis(6, row.get(6)?)?,
    })
}

/// Value to persist; valueless kinds always store nothing
fn stored_value(kind: AssociationKind, value: Option<&str>) -> Option<&str> {
    value.filter(|_| kind.carries_value())
}

impl AssociationRepo {
    /// Load one row regardless of its delete state
    pub fn get(conn: &Connection, key: AssociationKey) -> Result<Option<Association>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {}",
            select_columns(key.kind),
            key.kind.table(),
            key_clause(key.kind)
        );
        conn.query_row(&sql, params![key.left_id, key.right_id], |row| {
            map_association(key.kind, row)
        })
        .optional()
        .map_err(from_rusqlite)
    }

    /// Insert an active row
    pub fn insert(
        conn: &Connection,
        key: AssociationKey,
        value: Option<&str>,
        editor_id: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let ts = now.timestamp_millis();
        let (left, right) = (key.kind.column(Side::Left), key.kind.column(Side::Right));
        if key.kind.carries_value() {
            let sql = format!(
                "INSERT INTO {} ({}, {}, value, is_deleted, editor_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, 0, ?4, ?5, ?5)",
                key.kind.table(),
                left,
                right
            );
            conn.execute(
                &sql,
                params![key.left_id, key.right_id, stored_value(key.kind, value), editor_id, ts],
            )
        } else {
            let sql = format!(
                "INSERT INTO {} ({}, {}, is_deleted, editor_id, created_at, updated_at)
                 VALUES (?1, ?2, 0, ?3, ?4, ?4)",
                key.kind.table(),
                left,
                right
            );
            conn.execute(&sql, params![key.left_id, key.right_id, editor_id, ts])
        }
        .map_err(from_rusqlite)?;
        Ok(())
    }

    /// Clear the delete flag and overwrite the value of an existing row
    pub fn reactivate(
        conn: &Connection,
        key: AssociationKey,
        value: Option<&str>,
        editor_id: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        Self::write(conn, key, true, value, editor_id, now)
    }

    /// Overwrite the value of an existing row, keeping its delete state
    pub fn update_value(
        conn: &Connection,
        key: AssociationKey,
        value: Option<&str>,
        editor_id: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        Self::write(conn, key, false, value, editor_id, now)
    }

    pub fn set_deleted(
        conn: &Connection,
        key: AssociationKey,
        deleted: bool,
        editor_id: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let sql = format!(
            "UPDATE {} SET is_deleted = ?3, editor_id = ?4, updated_at = ?5 WHERE {}",
            key.kind.table(),
            key_clause(key.kind)
        );
        conn.execute(
            &sql,
            params![
                key.left_id,
                key.right_id,
                i64::from(deleted),
                editor_id,
                now.timestamp_millis()
            ],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    fn write(
        conn: &Connection,
        key: AssociationKey,
        reactivate: bool,
        value: Option<&str>,
        editor_id: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let mut sets = vec!["editor_id = ?3", "updated_at = ?4"];
        if reactivate {
            sets.push("is_deleted = 0");
        }
        if key.kind.carries_value() {
            sets.push("value = ?5");
            let sql = format!(
                "UPDATE {} SET {} WHERE {}",
                key.kind.table(),
                sets.join(", "),
                key_clause(key.kind)
            );
            conn.execute(
                &sql,
                params![
                    key.left_id,
                    key.right_id,
                    editor_id,
                    now.timestamp_millis(),
                    stored_value(key.kind, value)
                ],
            )
        } else {
            let sql = format!(
                "UPDATE {} SET {} WHERE {}",
                key.kind.table(),
                sets.join(", "),
                key_clause(key.kind)
            );
            conn.execute(
                &sql,
                params![key.left_id, key.right_id, editor_id, now.timestamp_millis()],
            )
        }
        .map_err(from_rusqlite)?;
        Ok(())
    }

    /// Physically remove one row; returns the number removed (0 or 1)
    pub fn delete(conn: &Connection, key: AssociationKey) -> Result<usize> {
        let sql = format!(
            "DELETE FROM {} WHERE {}",
            key.kind.table(),
            key_clause(key.kind)
        );
        conn.execute(&sql, params![key.left_id, key.right_id])
            .map_err(from_rusqlite)
    }

    /// Active rows of `kind` with `node_id` on `side`
    pub fn count_active_for(
        conn: &Connection,
        kind: AssociationKind,
        side: Side,
        node_id: i64,
    ) -> Result<i64> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE {} = ?1 AND is_deleted = 0",
            kind.table(),
            kind.column(side)
        );
        conn.query_row(&sql, [node_id], |row| row.get(0))
            .map_err(from_rusqlite)
    }

    /// Every row of `kind`, ordered by key
    pub fn list(
        conn: &Connection,
        kind: AssociationKind,
        filter: ListFilter,
    ) -> Result<Vec<Association>> {
        let sql = format!(
            "SELECT {} FROM {}{} ORDER BY {}, {}",
            select_columns(kind),
            kind.table(),
            if filter.include_deleted {
                ""
            } else {
                " WHERE is_deleted = 0"
            },
            kind.column(Side::Left),
            kind.column(Side::Right)
        );
        let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
        let rows = stmt
            .query_map([], |row| map_association(kind, row))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(rows)
    }

    /// Rows of `kind` with `node_id` on `side`, ordered by key
    pub fn list_for_node(
        conn: &Connection,
        kind: AssociationKind,
        side: Side,
        node_id: i64,
        filter: ListFilter,
    ) -> Result<Vec<Association>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ?1{} ORDER BY {}, {}",
            select_columns(kind),
            kind.table(),
            kind.column(side),
            if filter.include_deleted {
                ""
            } else {
                " AND is_deleted = 0"
            },
            kind.column(Side::Left),
            kind.column(Side::Right)
        );
        let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
        let rows = stmt
            .query_map([node_id], |row| map_association(kind, row))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(rows)
    }

    /// Remove every row of `kind` with `node_id` on `side`, active or not
    ///
    /// Returns the removed keys in key order.
    pub fn delete_all_for(
        conn: &Connection,
        kind: AssociationKind,
        side: Side,
        node_id: i64,
    ) -> Result<Vec<AssociationKey>> {
        let removed: Vec<AssociationKey> =
            Self::list_for_node(conn, kind, side, node_id, ListFilter::all())?
                .into_iter()
                .map(|row| row.key)
                .collect();

        let sql = format!(
            "DELETE FROM {} WHERE {} = ?1",
            kind.table(),
            kind.column(side)
        );
        conn.execute(&sql, [node_id]).map_err(from_rusqlite)?;
        Ok(removed)
    }
}
