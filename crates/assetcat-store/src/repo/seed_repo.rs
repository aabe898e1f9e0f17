//! Provenance of imported seeds

#![allow(clippy::result_large_err)]

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

use super::millis;
use crate::errors::{from_rusqlite, Result};

/// One row of `seed_imports`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeedImportRecord {
    pub import_id: i64,
    pub digest: String,
    pub source: Option<String>,
    pub node_count: i64,
    pub link_count: i64,
    pub editor_id: String,
    pub imported_at: DateTime<Utc>,
}

pub struct SeedRepo;

impl SeedRepo {
    /// Record a completed import and return its id
    pub fn record_import(
        conn: &Connection,
        digest: &str,
        source: Option<&str>,
        node_count: i64,
        link_count: i64,
        editor_id: &str,
        now: DateTime<Utc>,
    ) -> Result<i64> {
        conn.execute(
            "INSERT INTO seed_imports (digest, source, node_count, link_count, editor_id, imported_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                digest,
                source,
                node_count,
                link_count,
                editor_id,
                now.timestamp_millis()
            ],
        )
        .map_err(from_rusqlite)?;
        Ok(conn.last_insert_rowid())
    }

    pub fn find_by_digest(conn: &Connection, digest: &str) -> Result<Option<SeedImportRecord>> {
        conn.query_row(
            "SELECT import_id, digest, source, node_count, link_count, editor_id, imported_at
             FROM seed_imports WHERE digest = ?1",
            [digest],
            |row| {
                Ok(SeedImportRecord {
                    import_id: row.get(0)?,
                    digest: row.get(1)?,
                    source: row.get(2)?,
                    node_count: row.get(3)?,
                    link_count: row.get(4)?,
                    editor_id: row.get(5)?,
                    imported_at: millis(6, row.get(6)?)?,
                })
            },
        )
        .optional()
        .map_err(from_rusqlite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_catalog_in_memory;

    #[test]
    fn test_record_and_find() {
        let conn = open_catalog_in_memory().unwrap();
        let id = SeedRepo::record_import(&conn, "abc", Some("seed.yaml"), 4, 1, "u1", Utc::now())
            .unwrap();

        let record = SeedRepo::find_by_digest(&conn, "abc").unwrap().unwrap();
        assert_eq!(record.import_id, id);
        assert_eq!(record.node_count, 4);
        assert_eq!(record.source.as_deref(), Some("seed.yaml"));
        assert!(SeedRepo::find_by_digest(&conn, "zzz").unwrap().is_none());
    }

    #[test]
    fn test_digest_is_unique() {
        let conn = open_catalog_in_memory().unwrap();
        SeedRepo::record_import(&conn, "abc", None, 0, 0, "u1", Utc::now()).unwrap();
        assert!(SeedRepo::record_import(&conn, "abc", None, 0, 0, "u1", Utc::now()).is_err());
    }
}
