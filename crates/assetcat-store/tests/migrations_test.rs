// Integration tests for the migration framework

use assetcat_core::model::{AssociationKind, NodeKind};
use rusqlite::Connection;

fn setup_test_db() -> Connection {
    Connection::open_in_memory().expect("Failed to create in-memory database")
}

fn get_table_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}

fn get_column_names(conn: &Connection, table: &str) -> Vec<String> {
    let mut stmt = conn
        .prepare(&format!("SELECT name FROM pragma_table_info('{}')", table))
        .unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}

#[test]
fn test_apply_migrations_creates_every_table() {
    // GIVEN an empty database
    let mut conn = setup_test_db();

    // WHEN migrations are applied
    assetcat_store::migrations::apply_migrations(&mut conn).unwrap();

    // THEN every node and association table exists, plus bookkeeping
    let tables = get_table_names(&conn);
    for kind in NodeKind::ALL {
        assert!(tables.contains(&kind.table().to_string()), "missing {}", kind);
    }
    for kind in AssociationKind::ALL {
        assert!(tables.contains(&kind.table().to_string()), "missing {}", kind);
    }
    for extra in ["schema_version", "seed_imports", "sqlite_sequence"] {
        assert!(tables.contains(&extra.to_string()), "missing {}", extra);
    }
    assert_eq!(tables.len(), 13 + 16 + 3);
}

#[test]
fn test_tables_match_kind_metadata() {
    let mut conn = setup_test_db();
    assetcat_store::migrations::apply_migrations(&mut conn).unwrap();

    for kind in NodeKind::ALL {
        let columns = get_column_names(&conn, kind.table());
        assert!(columns.contains(&kind.id_column().to_string()));
        for link in kind.parent_links() {
            assert!(
                columns.contains(&link.column.to_string()),
                "{} lacks parent column {}",
                kind,
                link.column
            );
        }
        for audit in ["name_key", "is_deleted", "editor_id", "created_at", "updated_at"] {
            assert!(columns.contains(&audit.to_string()));
        }
    }

    for kind in AssociationKind::ALL {
        let columns = get_column_names(&conn, kind.table());
        assert!(columns.contains(&kind.column(assetcat_core::Side::Left).to_string()));
        assert!(columns.contains(&kind.column(assetcat_core::Side::Right).to_string()));
        assert_eq!(
            columns.contains(&"value".to_string()),
            kind.carries_value(),
            "value column mismatch on {}",
            kind
        );
    }
}

#[test]
fn test_migration_idempotency() {
    // GIVEN a database with migrations already applied
    let mut conn = setup_test_db();
    assetcat_store::migrations::apply_migrations(&mut conn).unwrap();

    // WHEN migrations are applied again
    let result = assetcat_store::migrations::apply_migrations(&mut conn);

    // THEN nothing is re-applied
    assert!(result.is_ok(), "{:?}", result.err());
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn test_file_database_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.db");

    {
        let conn = assetcat_store::db::open_catalog(&path).unwrap();
        conn.execute(
            "INSERT INTO plant (name, name_key, editor_id, created_at, updated_at)
             VALUES ('North', 'north', 'u1', 0, 0)",
            [],
        )
        .unwrap();
    }

    let conn = assetcat_store::db::open_catalog(&path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM plant", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}
