//! Migrations embedded at compile time

/// Migration metadata
pub struct Migration {
    pub id: &'static str,
    pub sql: &'static str,
}

/// All embedded migrations in application order
pub fn get_migrations() -> Vec<Migration> {
    vec![Migration {
        id: "001_catalog_schema",
        sql: include_str!("../../migrations/001_catalog_schema.sql"),
    }]
}
