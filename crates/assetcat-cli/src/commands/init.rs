//! Init command
//!
//! Usage: assetcat init
//!
//! Opening the catalog already creates and migrates the database; this
//! reports what is in place.

use assetcat_store::migrations::applied_migrations;
use serde_json::json;

use super::{print_json, CmdResult, Context};

pub fn execute(ctx: &mut Context) -> CmdResult {
    let migrations = applied_migrations(ctx.catalog.connection())?;
    print_json(&json!({
        "database": ctx.db_path.display().to_string(),
        "migrations": migrations,
    }))
}
