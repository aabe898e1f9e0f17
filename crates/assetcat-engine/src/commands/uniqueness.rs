//! Scoped name uniqueness among active rows

#![allow(clippy::result_large_err)]

use assetcat_core::errors::CatalogError;
use assetcat_core::model::NodeKind;
use assetcat_core::rules::naming::normalize_name;
use assetcat_store::errors::Result;
use assetcat_store::NodeRepo;
use rusqlite::Connection;

/// Whether `candidate` collides with an active node in the same scope
///
/// The scope is the node's scope parent (`scope_parent_id`), or the whole
/// table for kinds without one. `exclude_id` skips the node being edited.
///
/// # Errors
/// * `StoreFailure` - the read failed
pub fn is_name_taken(
    conn: &Connection,
    kind: NodeKind,
    scope_parent_id: Option<i64>,
    candidate: &str,
    exclude_id: Option<i64>,
) -> Result<bool> {
    NodeRepo::name_taken(
        conn,
        kind,
        scope_parent_id,
        &normalize_name(candidate),
        exclude_id,
    )
}

/// `NameTaken` if [`is_name_taken`] holds
pub(crate) fn ensure_name_free(
    conn: &Connection,
    kind: NodeKind,
    scope_parent_id: Option<i64>,
    candidate: &str,
    exclude_id: Option<i64>,
) -> Result<()> {
    if is_name_taken(conn, kind, scope_parent_id, candidate, exclude_id)? {
        return Err(CatalogError::NameTaken {
            kind,
            name: candidate.trim().to_string(),
        }
        .into());
    }
    Ok(())
}
