//! Association lifecycle: add-or-reactivate, update, mark-delete, purge

#![allow(clippy::result_large_err)]

use assetcat_core::errors::CatalogError;
use assetcat_core::model::{Association, AssociationKey, Side};
use assetcat_core::rules::lifecycle::{transition, LifecycleState, Transition};
use assetcat_core_types::EditorId;
use assetcat_store::errors::Result;
use assetcat_store::AssociationRepo;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::Serialize;

use crate::commands::lifecycle::require_active_reference;
use crate::commands::tx;

/// What add-or-reactivate did to the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkOutcome {
    Created,
    /// The row existed soft-deleted and is active again
    Reactivated,
    /// The row was already active; value and audit fields were refreshed
    Refreshed,
}

fn check_value(key: AssociationKey, value: Option<&str>) -> Result<()> {
    if value.is_some() && !key.kind.carries_value() {
        return Err(CatalogError::ValueNotAllowed { kind: key.kind }.into());
    }
    Ok(())
}

fn require_association(conn: &Connection, key: AssociationKey) -> Result<Association> {
    AssociationRepo::get(conn, key)?.ok_or_else(|| {
        CatalogError::AssociationNotFound {
            kind: key.kind,
            left_id: key.left_id,
            right_id: key.right_id,
        }
        .into()
    })
}

fn label(key: AssociationKey) -> String {
    key.to_string()
}

pub(crate) fn add_or_reactivate_in(
    conn: &Connection,
    key: AssociationKey,
    value: Option<&str>,
    editor: &EditorId,
    now: DateTime<Utc>,
) -> Result<LinkOutcome> {
    check_value(key, value)?;

    let outcome = match AssociationRepo::get(conn, key)? {
        None => {
            require_active_reference(conn, key.kind.endpoint(Side::Left), key.left_id)?;
            require_active_reference(conn, key.kind.endpoint(Side::Right), key.right_id)?;
            AssociationRepo::insert(conn, key, value, editor.as_str(), now)?;
            LinkOutcome::Created
        }
        Some(existing) => {
            AssociationRepo::reactivate(conn, key, value, editor.as_str(), now)?;
            if existing.deleted {
                LinkOutcome::Reactivated
            } else {
                LinkOutcome::Refreshed
            }
        }
    };
    tracing::debug!(association = %key, ?outcome, "association written");
    Ok(outcome)
}

pub(crate) fn update_association_in(
    conn: &Connection,
    key: AssociationKey,
    value: Option<&str>,
    editor: &EditorId,
    now: DateTime<Utc>,
) -> Result<()> {
    check_value(key, value)?;
    let row = require_association(conn, key)?;
    if row.deleted {
        return Err(CatalogError::EntityDeleted { entity: label(key) }.into());
    }
    AssociationRepo::update_value(conn, key, value, editor.as_str(), now)
}

pub(crate) fn mark_delete_association_in(
    conn: &Connection,
    key: AssociationKey,
    editor: &EditorId,
    now: DateTime<Utc>,
) -> Result<()> {
    let row = require_association(conn, key)?;
    transition(
        &label(key),
        LifecycleState::from_deleted(row.deleted),
        Transition::MarkDelete,
    )?;
    AssociationRepo::set_deleted(conn, key, true, editor.as_str(), now)
}

pub(crate) fn purge_association_in(conn: &Connection, key: AssociationKey) -> Result<()> {
    let row = require_association(conn, key)?;
    transition(
        &label(key),
        LifecycleState::from_deleted(row.deleted),
        Transition::Purge,
    )?;
    AssociationRepo::delete(conn, key)?;
    Ok(())
}

/// Make the association active, creating it if needed
///
/// Idempotent: an existing row (active or soft-deleted) gets the new value
/// and editor and is active afterwards. Endpoints are only checked when
/// the row has to be created.
///
/// # Errors
/// * `InvalidInput` - a value was given for a kind that carries none
/// * `NotFound` - the row is absent and an endpoint is absent or soft-deleted
pub fn add_or_reactivate(
    conn: &mut Connection,
    key: AssociationKey,
    value: Option<&str>,
    editor: &EditorId,
) -> Result<LinkOutcome> {
    tx::write(conn, "link_add_or_reactivate", |tx| {
        add_or_reactivate_in(tx, key, value, editor, Utc::now())
    })
}

/// Overwrite the value of an active association
///
/// # Errors
/// * `InvalidInput` - a value was given for a kind that carries none
/// * `NotFound` - no such association
/// * `Conflict` - the association is soft-deleted
pub fn update_association(
    conn: &mut Connection,
    key: AssociationKey,
    value: Option<&str>,
    editor: &EditorId,
) -> Result<()> {
    tx::write(conn, "link_update", |tx| {
        update_association_in(tx, key, value, editor, Utc::now())
    })
}

/// Soft-delete an active association
///
/// # Errors
/// * `NotFound` - no such association
/// * `Conflict` - already soft-deleted
pub fn mark_delete_association(
    conn: &mut Connection,
    key: AssociationKey,
    editor: &EditorId,
) -> Result<()> {
    tx::write(conn, "link_mark_delete", |tx| {
        mark_delete_association_in(tx, key, editor, Utc::now())
    })
}

/// Physically remove a soft-deleted association
///
/// # Errors
/// * `NotFound` - no such association
/// * `Conflict` - the association is still active
pub fn purge_association(conn: &mut Connection, key: AssociationKey) -> Result<()> {
    tx::write(conn, "link_purge", |tx| purge_association_in(tx, key))
}
