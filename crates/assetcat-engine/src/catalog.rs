//! `Catalog`: the engine facade owning one SQLite connection

#![allow(clippy::result_large_err)]

use std::path::Path;

use assetcat_core::model::{
    AssociationKey, AssociationKind, AssociationView, ListFilter, NodeDraft, NodeKind, NodeTree,
    NodeUpdate, NodeView,
};
use assetcat_core_types::EditorId;
use assetcat_store::db;
use assetcat_store::errors::Result;
use assetcat_store::seed::SeedV0;
use rusqlite::Connection;

use crate::commands::association::{self, LinkOutcome};
use crate::commands::engine_command::{apply_engine_command, EngineCommand, EngineCommandResult};
use crate::commands::seed_import::{self, SeedImportSummary};
use crate::commands::{cascade, lifecycle, queries, uniqueness};

/// The asset catalog
///
/// Every method runs in its own transaction. Methods take `&mut self`, so
/// operations on one catalog never overlap.
pub struct Catalog {
    conn: Connection,
}

impl Catalog {
    /// Open (creating and migrating as needed) a file-backed catalog
    ///
    /// # Errors
    /// * `Io` - the parent directory cannot be created
    /// * `StoreFailure` - the database cannot be opened or migrated
    /// * `Conflict` - a recorded migration checksum differs
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            conn: db::open_catalog(path)?,
        })
    }

    /// A fresh, migrated in-memory catalog
    ///
    /// # Errors
    /// * `StoreFailure` - the database cannot be opened or migrated
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: db::open_catalog_in_memory()?,
        })
    }

    /// Wrap a connection that is already configured and migrated
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn into_connection(self) -> Connection {
        self.conn
    }

    // ===== Nodes =====

    /// # Errors
    /// * `InvalidInput` - blank or over-long name, missing or unexpected parent
    /// * `NotFound` - a parent is absent or soft-deleted
    /// * `Conflict` - an active sibling already has this name
    pub fn create_node(&mut self, kind: NodeKind, draft: NodeDraft, editor: &EditorId) -> Result<i64> {
        lifecycle::create_node(&mut self.conn, kind, &draft, editor)
    }

    /// # Errors
    /// * `NotFound` - no such node
    /// * `Conflict` - the node is soft-deleted, or the new name collides
    /// * `InvalidInput` - blank or over-long name
    pub fn update_node(
        &mut self,
        kind: NodeKind,
        id: i64,
        update: NodeUpdate,
        editor: &EditorId,
    ) -> Result<()> {
        lifecycle::update_node(&mut self.conn, kind, id, &update, editor)
    }

    /// # Errors
    /// * `NotFound` - no such node
    /// * `Conflict` - already deleted, or active children/links remain
    pub fn mark_delete_node(&mut self, kind: NodeKind, id: i64, editor: &EditorId) -> Result<()> {
        lifecycle::mark_delete_node(&mut self.conn, kind, id, editor)
    }

    /// # Errors
    /// * `NotFound` - no such node
    /// * `Conflict` - not deleted, a parent is deleted, or the name is taken
    pub fn mark_undelete_node(&mut self, kind: NodeKind, id: i64, editor: &EditorId) -> Result<()> {
        lifecycle::mark_undelete_node(&mut self.conn, kind, id, editor)
    }

    /// # Errors
    /// * `NotFound` - no such node
    /// * `Conflict` - the node is still active
    pub fn purge_node(&mut self, kind: NodeKind, id: i64) -> Result<()> {
        lifecycle::purge_node(&mut self.conn, kind, id)
    }

    /// # Errors
    /// * `NotFound` - no such node
    pub fn get_node(&mut self, kind: NodeKind, id: i64) -> Result<NodeView> {
        queries::get_node(&mut self.conn, kind, id)
    }

    /// # Errors
    /// * `StoreFailure` - the read failed
    pub fn list_nodes(&mut self, kind: NodeKind, filter: ListFilter) -> Result<Vec<NodeView>> {
        queries::list_nodes(&mut self.conn, kind, filter)
    }

    /// # Errors
    /// * `StoreFailure` - the read failed
    pub fn list_nodes_with_children(
        &mut self,
        kind: NodeKind,
        filter: ListFilter,
    ) -> Result<Vec<NodeTree>> {
        queries::list_nodes_with_children(&mut self.conn, kind, filter)
    }

    /// # Errors
    /// * `NotFound` - no such node
    pub fn get_node_tree(&mut self, kind: NodeKind, id: i64, filter: ListFilter) -> Result<NodeTree> {
        queries::get_node_tree(&mut self.conn, kind, id, filter)
    }

    /// Whether `candidate` would collide with an active sibling
    ///
    /// # Errors
    /// * `StoreFailure` - the read failed
    pub fn is_name_taken(
        &self,
        kind: NodeKind,
        scope_parent_id: Option<i64>,
        candidate: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool> {
        uniqueness::is_name_taken(&self.conn, kind, scope_parent_id, candidate, exclude_id)
    }

    /// # Errors
    /// * `NotFound` - no such asset, or the model is absent or soft-deleted
    /// * `Conflict` - the asset is soft-deleted or already on that model
    pub fn reassign_asset_model(
        &mut self,
        asset_id: i64,
        model_id: i64,
        editor: &EditorId,
    ) -> Result<Vec<AssociationKey>> {
        cascade::reassign_asset_model(&mut self.conn, asset_id, model_id, editor)
    }

    // ===== Associations =====

    /// # Errors
    /// * `InvalidInput` - a value was given for a kind that carries none
    /// * `NotFound` - the row is absent and an endpoint is absent or soft-deleted
    pub fn add_or_reactivate(
        &mut self,
        key: AssociationKey,
        value: Option<&str>,
        editor: &EditorId,
    ) -> Result<LinkOutcome> {
        association::add_or_reactivate(&mut self.conn, key, value, editor)
    }

    /// # Errors
    /// * `InvalidInput` - a value was given for a kind that carries none
    /// * `NotFound` - no such association
    /// * `Conflict` - the association is soft-deleted
    pub fn update_association(
        &mut self,
        key: AssociationKey,
        value: Option<&str>,
        editor: &EditorId,
    ) -> Result<()> {
        association::update_association(&mut self.conn, key, value, editor)
    }

    /// # Errors
    /// * `NotFound` - no such association
    /// * `Conflict` - already soft-deleted
    pub fn mark_delete_association(&mut self, key: AssociationKey, editor: &EditorId) -> Result<()> {
        association::mark_delete_association(&mut self.conn, key, editor)
    }

    /// # Errors
    /// * `NotFound` - no such association
    /// * `Conflict` - the association is still active
    pub fn purge_association(&mut self, key: AssociationKey) -> Result<()> {
        association::purge_association(&mut self.conn, key)
    }

    /// # Errors
    /// * `NotFound` - no such association
    pub fn get_association(&mut self, key: AssociationKey) -> Result<AssociationView> {
        queries::get_association(&mut self.conn, key)
    }

    /// # Errors
    /// * `StoreFailure` - the read failed
    pub fn list_associations(
        &mut self,
        kind: AssociationKind,
        filter: ListFilter,
    ) -> Result<Vec<AssociationView>> {
        queries::list_associations(&mut self.conn, kind, filter)
    }

    /// # Errors
    /// * `NotFound` - no such node
    pub fn list_links_for_node(
        &mut self,
        kind: NodeKind,
        id: i64,
        filter: ListFilter,
    ) -> Result<Vec<AssociationView>> {
        queries::list_links_for_node(&mut self.conn, kind, id, filter)
    }

    // ===== Seeds and commands =====

    /// # Errors
    /// * `Conflict` - the seed was imported before, or a seeded name collides
    pub fn import_seed(
        &mut self,
        seed: &SeedV0,
        source: Option<&str>,
        editor: &EditorId,
    ) -> Result<SeedImportSummary> {
        seed_import::import_seed(&mut self.conn, seed, source, editor)
    }

    /// # Errors
    /// * `Io` - the file cannot be read
    /// * `InvalidInput` - the file is not a valid seed
    /// * `Conflict` - the seed was imported before, or a seeded name collides
    pub fn import_seed_file(&mut self, path: &Path, editor: &EditorId) -> Result<SeedImportSummary> {
        seed_import::import_seed_file(&mut self.conn, path, editor)
    }

    /// Apply an [`EngineCommand`] in its own transaction
    ///
    /// # Errors
    /// Whatever the underlying operation returns.
    pub fn execute(&mut self, cmd: EngineCommand, editor: &EditorId) -> Result<EngineCommandResult> {
        apply_engine_command(cmd, &mut self.conn, editor)
    }
}
