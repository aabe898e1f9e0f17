//! Seed import
//!
//! A seed is applied in one transaction through the same create and
//! add-or-reactivate steps as interactive edits, so every catalog rule
//! holds for seeded data too. A seed whose digest was already imported is
//! refused.

#![allow(clippy::result_large_err)]

use std::collections::HashMap;
use std::path::Path;

use assetcat_core::errors::{CatalogError, ExError, ExErrorKind};
use assetcat_core::model::{AssociationKey, NodeDraft, NodeKind};
use assetcat_core_types::EditorId;
use assetcat_store::errors::Result;
use assetcat_store::repo::SeedRepo;
use assetcat_store::seed::{
    compute_seed_digest, parse_seed_file, path_key, SeedEntry, SeedV0, PATH_SEPARATOR,
};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::Serialize;

use crate::commands::association::add_or_reactivate_in;
use crate::commands::lifecycle::create_node_in;
use crate::commands::tx;

/// Summary of a completed import
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedImportSummary {
    pub import_id: i64,
    pub digest: String,
    pub node_count: usize,
    pub link_count: usize,
}

/// Ids of created nodes by kind and normalised path
struct Created {
    ids: HashMap<(NodeKind, String), i64>,
    editor: EditorId,
    now: DateTime<Utc>,
}

impl Created {
    fn create(
        &mut self,
        conn: &Connection,
        kind: NodeKind,
        scope: Option<(&str, i64)>,
        name: &str,
        description: &str,
        model_id: Option<i64>,
    ) -> Result<(String, i64)> {
        let mut draft = NodeDraft::named(name).with_description(description);
        draft.parent_id = scope.map(|(_, id)| id);
        draft.model_id = model_id;

        let id = create_node_in(conn, kind, &draft, &self.editor, self.now)?;
        let key = match scope {
            Some((scope_key, _)) => format!("{}/{}", scope_key, path_key([name])),
            None => path_key([name]),
        };
        self.ids.insert((kind, key.clone()), id);
        Ok((key, id))
    }

    fn flat(&mut self, conn: &Connection, kind: NodeKind, entries: &[SeedEntry]) -> Result<()> {
        for entry in entries {
            self.create(conn, kind, None, &entry.name, &entry.description, None)?;
        }
        Ok(())
    }

    fn resolve(&self, kind: NodeKind, path: &str) -> Result<i64> {
        let key = path_key(path.split(PATH_SEPARATOR));
        self.ids.get(&(kind, key)).copied().ok_or_else(|| {
            ExError::new(ExErrorKind::Internal)
                .with_entity_kind(kind.as_str())
                .with_message(format!("seed path '{}' did not resolve", path))
        })
    }
}

fn import_seed_in(
    conn: &Connection,
    seed: &SeedV0,
    source: Option<&str>,
    editor: &EditorId,
) -> Result<SeedImportSummary> {
    let digest = compute_seed_digest(seed)?;
    if SeedRepo::find_by_digest(conn, &digest)?.is_some() {
        return Err(CatalogError::SeedAlreadyImported { digest }.into());
    }

    let mut created = Created {
        ids: HashMap::new(),
        editor: editor.clone(),
        now: Utc::now(),
    };

    for device in &seed.devices {
        let (device_key, device_id) = created.create(
            conn,
            NodeKind::Device,
            None,
            &device.name,
            &device.description,
            None,
        )?;
        for model in &device.models {
            created.create(
                conn,
                NodeKind::Model,
                Some((device_key.as_str(), device_id)),
                &model.name,
                &model.description,
                None,
            )?;
        }
    }

    for plant in &seed.plants {
        let (plant_key, plant_id) =
            created.create(conn, NodeKind::Plant, None, &plant.name, &plant.description, None)?;
        for area in &plant.areas {
            let (area_key, area_id) = created.create(
                conn,
                NodeKind::Area,
                Some((plant_key.as_str(), plant_id)),
                &area.name,
                &area.description,
                None,
            )?;
            for space in &area.spaces {
                let (space_key, space_id) = created.create(
                    conn,
                    NodeKind::Space,
                    Some((area_key.as_str(), area_id)),
                    &space.name,
                    &space.description,
                    None,
                )?;
                for coordinate in &space.coordinates {
                    let (coordinate_key, coordinate_id) = created.create(
                        conn,
                        NodeKind::Coordinate,
                        Some((space_key.as_str(), space_id)),
                        &coordinate.name,
                        &coordinate.description,
                        None,
                    )?;
                    for asset in &coordinate.assets {
                        let model_id = created.resolve(NodeKind::Model, &asset.model)?;
                        created.create(
                            conn,
                            NodeKind::Asset,
                            Some((coordinate_key.as_str(), coordinate_id)),
                            &asset.name,
                            &asset.description,
                            Some(model_id),
                        )?;
                    }
                }
            }
        }
    }

    created.flat(conn, NodeKind::Parameter, &seed.parameters)?;
    created.flat(conn, NodeKind::Category, &seed.categories)?;
    created.flat(conn, NodeKind::Detail, &seed.details)?;
    created.flat(conn, NodeKind::Situation, &seed.situations)?;
    created.flat(conn, NodeKind::Question, &seed.questions)?;
    created.flat(conn, NodeKind::Communicate, &seed.communicates)?;

    for link in &seed.links {
        let key = AssociationKey::new(
            link.kind,
            created.resolve(link.kind.left(), &link.left)?,
            created.resolve(link.kind.right(), &link.right)?,
        );
        add_or_reactivate_in(conn, key, link.value.as_deref(), editor, created.now)?;
    }

    let node_count = created.ids.len();
    let link_count = seed.links.len();
    let import_id = SeedRepo::record_import(
        conn,
        &digest,
        source,
        node_count as i64,
        link_count as i64,
        editor.as_str(),
        created.now,
    )?;

    tracing::debug!(import_id, node_count, link_count, "seed applied");
    Ok(SeedImportSummary {
        import_id,
        digest,
        node_count,
        link_count,
    })
}

/// Apply a parsed seed
///
/// # Errors
/// * `Conflict` - the seed was imported before, or a seeded name collides
///   with an existing active node
pub fn import_seed(
    conn: &mut Connection,
    seed: &SeedV0,
    source: Option<&str>,
    editor: &EditorId,
) -> Result<SeedImportSummary> {
    tx::write(conn, "seed_import", |tx| {
        import_seed_in(tx, seed, source, editor)
    })
}

/// Parse, validate and apply a seed file
///
/// # Errors
/// * `Io` - the file cannot be read
/// * `InvalidInput` - the file is not a valid seed
/// * `Conflict` - see [`import_seed`]
pub fn import_seed_file(
    conn: &mut Connection,
    path: &Path,
    editor: &EditorId,
) -> Result<SeedImportSummary> {
    let seed = parse_seed_file(path)?;
    let source = path.display().to_string();
    import_seed(conn, &seed, Some(&source), editor)
}
