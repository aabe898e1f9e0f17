//! Seed parser with validation
//!
//! Checks the schema version, every name, name collisions within a scope
//! and that every model and link reference resolves to a node declared in
//! the same seed.

#![allow(clippy::result_large_err)]

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use assetcat_core::model::{AssociationKind, NodeKind};
use assetcat_core::rules::naming::{normalize_name, validate_name};

use crate::errors::{io_error, seed_validation, Result};
use crate::seed::format_v0::{SeedEntry, SeedV0};

/// Separator between the segments of a node path
pub const PATH_SEPARATOR: char = '/';

/// Comparison key for a node path: every segment normalised
pub fn path_key<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    segments
        .into_iter()
        .map(normalize_name)
        .collect::<Vec<_>>()
        .join("/")
}

/// Parse and validate a seed file
pub fn parse_seed_file(path: &Path) -> Result<SeedV0> {
    let content = fs::read_to_string(path).map_err(|e| io_error("seed_read", e))?;
    parse_seed_str(&content)
}

/// Parse and validate a seed from a string
pub fn parse_seed_str(content: &str) -> Result<SeedV0> {
    let seed: SeedV0 = serde_yaml::from_str(content)
        .map_err(|e| seed_validation(format!("YAML parse error: {}", e)))?;

    validate_seed(&seed)?;
    Ok(seed)
}

/// Declared node paths per kind
#[derive(Default)]
struct Declared(HashMap<NodeKind, HashSet<String>>);

impl Declared {
    /// Register `name` under `scope`, returning the new node's path key
    fn declare(&mut self, kind: NodeKind, scope: Option<&str>, name: &str) -> Result<String> {
        validate_name(kind, name).map_err(|e| seed_validation(e.to_string()))?;
        if name.contains(PATH_SEPARATOR) {
            return Err(seed_validation(format!(
                "{} name '{}' must not contain '{}'",
                kind, name, PATH_SEPARATOR
            )));
        }

        let key = match scope {
            Some(scope) => format!("{}/{}", scope, normalize_name(name)),
            None => normalize_name(name),
        };
        if !self.0.entry(kind).or_default().insert(key.clone()) {
            return Err(seed_validation(format!(
                "Duplicate {} name '{}'",
                kind,
                name.trim()
            )));
        }
        Ok(key)
    }

    fn contains(&self, kind: NodeKind, path: &str) -> bool {
        self.0
            .get(&kind)
            .is_some_and(|paths| paths.contains(&path_key(path.split(PATH_SEPARATOR))))
    }

    fn flat(&mut self, kind: NodeKind, entries: &[SeedEntry]) -> Result<()> {
        for entry in entries {
            self.declare(kind, None, &entry.name)?;
        }
        Ok(())
    }
}

fn validate_seed(seed: &SeedV0) -> Result<()> {
    if seed.schema_version != 0 {
        return Err(seed_validation(format!(
            "Unsupported schema_version: {}. Expected 0",
            seed.schema_version
        )));
    }

    let mut declared = Declared::default();

    for device in &seed.devices {
        let device_key = declared.declare(NodeKind::Device, None, &device.name)?;
        for model in &device.models {
            declared.declare(NodeKind::Model, Some(&device_key), &model.name)?;
        }
    }

    for plant in &seed.plants {
        let plant_key = declared.declare(NodeKind::Plant, None, &plant.name)?;
        for area in &plant.areas {
            let area_key = declared.declare(NodeKind::Area, Some(&plant_key), &area.name)?;
            for space in &area.spaces {
                let space_key = declared.declare(NodeKind::Space, Some(&area_key), &space.name)?;
                for coordinate in &space.coordinates {
                    let coordinate_key =
                        declared.declare(NodeKind::Coordinate, Some(&space_key), &coordinate.name)?;
                    for asset in &coordinate.assets {
                        declared.declare(NodeKind::Asset, Some(&coordinate_key), &asset.name)?;
                        if !declared.contains(NodeKind::Model, &asset.model) {
                            return Err(seed_validation(format!(
                                "Asset '{}' references unknown model '{}'",
                                asset.name.trim(),
                                asset.model
                            )));
                        }
                    }
                }
            }
        }
    }

    declared.flat(NodeKind::Parameter, &seed.parameters)?;
    declared.flat(NodeKind::Category, &seed.categories)?;
    declared.flat(NodeKind::Detail, &seed.details)?;
    declared.flat(NodeKind::Situation, &seed.situations)?;
    declared.flat(NodeKind::Question, &seed.questions)?;
    declared.flat(NodeKind::Communicate, &seed.communicates)?;

    let mut seen_links: HashSet<(AssociationKind, String, String)> = HashSet::new();
    for link in &seed.links {
        for (kind, path) in [(link.kind.left(), &link.left), (link.kind.right(), &link.right)] {
            if !declared.contains(kind, path) {
                return Err(seed_validation(format!(
                    "Link {} references unknown {} '{}'",
                    link.kind, kind, path
                )));
            }
        }
        if link.value.is_some() && !link.kind.carries_value() {
            return Err(seed_validation(format!(
                "Link {} ({}, {}) carries a value but {} links have none",
                link.kind, link.left, link.right, link.kind
            )));
        }
        let key = (
            link.kind,
            path_key(link.left.split(PATH_SEPARATOR)),
            path_key(link.right.split(PATH_SEPARATOR)),
        );
        if !seen_links.insert(key) {
            return Err(seed_validation(format!(
                "Duplicate link {} ({}, {})",
                link.kind, link.left, link.right
            )));
        }
    }

    Ok(())
}
