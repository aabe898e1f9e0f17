//! Seed digest canonicalization
//!
//! Two seeds that declare the same nodes and links digest identically,
//! whatever their YAML layout or declaration order.

#![allow(clippy::result_large_err)]

use sha2::{Digest, Sha256};

use assetcat_core::rules::naming::normalize_name;

use crate::errors::Result;
use crate::seed::format_v0::{SeedEntry, SeedV0};
use crate::seed::parser::{path_key, PATH_SEPARATOR};

fn by_name<T>(items: &mut [T], name: impl Fn(&T) -> &str) {
    items.sort_by_key(|item| normalize_name(name(item)));
}

fn sort_entries(entries: &mut [SeedEntry]) {
    by_name(entries, |e| e.name.as_str());
}

/// Deterministically ordered copy of a seed
fn canonicalize_seed(seed: &SeedV0) -> SeedV0 {
    let mut seed = seed.clone();

    by_name(&mut seed.plants, |p| p.name.as_str());
    for plant in &mut seed.plants {
        by_name(&mut plant.areas, |a| a.name.as_str());
        for area in &mut plant.areas {
            by_name(&mut area.spaces, |s| s.name.as_str());
            for space in &mut area.spaces {
                by_name(&mut space.coordinates, |c| c.name.as_str());
                for coordinate in &mut space.coordinates {
                    by_name(&mut coordinate.assets, |a| a.name.as_str());
                    for asset in &mut coordinate.assets {
                        asset.model = path_key(asset.model.split(PATH_SEPARATOR));
                    }
                }
            }
        }
    }

    by_name(&mut seed.devices, |d| d.name.as_str());
    for device in &mut seed.devices {
        sort_entries(&mut device.models);
    }

    for entries in [
        &mut seed.parameters,
        &mut seed.categories,
        &mut seed.details,
        &mut seed.situations,
        &mut seed.questions,
        &mut seed.communicates,
    ] {
        sort_entries(entries);
    }

    for link in &mut seed.links {
        link.left = path_key(link.left.split(PATH_SEPARATOR));
        link.right = path_key(link.right.split(PATH_SEPARATOR));
    }
    seed.links
        .sort_by(|a, b| (a.kind, &a.left, &a.right).cmp(&(b.kind, &b.left, &b.right)));

    seed
}

/// SHA-256 over the canonical JSON of the seed, hex encoded
pub fn compute_seed_digest(seed: &SeedV0) -> Result<String> {
    let json = serde_json::to_string(&canonicalize_seed(seed))?;
    Ok(hex::encode(Sha256::digest(json.as_bytes())))
}
