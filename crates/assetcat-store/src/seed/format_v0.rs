//! Seed format v0
//!
//! Nested nodes are declared under their scope parent. Links and asset
//! models refer to nodes by name path, e.g. `North/Boiler House/L1/B1/Pump 7`
//! for an asset or `Pumps/CP-200` for a model.

use assetcat_core::model::AssociationKind;
use serde::{Deserialize, Serialize};

/// Top-level seed file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedV0 {
    /// Must be 0 for this format
    pub schema_version: u32,

    #[serde(default)]
    pub plants: Vec<SeedPlant>,
    #[serde(default)]
    pub devices: Vec<SeedDevice>,
    #[serde(default)]
    pub parameters: Vec<SeedEntry>,
    #[serde(default)]
    pub categories: Vec<SeedEntry>,
    #[serde(default)]
    pub details: Vec<SeedEntry>,
    #[serde(default)]
    pub situations: Vec<SeedEntry>,
    #[serde(default)]
    pub questions: Vec<SeedEntry>,
    #[serde(default)]
    pub communicates: Vec<SeedEntry>,

    #[serde(default)]
    pub links: Vec<SeedLink>,
}

/// A node without children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedPlant {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub areas: Vec<SeedArea>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedArea {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub spaces: Vec<SeedSpace>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedSpace {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub coordinates: Vec<SeedCoordinate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedCoordinate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub assets: Vec<SeedAsset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedAsset {
    pub name: String,
    #[serde(default)]
    pub description: String,

    /// `Device/Model` path of the asset's model
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedDevice {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub models: Vec<SeedEntry>,
}

/// An association between two seeded nodes, addressed by path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedLink {
    pub kind: AssociationKind,
    pub left: String,
    pub right: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl SeedV0 {
    /// Number of nodes the seed declares
    pub fn node_count(&self) -> usize {
        let location: usize = self
            .plants
            .iter()
            .map(|p| {
                1 + p
                    .areas
                    .iter()
                    .map(|a| {
                        1 + a
                            .spaces
                            .iter()
                            .map(|s| {
                                1 + s
                                    .coordinates
                                    .iter()
                                    .map(|c| 1 + c.assets.len())
                                    .sum::<usize>()
                            })
                            .sum::<usize>()
                    })
                    .sum::<usize>()
            })
            .sum();
        let devices: usize = self.devices.iter().map(|d| 1 + d.models.len()).sum();
        location
            + devices
            + self.parameters.len()
            + self.categories.len()
            + self.details.len()
            + self.situations.len()
            + self.questions.len()
            + self.communicates.len()
    }
}
