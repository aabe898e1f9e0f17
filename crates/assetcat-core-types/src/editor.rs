//! Identity of the user performing a mutation
//!
//! The identity layer sits outside the engine; it hands the engine an
//! opaque user id which ends up in the `editor_id` audit column.

use serde::{Deserialize, Serialize};

/// Opaque id of the acting user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditorId(String);

impl EditorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EditorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EditorId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
