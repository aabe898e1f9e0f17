use crate::errors::{CatalogError, Result};
use crate::model::NodeKind;

/// Longest accepted node name, in characters
pub const MAX_NAME_LEN: usize = 200;

/// Canonical comparison key for a name: trimmed and case-folded
///
/// Two names collide within a scope exactly when their keys are equal.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Reject names that cannot be stored
///
/// # Errors
/// * `InvalidName` - if the name is blank or longer than `MAX_NAME_LEN`
pub fn validate_name(kind: NodeKind, name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::InvalidName {
            kind,
            reason: "name cannot be empty or whitespace-only".to_string(),
        });
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(CatalogError::InvalidName {
            kind,
            reason: format!("name exceeds {} characters", MAX_NAME_LEN),
        });
    }
    Ok(())
}
