//! Lifecycle state machine shared by nodes and association rows
//!
//! ```text
//!   Active ──mark_delete──▶ SoftDeleted ──purge──▶ Purged
//!     ▲                         │
//!     └──────mark_undelete──────┘
//! ```
//!
//! Node soft-delete is additionally gated by `guards::blockers`; that
//! check lives in the engine because it needs the store.

use serde::Serialize;

use crate::errors::{CatalogError, Result};

/// Persisted lifecycle state of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Active,
    SoftDeleted,
}

impl LifecycleState {
    pub fn from_deleted(deleted: bool) -> Self {
        if deleted {
            LifecycleState::SoftDeleted
        } else {
            LifecycleState::Active
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    MarkDelete,
    MarkUndelete,
    Purge,
}

/// State after a permitted transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Active,
    SoftDeleted,
    /// Terminal: the row is physically removed
    Purged,
}

/// Decide a transition for the row labelled `entity`
///
/// # Errors
/// * `AlreadyDeleted` - mark_delete from SoftDeleted
/// * `NotDeleted` - mark_undelete or purge from Active
pub fn transition(entity: &str, from: LifecycleState, t: Transition) -> Result<Outcome> {
    match (from, t) {
        (LifecycleState::Active, Transition::MarkDelete) => Ok(Outcome::SoftDeleted),
        (LifecycleState::SoftDeleted, Transition::MarkUndelete) => Ok(Outcome::Active),
        (LifecycleState::SoftDeleted, Transition::Purge) => Ok(Outcome::Purged),
        (LifecycleState::SoftDeleted, Transition::MarkDelete) => {
            Err(CatalogError::AlreadyDeleted {
                entity: entity.to_string(),
            })
        }
        (LifecycleState::Active, Transition::MarkUndelete | Transition::Purge) => {
            Err(CatalogError::NotDeleted {
                entity: entity.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permitted_transitions() {
        assert_eq!(
            transition("plant 1", LifecycleState::Active, Transition::MarkDelete).unwrap(),
            Outcome::SoftDeleted
        );
        assert_eq!(
            transition("plant 1", LifecycleState::SoftDeleted, Transition::MarkUndelete)
                .unwrap(),
            Outcome::Active
        );
        assert_eq!(
            transition("plant 1", LifecycleState::SoftDeleted, Transition::Purge).unwrap(),
            Outcome::Purged
        );
    }

    #[test]
    fn test_rejected_transitions() {
        let err = transition("area 2", LifecycleState::SoftDeleted, Transition::MarkDelete)
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::AlreadyDeleted {
                entity: "area 2".to_string()
            }
        );

        for t in [Transition::MarkUndelete, Transition::Purge] {
            let err = transition("area 2", LifecycleState::Active, t).unwrap_err();
            assert!(matches!(err, CatalogError::NotDeleted { .. }));
        }
    }

    #[test]
    fn test_state_from_flag() {
        assert_eq!(LifecycleState::from_deleted(true), LifecycleState::SoftDeleted);
        assert_eq!(LifecycleState::from_deleted(false), LifecycleState::Active);
    }
}
