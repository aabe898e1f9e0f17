use assetcat_core_types::RequestId;
use thiserror::Error;

use crate::model::{AssociationKind, NodeKind};

/// Result type alias using CatalogError
pub type Result<T> = std::result::Result<T, CatalogError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers (an HTTP layer, the
/// CLI, tests) can match on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Malformed request: blank name, missing required parent, bad seed
    InvalidInput,
    /// Referenced entity, parent or association is absent (or not active)
    NotFound,
    /// Name collision or illegal lifecycle transition
    Conflict,
    /// Persistence failure; the transaction has been rolled back
    StoreFailure,
    Serialization,
    Io,
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Conflict => "ERR_CONFLICT",
            ExErrorKind::StoreFailure => "ERR_STORE_FAILURE",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Classification fields for programmatic handling plus context for
/// debugging. This is the error type returned across the engine boundary.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_kind: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    message: String,
    blocking: Option<Vec<String>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_kind: None,
            entity_id: None,
            request_id: None,
            message: String::new(),
            blocking: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity kind context (`plant`, `asset_category`, ...)
    pub fn with_entity_kind(mut self, kind: impl Into<String>) -> Self {
        self.entity_kind = Some(kind.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add the relations that blocked a soft delete
    pub fn with_blocking(mut self, blocking: Vec<String>) -> Self {
        self.blocking = Some(blocking);
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity kind context, if any
    pub fn entity_kind(&self) -> Option<&str> {
        self.entity_kind.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Relation labels that blocked a soft delete (e.g. `area (2 active)`)
    pub fn blocking(&self) -> Option<&[String]> {
        self.blocking.as_deref()
    }

    /// Whether the caller may treat this as an expected business outcome
    pub fn is_business_outcome(&self) -> bool {
        matches!(
            self.kind,
            ExErrorKind::NotFound | ExErrorKind::Conflict | ExErrorKind::InvalidInput
        )
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        match (&self.entity_kind, &self.entity_id) {
            (Some(kind), Some(id)) => write!(f, " ({} {})", kind, id)?,
            (Some(kind), None) => write!(f, " ({})", kind)?,
            (None, Some(id)) => write!(f, " (entity_id: {})", id)?,
            (None, None) => {}
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for catalog operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    // ===== Validation =====
    #[error("Invalid {kind} name: {reason}")]
    InvalidName { kind: NodeKind, reason: String },

    #[error("A {kind} requires a {parent} reference")]
    MissingParent { kind: NodeKind, parent: NodeKind },

    #[error("A {kind} takes no {parent} reference")]
    UnexpectedParent { kind: NodeKind, parent: &'static str },

    #[error("{kind} links carry no value")]
    ValueNotAllowed { kind: AssociationKind },

    #[error("Invalid seed: {reason}")]
    InvalidSeed { reason: String },

    // ===== Lookup =====
    #[error("{kind} {id} not found")]
    NodeNotFound { kind: NodeKind, id: i64 },

    /// A referenced parent or association endpoint is absent or soft-deleted
    #[error("Referenced {kind} {id} does not exist or is deleted")]
    ReferenceNotFound { kind: NodeKind, id: i64 },

    #[error("{kind} link ({left_id}, {right_id}) not found")]
    AssociationNotFound {
        kind: AssociationKind,
        left_id: i64,
        right_id: i64,
    },

    // ===== Conflicts =====
    #[error("An active {kind} named '{name}' already exists in this scope")]
    NameTaken { kind: NodeKind, name: String },

    #[error("{entity} is already deleted")]
    AlreadyDeleted { entity: String },

    #[error("{entity} is not deleted")]
    NotDeleted { entity: String },

    /// The operation requires an active row but the row is soft-deleted
    #[error("{entity} is deleted; undelete it first")]
    EntityDeleted { entity: String },

    #[error("{kind} {id} has active children: {}", .blocking.join(", "))]
    ActiveDependents {
        kind: NodeKind,
        id: i64,
        blocking: Vec<String>,
    },

    #[error("{kind} {id} cannot be undeleted while its {parent} {parent_id} is deleted")]
    ParentDeleted {
        kind: NodeKind,
        id: i64,
        parent: NodeKind,
        parent_id: i64,
    },

    #[error("Asset {asset_id} is already assigned to model {model_id}")]
    AlreadyAssigned { asset_id: i64, model_id: i64 },

    #[error("Seed {digest} has already been imported")]
    SeedAlreadyImported { digest: String },
}

impl CatalogError {
    /// The error kind this domain error maps to
    pub fn kind(&self) -> ExErrorKind {
        match self {
            CatalogError::InvalidName { .. }
            | CatalogError::MissingParent { .. }
            | CatalogError::UnexpectedParent { .. }
            | CatalogError::ValueNotAllowed { .. }
            | CatalogError::InvalidSeed { .. } => ExErrorKind::InvalidInput,

            CatalogError::NodeNotFound { .. }
            | CatalogError::ReferenceNotFound { .. }
            | CatalogError::AssociationNotFound { .. } => ExErrorKind::NotFound,

            CatalogError::NameTaken { .. }
            | CatalogError::AlreadyDeleted { .. }
            | CatalogError::NotDeleted { .. }
            | CatalogError::EntityDeleted { .. }
            | CatalogError::ActiveDependents { .. }
            | CatalogError::ParentDeleted { .. }
            | CatalogError::AlreadyAssigned { .. }
            | CatalogError::SeedAlreadyImported { .. } => ExErrorKind::Conflict,
        }
    }
}

/// Conversion from CatalogError to ExError
///
/// Domain code raises `CatalogError`; the engine boundary speaks `ExError`.
impl From<CatalogError> for ExError {
    fn from(err: CatalogError) -> Self {
        let base = ExError::new(err.kind()).with_message(err.to_string());
        match err {
            CatalogError::InvalidName { kind, .. }
            | CatalogError::MissingParent { kind, .. }
            | CatalogError::UnexpectedParent { kind, .. } => base.with_entity_kind(kind.as_str()),
            CatalogError::ValueNotAllowed { kind } => base.with_entity_kind(kind.as_str()),
            CatalogError::NodeNotFound { kind, id }
            | CatalogError::ReferenceNotFound { kind, id }
            | CatalogError::ParentDeleted { kind, id, .. } => base
                .with_entity_kind(kind.as_str())
                .with_entity_id(id.to_string()),
            CatalogError::AssociationNotFound {
                kind,
                left_id,
                right_id,
            } => base
                .with_entity_kind(kind.as_str())
                .with_entity_id(format!("{}:{}", left_id, right_id)),
            CatalogError::NameTaken { kind, .. } => base.with_entity_kind(kind.as_str()),
            CatalogError::ActiveDependents { kind, id, blocking } => base
                .with_entity_kind(kind.as_str())
                .with_entity_id(id.to_string())
                .with_blocking(blocking),
            CatalogError::AlreadyAssigned { asset_id, .. } => base
                .with_entity_kind(NodeKind::Asset.as_str())
                .with_entity_id(asset_id.to_string()),
            CatalogError::InvalidSeed { .. }
            | CatalogError::AlreadyDeleted { .. }
            | CatalogError::NotDeleted { .. }
            | CatalogError::EntityDeleted { .. }
            | CatalogError::SeedAlreadyImported { .. } => base,
        }
    }
}

impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        ExError::new(ExErrorKind::Serialization).with_message(err.to_string())
    }
}
