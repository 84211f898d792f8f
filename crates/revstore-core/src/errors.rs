use std::collections::TryReserveError;

use thiserror::Error;

use crate::model::{Object, ObjectType};

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// surfaced by revstore. Each kind maps to a stable error code that can be
/// used for programmatic error handling, testing, and boundary reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Revision state
    /// Mutation attempted on a finalized revision
    InvalidState,

    // Lookup
    NotFound,

    // Data / structure
    InvalidData,
    InvalidParent,
    InvalidExistingChild,
    InvalidReference,

    // Resources
    OutOfMemory,

    // Interpreter boundary
    TypeConversion,
    UndefinedName,
    ProcedureFailed,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidState => "ERR_INVALID_STATE",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::InvalidData => "ERR_INVALID_DATA",
            ExErrorKind::InvalidParent => "ERR_INVALID_PARENT",
            ExErrorKind::InvalidExistingChild => "ERR_INVALID_EXISTING_CHILD",
            ExErrorKind::InvalidReference => "ERR_INVALID_REFERENCE",
            ExErrorKind::OutOfMemory => "ERR_OUT_OF_MEMORY",
            ExErrorKind::TypeConversion => "ERR_TYPE_CONVERSION",
            ExErrorKind::UndefinedName => "ERR_UNDEFINED_NAME",
            ExErrorKind::ProcedureFailed => "ERR_PROCEDURE_FAILED",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// This error type provides a structured representation of errors with
/// classification fields for programmatic handling and rich context for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    object_id: Option<u64>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            object_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add object context
    pub fn with_object(mut self, object: Object) -> Self {
        self.object_id = Some(object.id());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
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

    /// Get the numeric object identity context, if any
    pub fn object_id(&self) -> Option<u64> {
        self.object_id
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
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
        if let Some(object_id) = self.object_id {
            write!(f, " (object_id: {})", object_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for revision store operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Revision has been finalized and can no longer be changed
    #[error("Revision can only be changed while transient")]
    RevisionNotTransient,

    /// Object does not exist in the revision
    #[error("Object does not exist: {object}")]
    ObjectNotFound { object: Object },

    /// Object to attach to does not exist in the revision
    #[error("Parent object does not exist: {object}")]
    ParentNotFound { object: Object },

    /// Reference object for relocation does not exist in the revision
    #[error("Reference object does not exist: {object}")]
    SuccessorNotFound { object: Object },

    /// Object data failed type-specific validation
    #[error("Invalid {object_type} data: field `{field}` {reason}")]
    InvalidObjectData {
        object_type: ObjectType,
        field: &'static str,
        reason: String,
    },

    /// Attachment would violate the parent/child type rules
    #[error("Invalid parent: {reason}")]
    InvalidParent { reason: String },

    /// Object has attached objects which the new data type cannot carry
    #[error("Object {object} has attached objects; new type must be net or component")]
    InvalidExistingChild { object: Object },

    /// Reference object for relocation is not a sibling under the target parent
    #[error("Reference object {object} is not attached to the target parent")]
    SuccessorNotSibling { object: Object },

    /// Allocation failed
    #[error("Out of memory")]
    OutOfMemory,
}

impl StoreError {
    /// Classify this error using the canonical taxonomy
    pub fn kind(&self) -> ExErrorKind {
        match self {
            StoreError::RevisionNotTransient => ExErrorKind::InvalidState,
            StoreError::ObjectNotFound { .. }
            | StoreError::ParentNotFound { .. }
            | StoreError::SuccessorNotFound { .. } => ExErrorKind::NotFound,
            StoreError::InvalidObjectData { .. } => ExErrorKind::InvalidData,
            StoreError::InvalidParent { .. } => ExErrorKind::InvalidParent,
            StoreError::InvalidExistingChild { .. } => ExErrorKind::InvalidExistingChild,
            StoreError::SuccessorNotSibling { .. } => ExErrorKind::InvalidReference,
            StoreError::OutOfMemory => ExErrorKind::OutOfMemory,
        }
    }
}

/// Conversion from StoreError to ExError
impl From<StoreError> for ExError {
    fn from(err: StoreError) -> Self {
        let ex = ExError::new(err.kind()).with_message(err.to_string());
        match err {
            StoreError::ObjectNotFound { object }
            | StoreError::ParentNotFound { object }
            | StoreError::SuccessorNotFound { object }
            | StoreError::InvalidExistingChild { object }
            | StoreError::SuccessorNotSibling { object } => ex.with_object(object),
            StoreError::RevisionNotTransient
            | StoreError::InvalidObjectData { .. }
            | StoreError::InvalidParent { .. }
            | StoreError::OutOfMemory => ex,
        }
    }
}

/// Fallible reservations report allocation failure instead of aborting
impl From<TryReserveError> for StoreError {
    fn from(_: TryReserveError) -> Self {
        StoreError::OutOfMemory
    }
}
