use revstore_core::errors::{ExError, ExErrorKind, StoreError};
use thiserror::Error;

/// Result type alias using BridgeError
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors raised while crossing the interpreter boundary
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BridgeError {
    /// A value has no counterpart of the requested type
    #[error("Type conversion failed: expected {expected}, found {found}")]
    TypeConversion {
        expected: &'static str,
        found: &'static str,
    },

    /// Name is not bound in the interpreter or the callable registry
    #[error("Undefined name: {name}")]
    UndefinedName { name: String },

    /// A procedure raised an error while running
    #[error("Procedure {name} failed: {message}")]
    ProcedureFailed { name: String, message: String },

    /// A host function failed on a store operation
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl BridgeError {
    /// Classify this error using the canonical taxonomy
    pub fn kind(&self) -> ExErrorKind {
        match self {
            BridgeError::TypeConversion { .. } => ExErrorKind::TypeConversion,
            BridgeError::UndefinedName { .. } => ExErrorKind::UndefinedName,
            BridgeError::ProcedureFailed { .. } => ExErrorKind::ProcedureFailed,
            BridgeError::Store(err) => err.kind(),
        }
    }
}

/// Conversion from BridgeError to ExError
impl From<BridgeError> for ExError {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::Store(store_err) => store_err.into(),
            other => ExError::new(other.kind()).with_message(other.to_string()),
        }
    }
}
