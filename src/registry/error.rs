//! Form description errors.

use crate::constraints::ConstraintError;
use thiserror::Error;

/// Errors that can occur while loading or building a form description
#[derive(Debug, Error)]
pub enum SpecError {
    /// A `matches` rule names a field that is not declared before it
    #[error("Unknown field {0:?}")]
    UnknownField(String),

    /// Two fields share a name
    #[error("Field {0:?} is declared more than once")]
    DuplicateField(String),

    #[error(transparent)]
    Constraint(#[from] ConstraintError),

    /// The description is not valid JSON or does not fit the schema
    #[error("Invalid form description: {0}")]
    Json(#[from] serde_json::Error),
}
