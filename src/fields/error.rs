//! Field errors.

use crate::values::ValueKind;
use thiserror::Error;

/// Errors raised by misuse of a field.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("Field {field:?} expects {expected} values, got {found}")]
    TypeMismatch {
        field: String,
        expected: ValueKind,
        found: ValueKind,
    },
}
