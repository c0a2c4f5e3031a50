//! Construction errors for constraints.

use thiserror::Error;

/// Errors raised when a constraint is built with out-of-domain parameters.
///
/// These are programming-contract failures, distinct from the
/// [`Violation`](super::Violation)s a constraint reports while checking.
#[derive(Debug, Error)]
pub enum ConstraintError {
    #[error("Expected a byte count or shorthand like \"2M\", got {0:?}")]
    InvalidByteSize(String),

    #[error("Invalid regular expression {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Unknown violation kind {0:?}")]
    UnknownViolationKind(String),

    #[error("Accepted MIME type must be \"type\" or \"type/subtype\", got {0:?}")]
    InvalidMimeType(String),
}
