//! Validation rules and the violations they report.
//!
//! Every rule implements [`Constraint`]: it inspects a [`Value`] and returns
//! the [`ViolationKind`] when the value breaks the rule. The resulting
//! [`Violation`] refers back to the rule instance, so its parameters stay
//! available to whoever renders the failure. Two conventions hold for
//! all built-in rules except `required` and `honey_pot`:
//!
//! - empty values never violate (requiredness is `required`'s business)
//! - values of a variant the rule does not understand never violate (type
//!   enforcement is the field's business)
//!
//! Rules hold no mutable state, so one instance can be shared between many
//! fields and forms through an `Arc<dyn Constraint>`.
//!
//! # Example
//!
//! ```rust
//! use formwise::constraints::{Constraint, MinLengthConstraint, ViolationKind};
//! use formwise::values::Value;
//!
//! let rule = MinLengthConstraint::new(6);
//!
//! assert!(rule.check(&Value::scalar("secret1")).is_none());
//! assert!(rule.check(&Value::scalar("")).is_none());
//!
//! let violation = rule.check(&Value::scalar("abc")).unwrap();
//! assert_eq!(violation.kind, ViolationKind::InvalidValue);
//! assert_eq!(violation.rule::<MinLengthConstraint>().unwrap().min_length(), 6);
//! ```

pub mod basic;
pub mod error;
pub mod filter;
pub mod length;
pub mod matches;
pub mod options;
pub mod upload;
pub mod violations;

pub use basic::{CustomConstraint, HoneyPotConstraint, RequiredConstraint};
pub use error::ConstraintError;
pub use filter::{
    BoolFilter, EmailFilter, FilterConstraint, IntFilter, IntRange, RegexpFilter, ScalarFilter,
};
pub use length::{MaxLengthConstraint, MinLengthConstraint};
pub use matches::MatchesConstraint;
pub use options::OptionsConstraint;
pub use upload::{FileSizeConstraint, MimeTypeConstraint, UploadedFileConstraint};
pub use violations::{FieldViolation, Violation, ViolationKind};

use crate::values::Value;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Identifier of a rule family.
///
/// Used for violation provenance and for removing rules from a field by
/// kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    Required,
    MinLength,
    MaxLength,
    /// A scalar filter outside the built-in families.
    Filter,
    Bool,
    Int,
    Email,
    Regexp,
    Options,
    Matches,
    FileSize,
    MimeType,
    UploadedFile,
    HoneyPot,
    Custom,
}

impl ConstraintKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::MinLength => "min_length",
            Self::MaxLength => "max_length",
            Self::Filter => "filter",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Email => "email",
            Self::Regexp => "regexp",
            Self::Options => "options",
            Self::Matches => "matches",
            Self::FileSize => "file_size",
            Self::MimeType => "mime_type",
            Self::UploadedFile => "uploaded_file",
            Self::HoneyPot => "honey_pot",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Downcasting support for rule objects.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A single validation rule.
pub trait Constraint: AsAny + fmt::Debug + Send + Sync {
    /// The rule family this constraint belongs to.
    fn kind(&self) -> ConstraintKind;

    /// Classifies `value`: the kind of violation it causes, `None` when it
    /// passes.
    ///
    /// Must be deterministic for a given value and never panic on
    /// inapplicable input.
    fn assess(&self, value: &Value) -> Option<ViolationKind>;

    /// Checks `value`, returning a violation that refers to a copy of this
    /// rule.
    ///
    /// Shared rules go through [`check_shared`] so the violation refers to
    /// the attached instance itself.
    fn check(&self, value: &Value) -> Option<Violation>
    where
        Self: Clone + Sized + 'static,
    {
        let kind = self.assess(value)?;
        Some(Violation::new(kind, Arc::new(self.clone()), value))
    }
}

/// Checks `value` against a shared rule.
pub fn check_shared(constraint: &Arc<dyn Constraint>, value: &Value) -> Option<Violation> {
    let kind = constraint.assess(value)?;
    Some(Violation::new(kind, Arc::clone(constraint), value))
}
