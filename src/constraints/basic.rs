//! Rules that apply to every value variant.

use crate::constraints::{Constraint, ConstraintKind, ViolationKind};
use crate::values::Value;
use std::fmt;
use std::sync::Arc;

/// Type alias for custom value predicates.
pub type ValuePredicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Rejects empty values with a [`ViolationKind::MissingValue`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredConstraint;

impl RequiredConstraint {
    pub fn new() -> Self {
        Self
    }
}

impl Constraint for RequiredConstraint {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Required
    }

    fn assess(&self, value: &Value) -> Option<ViolationKind> {
        value
            .is_empty()
            .then_some(ViolationKind::MissingValue)
    }
}

/// A trap field that humans leave blank.
///
/// Any content is reported as a [`ViolationKind::Security`] violation.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoneyPotConstraint;

impl HoneyPotConstraint {
    pub fn new() -> Self {
        Self
    }
}

impl Constraint for HoneyPotConstraint {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::HoneyPot
    }

    fn assess(&self, value: &Value) -> Option<ViolationKind> {
        (!value.is_empty()).then_some(ViolationKind::Security)
    }
}

/// Wraps a caller-supplied predicate.
///
/// The predicate returns `true` for acceptable values. Empty values are never
/// passed to it.
///
/// # Example
///
/// ```rust
/// use formwise::constraints::{Constraint, CustomConstraint, ViolationKind};
/// use formwise::values::Value;
///
/// let even = CustomConstraint::new(|value: &Value| {
///     value
///         .as_scalar()
///         .and_then(|s| s.parse::<i64>().ok())
///         .map_or(false, |n| n % 2 == 0)
/// });
///
/// assert!(even.check(&Value::scalar("4")).is_none());
/// assert_eq!(
///     even.check(&Value::scalar("3")).unwrap().kind,
///     ViolationKind::InvalidValue
/// );
/// ```
#[derive(Clone)]
pub struct CustomConstraint {
    predicate: ValuePredicate,
    violation_kind: ViolationKind,
}

impl CustomConstraint {
    /// Create a rule reporting [`ViolationKind::InvalidValue`] on failure.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::with_kind(predicate, ViolationKind::InvalidValue)
    }

    /// Create a rule reporting `violation_kind` on failure.
    pub fn with_kind<F>(predicate: F, violation_kind: ViolationKind) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            violation_kind,
        }
    }

    pub fn violation_kind(&self) -> ViolationKind {
        self.violation_kind
    }
}

impl fmt::Debug for CustomConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomConstraint")
            .field("violation_kind", &self.violation_kind)
            .finish_non_exhaustive()
    }
}

impl Constraint for CustomConstraint {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Custom
    }

    fn assess(&self, value: &Value) -> Option<ViolationKind> {
        if value.is_empty() || (self.predicate)(value) {
            return None;
        }
        Some(self.violation_kind)
    }
}
