//! Cross-field equality ("repeat your password").

use crate::constraints::{Constraint, ConstraintKind, ViolationKind};
use crate::fields::{Field, ValueSlot};
use crate::values::Value;
use parking_lot::RwLock;
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::warn;

/// Requires a value equal to another field's current value.
///
/// The rule holds a non-owning handle to the referenced field's value. The
/// referenced field must outlive the rule and take part in the same
/// validation cycle; once it is dropped, every non-empty value violates.
///
/// A violation is reported when the referenced field has no value, holds a
/// different variant, or holds different content. Empty values never
/// violate.
///
/// # Example
///
/// ```rust
/// use formwise::constraints::{Constraint, MatchesConstraint};
/// use formwise::fields::Field;
/// use formwise::values::Value;
///
/// let mut password = Field::password("password");
/// password.assign("secret1").unwrap();
///
/// let rule = MatchesConstraint::new(&password);
/// assert!(rule.check(&Value::scalar("secret1")).is_none());
/// assert!(rule.check(&Value::scalar("secret2")).is_some());
/// ```
#[derive(Clone)]
pub struct MatchesConstraint {
    field_name: String,
    target: Weak<RwLock<Option<Value>>>,
}

impl MatchesConstraint {
    pub fn new(field: &Field) -> Self {
        let slot: &ValueSlot = field.value_slot();
        Self {
            field_name: field.name().to_string(),
            target: Arc::downgrade(slot),
        }
    }

    /// Name of the referenced field.
    pub fn field_name(&self) -> &str {
        &self.field_name
    }
}

impl fmt::Debug for MatchesConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchesConstraint")
            .field("field_name", &self.field_name)
            .finish_non_exhaustive()
    }
}

impl Constraint for MatchesConstraint {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Matches
    }

    fn assess(&self, value: &Value) -> Option<ViolationKind> {
        if value.is_empty() {
            return None;
        }

        let Some(slot) = self.target.upgrade() else {
            warn!(field = %self.field_name, "referenced field no longer exists");
            return Some(ViolationKind::InvalidValue);
        };

        let matched = matches!(&*slot.read(), Some(current) if current == value);
        (!matched).then_some(ViolationKind::InvalidValue)
    }
}
