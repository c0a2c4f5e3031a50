//! Allowed-option sets for single and multiple choice fields.

use crate::constraints::{Constraint, ConstraintKind, ViolationKind};
use crate::values::Value;

/// Restricts values to a fixed set of options.
///
/// A scalar must be one of the options. A list must not contain anything
/// outside the options (subset semantics; empty elements are not exempt).
/// An empty option set accepts everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionsConstraint {
    options: Vec<String>,
}

impl OptionsConstraint {
    pub fn new<I, T>(options: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    fn allows(&self, candidate: &str) -> bool {
        self.options.iter().any(|option| option == candidate)
    }
}

impl Constraint for OptionsConstraint {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Options
    }

    fn assess(&self, value: &Value) -> Option<ViolationKind> {
        if self.options.is_empty() || value.is_empty() {
            return None;
        }

        let allowed = match value {
            Value::Scalar(text) => self.allows(text),
            Value::List(items) => items.iter().all(|item| self.allows(item)),
            Value::Upload(_) => true,
        };
        (!allowed).then_some(ViolationKind::InvalidValue)
    }
}
