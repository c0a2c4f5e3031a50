//! The violation taxonomy.

use crate::constraints::error::ConstraintError;
use crate::constraints::{Constraint, ConstraintKind};
use crate::values::Value;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// What a failed check means.
///
/// All kinds share one structure; they differ in how a host should react.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A required value is empty.
    MissingValue,

    /// The value broke a rule.
    InvalidValue,

    /// The input looks tampered with or machine-filled.
    Security,

    /// The environment is configured against the input (e.g. upload limits).
    Configuration,

    /// A transient failure of the environment (e.g. disk write error).
    SystemState,
}

impl ViolationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingValue => "missing_value",
            Self::InvalidValue => "invalid_value",
            Self::Security => "security",
            Self::Configuration => "configuration",
            Self::SystemState => "system_state",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViolationKind {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "missing_value" => Ok(Self::MissingValue),
            "invalid_value" => Ok(Self::InvalidValue),
            "security" => Ok(Self::Security),
            "configuration" => Ok(Self::Configuration),
            "system_state" => Ok(Self::SystemState),
            other => Err(ConstraintError::UnknownViolationKind(other.to_string())),
        }
    }
}

/// Record of one failed constraint check: which rule, on which value.
///
/// `constraint` is the rule instance that failed, so its parameters can be
/// read back with [`rule`](Self::rule). Two violations are equal when kind,
/// rule family and value agree.
#[derive(Debug, Clone)]
pub struct Violation {
    pub kind: ViolationKind,
    pub constraint: Arc<dyn Constraint>,
    pub value: Value,
}

impl Violation {
    pub fn new(kind: ViolationKind, constraint: Arc<dyn Constraint>, value: &Value) -> Self {
        Self {
            kind,
            constraint,
            value: value.clone(),
        }
    }

    /// Family of the rule that failed.
    pub fn constraint_kind(&self) -> ConstraintKind {
        self.constraint.kind()
    }

    /// The failed rule as its concrete type, if it is a `C`.
    pub fn rule<C: Constraint + 'static>(&self) -> Option<&C> {
        let rule: &dyn Constraint = &*self.constraint;
        rule.as_any().downcast_ref::<C>()
    }

    /// Whether `constraint` is the very instance that failed.
    pub fn is_from(&self, constraint: &Arc<dyn Constraint>) -> bool {
        Arc::ptr_eq(&self.constraint, constraint)
    }
}

impl PartialEq for Violation {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.constraint_kind() == other.constraint_kind()
            && self.value == other.value
    }
}

impl Eq for Violation {}

impl Serialize for Violation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Violation", 3)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("constraint", &self.constraint_kind())?;
        state.serialize_field("value", &self.value)?;
        state.end()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} violation of rule `{}` (value: {})",
            self.kind,
            self.constraint_kind(),
            self.value
        )
    }
}

/// A violation together with the name of the field it was recorded on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub violation: Violation,
}
