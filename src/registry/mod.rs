//! Declarative form descriptions.
//!
//! A [`FormSpec`] lists fields and their rules as data, typically loaded
//! from JSON, and builds a ready [`Form`]. Every rule that takes only plain
//! parameters has a [`ConstraintSpec`] variant; predicate-based rules
//! (`custom`, a non-default `uploaded_file`) are attached in code.
//!
//! # Example
//!
//! ```rust
//! use formwise::registry::FormSpec;
//!
//! let spec = FormSpec::from_json(
//!     r#"{
//!         "fields": [
//!             {"name": "password", "kind": "password",
//!              "constraints": [{"rule": "required"}, {"rule": "min_length", "length": 8}]},
//!             {"name": "confirm", "kind": "password",
//!              "constraints": [{"rule": "matches", "field": "password"}]}
//!         ]
//!     }"#,
//! )
//! .unwrap();
//!
//! let mut form = spec.build().unwrap();
//! form.assign([("password", "correct horse"), ("confirm", "correct horse")]);
//! assert!(form.is_valid());
//! ```

mod error;

pub use error::SpecError;

use crate::bytes::ByteSize;
use crate::constraints::{
    Constraint, ConstraintKind, FileSizeConstraint, FilterConstraint, HoneyPotConstraint,
    IntRange, MatchesConstraint, MaxLengthConstraint, MimeTypeConstraint, MinLengthConstraint,
    OptionsConstraint, RequiredConstraint,
};
use crate::fields::{Field, FieldKind, SelectOption};
use crate::form::Form;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One rule with its parameters, tagged by `rule`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ConstraintSpec {
    Required,
    MinLength { length: usize },
    MaxLength { length: usize },
    Email,
    Bool,
    Int(IntRange),
    Regexp { pattern: String },
    Options { options: Vec<String> },
    /// Equality with a field declared earlier in the same form.
    Matches { field: String },
    FileSize { max: ByteSize },
    MimeType { accepted: Vec<String> },
    HoneyPot,
}

impl ConstraintSpec {
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Self::Required => ConstraintKind::Required,
            Self::MinLength { .. } => ConstraintKind::MinLength,
            Self::MaxLength { .. } => ConstraintKind::MaxLength,
            Self::Email => ConstraintKind::Email,
            Self::Bool => ConstraintKind::Bool,
            Self::Int(_) => ConstraintKind::Int,
            Self::Regexp { .. } => ConstraintKind::Regexp,
            Self::Options { .. } => ConstraintKind::Options,
            Self::Matches { .. } => ConstraintKind::Matches,
            Self::FileSize { .. } => ConstraintKind::FileSize,
            Self::MimeType { .. } => ConstraintKind::MimeType,
            Self::HoneyPot => ConstraintKind::HoneyPot,
        }
    }

    /// Builds the rule. `declared` resolves `matches` references.
    pub fn build(&self, declared: &Form) -> Result<Arc<dyn Constraint>, SpecError> {
        let constraint: Arc<dyn Constraint> = match self {
            Self::Required => Arc::new(RequiredConstraint::new()),
            Self::MinLength { length } => Arc::new(MinLengthConstraint::new(*length)),
            Self::MaxLength { length } => Arc::new(MaxLengthConstraint::new(*length)),
            Self::Email => Arc::new(FilterConstraint::email()),
            Self::Bool => Arc::new(FilterConstraint::boolean()),
            Self::Int(range) => Arc::new(FilterConstraint::int(*range)),
            Self::Regexp { pattern } => Arc::new(FilterConstraint::regexp(pattern)?),
            Self::Options { options } => Arc::new(OptionsConstraint::new(options.iter().cloned())),
            Self::Matches { field } => {
                let target = declared
                    .field(field)
                    .ok_or_else(|| SpecError::UnknownField(field.clone()))?;
                Arc::new(MatchesConstraint::new(target))
            }
            Self::FileSize { max } => Arc::new(FileSizeConstraint::new(max.clone())?),
            Self::MimeType { accepted } => {
                Arc::new(MimeTypeConstraint::new(accepted.iter().cloned())?)
            }
            Self::HoneyPot => Arc::new(HoneyPotConstraint::new()),
        };
        Ok(constraint)
    }
}

/// A choice given either as a bare value or as a value with a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionSpec {
    Value(String),
    Labelled(SelectOption),
}

impl From<OptionSpec> for SelectOption {
    fn from(option: OptionSpec) -> Self {
        match option {
            OptionSpec::Value(value) => SelectOption::from(value),
            OptionSpec::Labelled(option) => option,
        }
    }
}

/// A field and its rules.
///
/// Implicit rules come first: checkboxes get a boolean filter, choice
/// fields an options rule over their values, and file fields an uploaded
/// file check with the default predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionSpec>,
    #[serde(default)]
    pub constraints: Vec<ConstraintSpec>,
}

impl FieldSpec {
    pub fn build(&self, declared: &Form) -> Result<Field, SpecError> {
        let mut field = match self.kind {
            FieldKind::Checkbox => Field::checkbox(self.name.as_str()),
            FieldKind::File => Field::file(self.name.as_str()),
            kind if kind.has_options() => {
                Field::with_options(self.name.as_str(), kind, self.options.iter().cloned())
            }
            kind => Field::new(self.name.as_str(), kind),
        };

        for constraint in &self.constraints {
            field.add_shared_constraint(constraint.build(declared)?);
        }

        Ok(field)
    }
}

/// A whole form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSpec {
    pub fields: Vec<FieldSpec>,
}

impl FormSpec {
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds the form, fields in declaration order.
    pub fn build(&self) -> Result<Form, SpecError> {
        let mut form = Form::default();

        for spec in &self.fields {
            if form.has_field(&spec.name) {
                return Err(SpecError::DuplicateField(spec.name.clone()));
            }
            let field = spec.build(&form)?;
            form.add_field(field);
        }

        Ok(form)
    }
}
