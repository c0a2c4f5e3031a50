//! Forms: named collections of fields validated together.
//!
//! Unlike a single field, a form never stops early. Every field is checked
//! and every failing field's violation is kept under the field's name.

use crate::constraints::{FieldViolation, Violation};
use crate::fields::Field;
use crate::values::PlainValue;
use indexmap::IndexMap;
use std::collections::HashMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::{debug, trace};

/// An ordered set of uniquely named fields.
///
/// # Example
///
/// ```rust
/// use formwise::constraints::ViolationKind;
/// use formwise::fields::Field;
/// use formwise::form::Form;
/// use formwise::values::PlainValue;
///
/// let mut form = Form::new([
///     Field::text("username").required().min_length(3),
///     Field::checkbox("remember_me"),
/// ]);
///
/// form.assign([("username", "al")]);
/// assert!(!form.is_valid());
/// assert!(form.has_violation("username"));
/// assert!(!form.has_violation("remember_me"));
///
/// form.assign(Vec::<(String, PlainValue)>::new());
/// assert!(!form.is_valid());
/// assert_eq!(
///     form.violation("username").unwrap().kind,
///     ViolationKind::MissingValue
/// );
/// ```
#[derive(Debug, Default)]
pub struct Form {
    fields: IndexMap<String, Field>,
    violations: IndexMap<String, Violation>,
}

impl Form {
    /// Create a form from `fields`; a later field replaces an earlier
    /// field of the same name.
    pub fn new(fields: impl IntoIterator<Item = Field>) -> Self {
        let mut form = Self::default();
        for field in fields {
            form.set_field(field);
        }
        form
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.get_mut(name)
    }

    /// Adds `field`, replacing a same-named field in place.
    ///
    /// Returns the replaced field. `matches` rules that referenced it stop
    /// matching anything once it is dropped.
    pub fn set_field(&mut self, field: Field) -> Option<Field> {
        self.fields.insert(field.name().to_string(), field)
    }

    pub fn add_field(&mut self, field: Field) -> Option<Field> {
        self.set_field(field)
    }

    /// Removes a field and its recorded violation, keeping the order of the
    /// remaining fields.
    pub fn remove_field(&mut self, name: &str) -> Option<Field> {
        self.violations.shift_remove(name);
        self.fields.shift_remove(name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Assigns raw input to every field.
    ///
    /// Fields missing from `input` receive their empty default, so after this
    /// call no field is unset. Keys naming no field are ignored.
    pub fn assign<I, K, V>(&mut self, input: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<PlainValue>,
    {
        let mut input: HashMap<String, PlainValue> = input
            .into_iter()
            .map(|(name, plain)| (name.into(), plain.into()))
            .collect();

        for (name, field) in &mut self.fields {
            match input.remove(name) {
                Some(plain) => field.assign_plain(plain),
                None => field.assign_plain(field.default_value().plain()),
            };
        }

        for name in input.keys() {
            trace!(field = %name, "ignoring input for unknown field");
        }

        self
    }

    /// Validates every field and records the violations by field name.
    ///
    /// Returns `true` when no field failed.
    pub fn is_valid(&mut self) -> bool {
        self.violations.clear();

        for (name, field) in &mut self.fields {
            if field.is_valid() {
                continue;
            }
            if let Some(violation) = field.violation() {
                self.violations.insert(name.clone(), violation.clone());
            }
        }

        debug!(
            fields = self.fields.len(),
            violations = self.violations.len(),
            "form validated"
        );

        self.violations.is_empty()
    }

    /// Validates every field, accumulating all failing fields.
    pub fn validate(&mut self) -> Validation<(), NonEmptyVec<FieldViolation>> {
        self.is_valid();

        let checks: Vec<Validation<(), NonEmptyVec<FieldViolation>>> = self
            .fields
            .keys()
            .map(|name| match self.violations.get(name) {
                Some(violation) => Validation::fail(FieldViolation {
                    field: name.clone(),
                    violation: violation.clone(),
                }),
                None => Validation::success(()),
            })
            .collect();

        Validation::all_vec(checks).map(|_| ())
    }

    /// Violations recorded by the last [`is_valid`](Self::is_valid) run, in
    /// field order.
    pub fn violations(&self) -> &IndexMap<String, Violation> {
        &self.violations
    }

    pub fn violation(&self, name: &str) -> Option<&Violation> {
        self.violations.get(name)
    }

    pub fn has_violation(&self, name: &str) -> bool {
        self.violations.contains_key(name)
    }

    /// Unsets every field and clears the violations.
    pub fn reset(&mut self) -> &mut Self {
        for field in self.fields.values_mut() {
            field.reset();
        }
        self.violations.clear();
        self
    }

    /// Plain value of every field, by name. Unset fields report their empty
    /// default.
    pub fn values(&self) -> IndexMap<String, PlainValue> {
        self.fields
            .iter()
            .map(|(name, field)| (name.clone(), field.plain()))
            .collect()
    }
}
