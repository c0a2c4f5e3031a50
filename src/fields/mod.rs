//! Named input slots with ordered validation rules.
//!
//! A [`Field`] holds at most one [`Value`] and an ordered list of
//! constraints. Validation walks the constraints in declaration order and
//! stops at the first violation; a field without a value is always valid.
//!
//! Per field, one validation cycle moves through these states:
//!
//! ```text
//! NoValue --assign--> HasValue --is_valid (fails)--> HasValue + Violation
//!    ^                   ^                                  |
//!    |                   +------ is_valid (passes) ---------+
//!    +----------------------------- reset ------------------+
//! ```
//!
//! # Example
//!
//! ```rust
//! use formwise::constraints::{ConstraintKind, ViolationKind};
//! use formwise::fields::Field;
//!
//! let mut username = Field::text("username").required().min_length(6);
//! assert!(username.is_valid()); // unset fields are valid
//!
//! username.assign("").unwrap();
//! assert!(!username.is_valid());
//! assert_eq!(username.violation().unwrap().kind, ViolationKind::MissingValue);
//!
//! username.assign("wumbo").unwrap();
//! assert!(!username.is_valid());
//! assert_eq!(username.violation().unwrap().constraint_kind(), ConstraintKind::MinLength);
//! ```

mod builder;
mod error;
mod kind;

pub use error::FieldError;
pub use kind::{FieldKind, SelectOption};

use crate::constraints::{
    check_shared, BoolFilter, Constraint, ConstraintKind, FilterConstraint, OptionsConstraint,
    UploadedFileConstraint, Violation,
};
use crate::values::{PlainValue, UploadDescriptor, UploadErrorCode, Value, ValueKind};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Shared storage for a field's current value.
///
/// Cross-field rules keep a `Weak` handle to it.
pub(crate) type ValueSlot = Arc<RwLock<Option<Value>>>;

/// What can be assigned to a field: a typed value, or plain input to coerce.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    Value(Value),
    Plain(PlainValue),
}

impl From<Value> for FieldInput {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<PlainValue> for FieldInput {
    fn from(plain: PlainValue) -> Self {
        Self::Plain(plain)
    }
}

impl From<&str> for FieldInput {
    fn from(text: &str) -> Self {
        Self::Plain(PlainValue::from(text))
    }
}

impl From<String> for FieldInput {
    fn from(text: String) -> Self {
        Self::Plain(PlainValue::from(text))
    }
}

impl From<Vec<String>> for FieldInput {
    fn from(items: Vec<String>) -> Self {
        Self::Plain(PlainValue::from(items))
    }
}

impl From<Vec<&str>> for FieldInput {
    fn from(items: Vec<&str>) -> Self {
        Self::Plain(PlainValue::from(items))
    }
}

impl From<UploadDescriptor> for FieldInput {
    fn from(descriptor: UploadDescriptor) -> Self {
        Self::Plain(PlainValue::from(descriptor))
    }
}

/// A named input slot.
pub struct Field {
    name: String,
    kind: FieldKind,
    options: Vec<SelectOption>,
    value: ValueSlot,
    constraints: Vec<Arc<dyn Constraint>>,
    violation: Option<Violation>,
}

impl Field {
    /// Create a field of `kind` without implicit rules or options.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            options: Vec::new(),
            value: Arc::new(RwLock::new(None)),
            constraints: Vec::new(),
            violation: None,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn password(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Password)
    }

    /// A checkbox; its value must be a boolean token.
    pub fn checkbox(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Checkbox).with_constraint(FilterConstraint::boolean())
    }

    /// Single choice among `options` (values double as labels).
    pub fn radio<I, T>(name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let options = options
            .into_iter()
            .map(|value| SelectOption::from(value.into()));
        Self::with_options(name, FieldKind::Radio, options)
    }

    /// Single choice among labelled `options`.
    pub fn select<I, T>(name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<SelectOption>,
    {
        Self::with_options(name, FieldKind::Select, options)
    }

    /// Any subset of labelled `options`.
    pub fn multi_select<I, T>(name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<SelectOption>,
    {
        Self::with_options(name, FieldKind::MultiSelect, options)
    }

    /// A file upload checked with the default uploaded-file predicate.
    pub fn file(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::File).with_constraint(UploadedFileConstraint::new())
    }

    /// A file upload checked with a custom uploaded-file predicate.
    pub fn file_with_validator<F>(name: impl Into<String>, validator: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::new(name, FieldKind::File)
            .with_constraint(UploadedFileConstraint::with_predicate(validator))
    }

    /// A choice field of `kind` restricted to `options`.
    pub fn with_options<I, T>(name: impl Into<String>, kind: FieldKind, options: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<SelectOption>,
    {
        let mut field = Self::new(name, kind);
        field.options = options.into_iter().map(Into::into).collect();
        let allowed = OptionsConstraint::new(field.options.iter().map(|o| o.value.clone()));
        field.with_constraint(allowed)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn value_kind(&self) -> ValueKind {
        self.kind.value_kind()
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub(crate) fn value_slot(&self) -> &ValueSlot {
        &self.value
    }

    /// A copy of the current value, `None` while unset.
    pub fn value(&self) -> Option<Value> {
        self.value.read().clone()
    }

    pub fn has_value(&self) -> bool {
        self.value.read().is_some()
    }

    /// The empty value this field takes when input omits it.
    pub fn default_value(&self) -> Value {
        Value::empty(self.value_kind())
    }

    /// Plain form of the current value, or of the default value while unset.
    pub fn plain(&self) -> PlainValue {
        match &*self.value.read() {
            Some(value) => value.plain(),
            None => self.default_value().plain(),
        }
    }

    /// Assigns a typed value or coerces plain input.
    ///
    /// Replaces any previous value and clears the last violation. Typed
    /// values of the wrong variant are rejected with
    /// [`FieldError::TypeMismatch`].
    pub fn assign(&mut self, input: impl Into<FieldInput>) -> Result<&mut Self, FieldError> {
        match input.into() {
            FieldInput::Value(value) => {
                if value.kind() != self.value_kind() {
                    return Err(FieldError::TypeMismatch {
                        field: self.name.clone(),
                        expected: self.value_kind(),
                        found: value.kind(),
                    });
                }
                self.store(value);
            }
            FieldInput::Plain(plain) => {
                self.assign_plain(plain);
            }
        }
        Ok(self)
    }

    /// Coerces and assigns plain input. Never fails.
    pub fn assign_plain(&mut self, plain: PlainValue) -> &mut Self {
        if plain.kind() != self.value_kind() {
            trace!(
                field = %self.name,
                from = %plain.kind(),
                to = %self.value_kind(),
                "coercing plain input"
            );
        }
        let value = Value::coerce(self.value_kind(), plain);
        self.store(value);
        self
    }

    fn store(&mut self, value: Value) {
        *self.value.write() = Some(value);
        self.violation = None;
    }

    /// Runs the constraints against the current value.
    ///
    /// Clears the last violation first. Unset fields are valid. Otherwise the
    /// constraints run in declaration order and the first violation is kept.
    pub fn is_valid(&mut self) -> bool {
        self.violation = None;

        let Some(value) = self.value() else {
            return true;
        };

        for constraint in &self.constraints {
            trace!(field = %self.name, rule = %constraint.kind(), "checking constraint");
            if let Some(violation) = check_shared(constraint, &value) {
                debug!(
                    field = %self.name,
                    rule = %violation.constraint_kind(),
                    kind = %violation.kind,
                    "field violates constraint"
                );
                self.violation = Some(violation);
                return false;
            }
        }

        true
    }

    /// The violation found by the last [`is_valid`](Self::is_valid) run.
    pub fn violation(&self) -> Option<&Violation> {
        self.violation.as_ref()
    }

    pub fn has_violation(&self) -> bool {
        self.violation.is_some()
    }

    /// Clears value and violation, back to the constructed state.
    pub fn reset(&mut self) -> &mut Self {
        *self.value.write() = None;
        self.violation = None;
        self
    }

    pub fn constraints(&self) -> &[Arc<dyn Constraint>] {
        &self.constraints
    }

    /// Appends a constraint.
    pub fn add_constraint<C: Constraint + 'static>(&mut self, constraint: C) -> &mut Self {
        self.constraints.push(Arc::new(constraint));
        self
    }

    /// Appends a constraint instance that may also be attached elsewhere.
    pub fn add_shared_constraint(&mut self, constraint: Arc<dyn Constraint>) -> &mut Self {
        self.constraints.push(constraint);
        self
    }

    /// Replaces all constraints.
    pub fn set_constraints(&mut self, constraints: Vec<Arc<dyn Constraint>>) -> &mut Self {
        self.constraints = constraints;
        self
    }

    /// Removes every constraint of `kind`.
    pub fn remove_constraint(&mut self, kind: ConstraintKind) -> &mut Self {
        self.constraints.retain(|constraint| constraint.kind() != kind);
        self
    }

    /// Whether a `required` rule is attached.
    pub fn is_required(&self) -> bool {
        self.constraints
            .iter()
            .any(|constraint| constraint.kind() == ConstraintKind::Required)
    }

    /// Whether the value reads as a checked box (`1`, `true`, `on`, `yes`).
    pub fn is_checked(&self) -> bool {
        self.value
            .read()
            .as_ref()
            .and_then(Value::as_scalar)
            .and_then(BoolFilter::parse)
            .unwrap_or(false)
    }

    fn upload(&self) -> Option<UploadDescriptor> {
        self.value.read().as_ref()?.as_upload().cloned()
    }

    pub fn file_name(&self) -> Option<String> {
        self.upload().map(|upload| upload.name)
    }

    pub fn file_type(&self) -> Option<String> {
        self.upload().map(|upload| upload.mime_type)
    }

    pub fn file_size(&self) -> Option<u64> {
        self.upload().map(|upload| upload.size)
    }

    pub fn file_tmp_name(&self) -> Option<String> {
        self.upload().map(|upload| upload.temp_location)
    }

    pub fn file_error(&self) -> Option<UploadErrorCode> {
        self.upload().map(|upload| upload.error)
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("value", &*self.value.read())
            .field("constraints", &self.constraints)
            .field("violation", &self.violation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{
        CustomConstraint, MinLengthConstraint, RequiredConstraint, ViolationKind,
    };

    #[test]
    fn unset_field_is_valid_whatever_its_rules() {
        let mut field = Field::text("foo").required();

        assert!(!field.has_value());
        assert!(field.is_valid());
        assert!(field.violation().is_none());
    }

    #[test]
    fn first_failing_constraint_wins() {
        let mut field = Field::text("foo")
            .with_constraint(CustomConstraint::with_kind(|_| false, ViolationKind::Security))
            .with_constraint(CustomConstraint::with_kind(|_| false, ViolationKind::SystemState));
        field.assign("x").unwrap();

        assert!(!field.is_valid());
        assert_eq!(field.violation().unwrap().kind, ViolationKind::Security);
    }

    #[test]
    fn later_constraints_are_skipped_after_a_violation() {
        use std::sync::atomic::{AtomicBool, Ordering};

        let reached = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&reached);
        let mut field = Field::text("foo").required().custom(move |_| {
            flag.store(true, Ordering::SeqCst);
            true
        });
        field.assign("").unwrap();

        assert!(!field.is_valid());
        assert!(!reached.load(Ordering::SeqCst));
    }

    #[test]
    fn typed_value_of_wrong_variant_is_rejected() {
        let mut field = Field::checkbox("foo");
        let result = field.assign(Value::list(Vec::<String>::new())).map(|_| ());

        assert_eq!(
            result,
            Err(FieldError::TypeMismatch {
                field: "foo".to_string(),
                expected: ValueKind::Scalar,
                found: ValueKind::List,
            })
        );
        assert!(!field.has_value());
    }

    #[test]
    fn assign_clears_the_last_violation() {
        let mut field = Field::text("foo").required();
        field.assign("").unwrap();
        assert!(!field.is_valid());

        field.assign("bar").unwrap();
        assert!(field.violation().is_none());
        assert!(field.is_valid());
    }

    #[test]
    fn reset_returns_to_constructed_state() {
        let mut field = Field::text("foo").required();
        field.assign("").unwrap();
        field.is_valid();

        field.reset();
        assert!(!field.has_value());
        assert!(!field.has_violation());
        assert_eq!(field.plain(), PlainValue::Text(String::new()));
    }

    #[test]
    fn constraints_are_removed_by_kind() {
        let mut field = Field::text("foo");
        field
            .add_constraint(RequiredConstraint::new())
            .add_constraint(MinLengthConstraint::new(3))
            .add_constraint(RequiredConstraint::new());
        assert!(field.is_required());

        field.remove_constraint(ConstraintKind::Required);
        assert!(!field.is_required());
        assert_eq!(field.constraints().len(), 1);
        assert_eq!(field.constraints()[0].kind(), ConstraintKind::MinLength);
    }

    #[test]
    fn shared_constraints_serve_several_fields() {
        let shared: Arc<dyn Constraint> = Arc::new(MinLengthConstraint::new(3));
        let mut first = Field::text("first");
        let mut second = Field::text("second");
        first.add_shared_constraint(Arc::clone(&shared));
        second.add_shared_constraint(shared);

        first.assign("abcd").unwrap();
        second.assign("ab").unwrap();
        assert!(first.is_valid());
        assert!(!second.is_valid());
    }

    #[test]
    fn violation_refers_to_the_attached_rule() {
        let strict: Arc<dyn Constraint> = Arc::new(MinLengthConstraint::new(6));
        let mut field = Field::text("foo").min_length(2);
        field.add_shared_constraint(Arc::clone(&strict));
        field.assign("abc").unwrap();

        assert!(!field.is_valid());
        let violation = field.violation().unwrap();
        assert!(violation.is_from(&strict));
        assert_eq!(
            violation.rule::<MinLengthConstraint>().unwrap().min_length(),
            6
        );
    }

    #[test]
    fn checkbox_reads_truthy_tokens() {
        let mut field = Field::checkbox("terms");
        assert!(!field.is_checked());
        assert!(field
            .constraints()
            .iter()
            .any(|c| c.kind() == ConstraintKind::Bool));

        field.assign("on").unwrap();
        assert!(field.is_checked());
        assert!(field.is_valid());

        field.assign("").unwrap();
        assert!(!field.is_checked());
        assert!(field.is_valid());

        field.assign("foo").unwrap();
        assert!(!field.is_valid());
    }

    #[test]
    fn select_checks_values_not_labels() {
        let mut field = Field::select("foo", [("bar", "Label bar"), ("baz", "Label baz")]);

        field.assign("bar").unwrap();
        assert!(field.is_valid());
        field.assign("").unwrap();
        assert!(field.is_valid());
        field.assign("Label baz").unwrap();
        assert!(!field.is_valid());
    }

    #[test]
    fn radio_options_double_as_labels() {
        let field = Field::radio("gender", ["male", "female", "other"]);
        let values: Vec<&str> = field.options().iter().map(|o| o.label.as_str()).collect();

        assert_eq!(values, ["male", "female", "other"]);
    }

    #[test]
    fn multi_select_holds_lists() {
        let mut field = Field::multi_select("foo", [("bar", "Label bar"), ("baz", "Label baz")]);
        assert_eq!(field.plain(), PlainValue::List(Vec::new()));

        field.assign(Value::list(["bar", "baz"])).unwrap();
        assert!(field.is_valid());
        field.assign(Value::list(Vec::<String>::new())).unwrap();
        assert!(field.is_valid());
        field.assign(Value::list(["bar", "foo"])).unwrap();
        assert!(!field.is_valid());

        assert!(field.assign(Value::scalar("bar")).is_err());
    }

    #[test]
    fn file_field_accessors() {
        let mut field = Field::file_with_validator("cv", |temp| temp == "bar");
        assert_eq!(field.file_name(), None);
        assert_eq!(field.file_error(), None);

        field
            .assign(Value::upload(UploadDescriptor::received(
                "foo.pdf",
                "application/pdf",
                1024,
                "bar",
            )))
            .unwrap();

        assert_eq!(field.file_name().as_deref(), Some("foo.pdf"));
        assert_eq!(field.file_type().as_deref(), Some("application/pdf"));
        assert_eq!(field.file_size(), Some(1024));
        assert_eq!(field.file_tmp_name().as_deref(), Some("bar"));
        assert_eq!(field.file_error(), Some(UploadErrorCode::Ok));
        assert!(field.is_valid());
    }

    #[test]
    fn file_field_validates_uploads() {
        let mut field = Field::file_with_validator("cv", |temp| temp == "foo");

        field.assign(Value::upload(UploadDescriptor::default())).unwrap();
        assert!(field.is_valid());

        field
            .assign(UploadDescriptor::received("a", "text/plain", 1, "bar"))
            .unwrap();
        assert!(!field.is_valid());

        field
            .assign(
                UploadDescriptor::received("a", "text/plain", 1, "foo")
                    .with_error(UploadErrorCode::ExceedsFormLimit),
            )
            .unwrap();
        assert!(!field.is_valid());
        assert_eq!(
            field.violation().unwrap().kind,
            ViolationKind::Configuration
        );

        field.assign("name-only.txt").unwrap();
        assert_eq!(field.file_name().as_deref(), Some("name-only.txt"));
    }
}
