//! Fluent rule attachment.
//!
//! Every method consumes the field and appends one constraint, so rules
//! read in the order they run:
//!
//! ```rust
//! use formwise::fields::Field;
//!
//! let email = Field::text("email").required().max_length(254).email();
//! assert_eq!(email.constraints().len(), 3);
//! ```

use super::Field;
use crate::bytes::ByteSize;
use crate::constraints::{
    Constraint, ConstraintError, CustomConstraint, FileSizeConstraint, FilterConstraint,
    HoneyPotConstraint, IntRange, MatchesConstraint, MaxLengthConstraint, MimeTypeConstraint,
    MinLengthConstraint, OptionsConstraint, RequiredConstraint, ScalarFilter,
    UploadedFileConstraint, ViolationKind,
};
use crate::values::Value;

impl Field {
    pub fn with_constraint<C: Constraint + 'static>(mut self, constraint: C) -> Self {
        self.add_constraint(constraint);
        self
    }

    pub fn required(self) -> Self {
        self.with_constraint(RequiredConstraint::new())
    }

    pub fn min_length(self, length: usize) -> Self {
        self.with_constraint(MinLengthConstraint::new(length))
    }

    pub fn max_length(self, length: usize) -> Self {
        self.with_constraint(MaxLengthConstraint::new(length))
    }

    pub fn email(self) -> Self {
        self.with_constraint(FilterConstraint::email())
    }

    pub fn boolean(self) -> Self {
        self.with_constraint(FilterConstraint::boolean())
    }

    pub fn int(self, range: IntRange) -> Self {
        self.with_constraint(FilterConstraint::int(range))
    }

    /// Requires a match of `pattern` anywhere in the value.
    pub fn regexp(self, pattern: &str) -> Result<Self, ConstraintError> {
        Ok(self.with_constraint(FilterConstraint::regexp(pattern)?))
    }

    pub fn filter<F: ScalarFilter + 'static>(self, filter: F) -> Self {
        self.with_constraint(FilterConstraint::new(filter))
    }

    /// Restricts every submitted element to `options`.
    pub fn allowed_options<I, T>(self, options: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.with_constraint(OptionsConstraint::new(options))
    }

    /// Requires the value to equal `other`'s value at validation time.
    pub fn matches(self, other: &Field) -> Self {
        self.with_constraint(MatchesConstraint::new(other))
    }

    pub fn max_file_size(self, max_size: impl Into<ByteSize>) -> Result<Self, ConstraintError> {
        Ok(self.with_constraint(FileSizeConstraint::new(max_size)?))
    }

    pub fn mime_type<I, T>(self, accepted_types: I) -> Result<Self, ConstraintError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Ok(self.with_constraint(MimeTypeConstraint::new(accepted_types)?))
    }

    pub fn uploaded_file<F>(self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.with_constraint(UploadedFileConstraint::with_predicate(predicate))
    }

    /// Any non-empty value is treated as a bot submission.
    pub fn honey_pot(self) -> Self {
        self.with_constraint(HoneyPotConstraint::new())
    }

    pub fn custom<F>(self, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.with_constraint(CustomConstraint::new(predicate))
    }

    pub fn custom_with_kind<F>(self, predicate: F, violation_kind: ViolationKind) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.with_constraint(CustomConstraint::with_kind(predicate, violation_kind))
    }
}
