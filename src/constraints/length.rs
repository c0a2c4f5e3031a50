//! Length bounds for scalar values.
//!
//! Lengths are counted in UTF-8 bytes, so `"äöü"` is six long.

use crate::constraints::{Constraint, ConstraintKind, ViolationKind};
use crate::values::Value;

fn scalar_len(value: &Value) -> Option<usize> {
    value
        .as_scalar()
        .filter(|text| !text.is_empty())
        .map(str::len)
}

/// Scalar must be at least `min_length` bytes long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinLengthConstraint {
    min_length: usize,
}

impl MinLengthConstraint {
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }
}

impl Constraint for MinLengthConstraint {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::MinLength
    }

    fn assess(&self, value: &Value) -> Option<ViolationKind> {
        let len = scalar_len(value)?;
        (len < self.min_length).then_some(ViolationKind::InvalidValue)
    }
}

/// Scalar must be at most `max_length` bytes long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxLengthConstraint {
    max_length: usize,
}

impl MaxLengthConstraint {
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

impl Constraint for MaxLengthConstraint {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::MaxLength
    }

    fn assess(&self, value: &Value) -> Option<ViolationKind> {
        let len = scalar_len(value)?;
        (len > self.max_length).then_some(ViolationKind::InvalidValue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::UploadDescriptor;

    #[test]
    fn min_length_bounds() {
        let rule = MinLengthConstraint::new(3);

        assert!(rule.check(&Value::scalar("abc")).is_none());
        assert!(rule.check(&Value::scalar("abcd")).is_none());
        assert_eq!(
            rule.check(&Value::scalar("ab")).unwrap().kind,
            ViolationKind::InvalidValue
        );
    }

    #[test]
    fn max_length_bounds() {
        let rule = MaxLengthConstraint::new(3);

        assert!(rule.check(&Value::scalar("abc")).is_none());
        assert!(rule.check(&Value::scalar("ab")).is_none());
        assert!(rule.check(&Value::scalar("abcd")).is_some());
    }

    #[test]
    fn length_counts_bytes() {
        let umlauts = Value::scalar("äöü");

        assert!(MaxLengthConstraint::new(3).check(&umlauts).is_some());
        assert!(MaxLengthConstraint::new(6).check(&umlauts).is_none());
        assert!(MinLengthConstraint::new(6).check(&umlauts).is_none());
        assert!(MinLengthConstraint::new(7).check(&umlauts).is_some());
    }

    #[test]
    fn empty_and_non_scalar_values_pass() {
        let min = MinLengthConstraint::new(5);
        let max = MaxLengthConstraint::new(0);

        assert!(min.check(&Value::scalar("")).is_none());
        assert!(max.check(&Value::list(["toolong"])).is_none());
        assert!(min.check(&Value::upload(UploadDescriptor::named("x"))).is_none());
    }
}
