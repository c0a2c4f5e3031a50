//! Scalar filters and the rule that delegates to them.
//!
//! A [`ScalarFilter`] decides whether a single string is acceptable. The
//! built-in filters cover booleans, integers, e-mail addresses and regular
//! expressions; hosts can plug in their own by implementing the trait.

use crate::constraints::{Constraint, ConstraintError, ConstraintKind, ViolationKind};
use crate::values::Value;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$").unwrap()
});

/// Accepts or rejects a single non-empty string.
pub trait ScalarFilter: fmt::Debug + Send + Sync {
    /// Rule family reported on violations.
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Filter
    }

    fn accepts(&self, input: &str) -> bool;
}

/// Boolean tokens: `1/true/on/yes` and `0/false/off/no`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolFilter;

impl BoolFilter {
    /// Interprets `input` as a boolean, ignoring case and surrounding
    /// whitespace. The empty string reads as `false`.
    pub fn parse(input: &str) -> Option<bool> {
        match input.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "on" | "yes" => Some(true),
            "0" | "false" | "off" | "no" | "" => Some(false),
            _ => None,
        }
    }
}

impl ScalarFilter for BoolFilter {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Bool
    }

    fn accepts(&self, input: &str) -> bool {
        Self::parse(input).is_some()
    }
}

/// Options of the integer filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntRange {
    /// Inclusive lower bound.
    pub min: Option<i64>,
    /// Inclusive upper bound.
    pub max: Option<i64>,
    /// Accept `0x`-prefixed hexadecimal.
    pub allow_hex: bool,
    /// Accept `0`-prefixed octal.
    pub allow_octal: bool,
}

impl IntRange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn allow_hex(mut self) -> Self {
        self.allow_hex = true;
        self
    }

    pub fn allow_octal(mut self) -> Self {
        self.allow_octal = true;
        self
    }

    pub fn contains(&self, n: i64) -> bool {
        self.min.map_or(true, |min| n >= min) && self.max.map_or(true, |max| n <= max)
    }
}

/// Integers, optionally range-limited.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntFilter {
    range: IntRange,
}

impl IntFilter {
    pub fn new(range: IntRange) -> Self {
        Self { range }
    }

    pub fn range(&self) -> IntRange {
        self.range
    }

    /// Parses `input` under this filter's notation flags, without the range
    /// check.
    pub fn parse(&self, input: &str) -> Option<i64> {
        let text = input.trim();

        if self.range.allow_hex {
            if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
                if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                    return None;
                }
                return i64::from_str_radix(hex, 16).ok();
            }
        }

        if self.range.allow_octal && text.len() > 1 && text.starts_with('0') {
            let octal = &text[1..];
            if !octal.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
                return None;
            }
            return i64::from_str_radix(octal, 8).ok();
        }

        let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
        let well_formed = !digits.is_empty()
            && digits.bytes().all(|b| b.is_ascii_digit())
            && (digits == "0" || !digits.starts_with('0'));
        if !well_formed {
            return None;
        }
        text.parse().ok()
    }
}

impl ScalarFilter for IntFilter {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Int
    }

    fn accepts(&self, input: &str) -> bool {
        self.parse(input).map_or(false, |n| self.range.contains(n))
    }
}

/// E-mail addresses (`local@domain.tld`).
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailFilter;

impl ScalarFilter for EmailFilter {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Email
    }

    fn accepts(&self, input: &str) -> bool {
        EMAIL_REGEX.is_match(input)
    }
}

/// Strings containing a match of a regular expression.
///
/// The search is unanchored; use `^`/`$` in the pattern to match the whole
/// input.
#[derive(Debug, Clone)]
pub struct RegexpFilter {
    regex: Regex,
}

impl RegexpFilter {
    pub fn new(pattern: &str) -> Result<Self, ConstraintError> {
        let regex = Regex::new(pattern).map_err(|source| ConstraintError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { regex })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl ScalarFilter for RegexpFilter {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Regexp
    }

    fn accepts(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }
}

/// Runs a [`ScalarFilter`] against non-empty scalar values.
///
/// # Example
///
/// ```rust
/// use formwise::constraints::{Constraint, FilterConstraint, IntRange};
/// use formwise::values::Value;
///
/// let rule = FilterConstraint::int(IntRange::new().min(1).max(10).allow_hex());
///
/// assert!(rule.check(&Value::scalar("7")).is_none());
/// assert!(rule.check(&Value::scalar("0xA")).is_none());
/// assert!(rule.check(&Value::scalar("0")).is_some());
/// assert!(rule.check(&Value::scalar("0xf")).is_some());
/// ```
#[derive(Debug, Clone)]
pub struct FilterConstraint {
    filter: Arc<dyn ScalarFilter>,
}

impl FilterConstraint {
    pub fn new<F: ScalarFilter + 'static>(filter: F) -> Self {
        Self {
            filter: Arc::new(filter),
        }
    }

    pub fn from_shared(filter: Arc<dyn ScalarFilter>) -> Self {
        Self { filter }
    }

    pub fn boolean() -> Self {
        Self::new(BoolFilter)
    }

    pub fn int(range: IntRange) -> Self {
        Self::new(IntFilter::new(range))
    }

    pub fn email() -> Self {
        Self::new(EmailFilter)
    }

    pub fn regexp(pattern: &str) -> Result<Self, ConstraintError> {
        Ok(Self::new(RegexpFilter::new(pattern)?))
    }

    pub fn filter(&self) -> &Arc<dyn ScalarFilter> {
        &self.filter
    }
}

impl Constraint for FilterConstraint {
    fn kind(&self) -> ConstraintKind {
        self.filter.kind()
    }

    fn assess(&self, value: &Value) -> Option<ViolationKind> {
        let text = value.as_scalar().filter(|text| !text.is_empty())?;
        (!self.filter.accepts(text)).then_some(ViolationKind::InvalidValue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::UploadDescriptor;

    #[test]
    fn bool_filter_accepts_known_tokens() {
        let rule = FilterConstraint::boolean();

        for token in ["1", "true", "on", "yes", "0", "false", "off", "no", "", "TRUE", " On "] {
            assert!(rule.check(&Value::scalar(token)).is_none(), "{token:?}");
        }
        for token in ["foo", "none", "si", "2"] {
            assert!(rule.check(&Value::scalar(token)).is_some(), "{token:?}");
        }
        assert_eq!(rule.kind(), ConstraintKind::Bool);
    }

    #[test]
    fn bool_parse_reads_truthiness() {
        assert_eq!(BoolFilter::parse("on"), Some(true));
        assert_eq!(BoolFilter::parse("no"), Some(false));
        assert_eq!(BoolFilter::parse("maybe"), None);
    }

    #[test]
    fn int_filter_rejects_non_canonical_decimals() {
        let filter = IntFilter::default();

        assert_eq!(filter.parse("42"), Some(42));
        assert_eq!(filter.parse("-42"), Some(-42));
        assert_eq!(filter.parse("+7"), Some(7));
        assert_eq!(filter.parse(" 8 "), Some(8));
        assert_eq!(filter.parse("0"), Some(0));
        assert_eq!(filter.parse("007"), None);
        assert_eq!(filter.parse("1.5"), None);
        assert_eq!(filter.parse("0x1A"), None);
        assert_eq!(filter.parse("99999999999999999999"), None);
    }

    #[test]
    fn int_filter_notation_flags() {
        let hex = IntFilter::new(IntRange::new().allow_hex());
        assert_eq!(hex.parse("0x1A"), Some(26));
        assert_eq!(hex.parse("0X1a"), Some(26));
        assert_eq!(hex.parse("0xg"), None);

        let octal = IntFilter::new(IntRange::new().allow_octal());
        assert_eq!(octal.parse("017"), Some(15));
        assert_eq!(octal.parse("018"), None);
        assert_eq!(octal.parse("0"), Some(0));
    }

    #[test]
    fn int_filter_range_is_inclusive() {
        let rule = FilterConstraint::int(IntRange::new().min(1).max(10));

        assert!(rule.check(&Value::scalar("1")).is_none());
        assert!(rule.check(&Value::scalar("10")).is_none());
        assert!(rule.check(&Value::scalar("11")).is_some());
        assert!(rule.check(&Value::scalar("foo")).is_some());
    }

    #[test]
    fn email_filter() {
        let rule = FilterConstraint::email();

        assert!(rule.check(&Value::scalar("jane.doe@example.org")).is_none());
        assert!(rule.check(&Value::scalar("foo")).is_some());
        assert!(rule.check(&Value::scalar("foo@")).is_some());
        assert_eq!(rule.kind(), ConstraintKind::Email);
    }

    #[test]
    fn regexp_search_is_unanchored() {
        let rule = FilterConstraint::regexp("(foo|bar|baz)").unwrap();

        assert!(rule.check(&Value::scalar("foo")).is_none());
        assert!(rule.check(&Value::scalar("  rabarbar  ")).is_none());
        assert!(rule.check(&Value::scalar("some value")).is_some());
        assert!(rule.check(&Value::scalar("FOO")).is_some());
    }

    #[test]
    fn invalid_pattern_is_a_contract_error() {
        let result = FilterConstraint::regexp("(unclosed");
        assert!(matches!(
            result,
            Err(ConstraintError::InvalidPattern { pattern, .. }) if pattern == "(unclosed"
        ));
    }

    #[test]
    fn unsuited_and_empty_values_pass() {
        let rule = FilterConstraint::email();

        assert!(rule.check(&Value::scalar("")).is_none());
        assert!(rule.check(&Value::list(["foo"])).is_none());
        assert!(rule.check(&Value::upload(UploadDescriptor::default())).is_none());
    }

    #[derive(Debug)]
    struct Uppercase;

    impl ScalarFilter for Uppercase {
        fn accepts(&self, input: &str) -> bool {
            input.chars().all(|c| !c.is_lowercase())
        }
    }

    #[test]
    fn custom_filters_plug_in() {
        let rule = FilterConstraint::new(Uppercase);

        assert_eq!(rule.kind(), ConstraintKind::Filter);
        assert!(rule.check(&Value::scalar("ABC")).is_none());
        assert!(rule.check(&Value::scalar("AbC")).is_some());
    }
}
