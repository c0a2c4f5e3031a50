//! Byte-size shorthand parsing (`"2M"` → 2 MiB).

use crate::constraints::ConstraintError;
use serde::{Deserialize, Serialize};

/// A byte limit given either as a count or as a shorthand string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ByteSize {
    Bytes(u64),
    Shorthand(String),
}

impl ByteSize {
    pub fn to_bytes(&self) -> Result<u64, ConstraintError> {
        match self {
            Self::Bytes(count) => Ok(*count),
            Self::Shorthand(text) => shorthand_to_bytes(text),
        }
    }
}

impl From<u64> for ByteSize {
    fn from(count: u64) -> Self {
        Self::Bytes(count)
    }
}

impl From<&str> for ByteSize {
    fn from(text: &str) -> Self {
        Self::Shorthand(text.to_string())
    }
}

impl From<String> for ByteSize {
    fn from(text: String) -> Self {
        Self::Shorthand(text)
    }
}

/// Parses `<digits>` or `<digits><K|M|G>` (powers of 1024, unit
/// case-insensitive).
pub fn shorthand_to_bytes(text: &str) -> Result<u64, ConstraintError> {
    let invalid = || ConstraintError::InvalidByteSize(text.to_string());

    let (digits, multiplier) = match text.char_indices().last() {
        Some((idx, unit)) if unit.is_ascii_alphabetic() => {
            let multiplier = match unit.to_ascii_uppercase() {
                'K' => 1u64 << 10,
                'M' => 1u64 << 20,
                'G' => 1u64 << 30,
                _ => return Err(invalid()),
            };
            (&text[..idx], multiplier)
        }
        Some(_) => (text, 1),
        None => return Err(invalid()),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    digits
        .parse::<u64>()
        .ok()
        .and_then(|count| count.checked_mul(multiplier))
        .ok_or_else(invalid)
}
