//! Field kinds and choice options.

use crate::values::ValueKind;
use serde::{Deserialize, Serialize};

/// The input widget a field stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Password,
    Checkbox,
    Radio,
    Select,
    MultiSelect,
    File,
}

impl FieldKind {
    /// The value variant this kind of field holds.
    pub fn value_kind(self) -> ValueKind {
        match self {
            Self::Text | Self::Password | Self::Checkbox | Self::Radio | Self::Select => {
                ValueKind::Scalar
            }
            Self::MultiSelect => ValueKind::List,
            Self::File => ValueKind::Upload,
        }
    }

    /// Whether this kind offers a fixed set of choices.
    pub fn has_options(self) -> bool {
        matches!(self, Self::Radio | Self::Select | Self::MultiSelect)
    }
}

/// One choice of a radio, select or multi-select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Submitted value.
    pub value: String,
    /// Text shown to the user.
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A bare value doubles as its own label.
impl From<&str> for SelectOption {
    fn from(value: &str) -> Self {
        Self::new(value, value)
    }
}

impl From<String> for SelectOption {
    fn from(value: String) -> Self {
        Self::new(value.clone(), value)
    }
}

impl From<(&str, &str)> for SelectOption {
    fn from((value, label): (&str, &str)) -> Self {
        Self::new(value, label)
    }
}

impl From<(String, String)> for SelectOption {
    fn from((value, label): (String, String)) -> Self {
        Self::new(value, label)
    }
}
