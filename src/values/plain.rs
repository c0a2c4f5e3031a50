//! Untyped input as handed over by the host.

use super::upload::UploadDescriptor;
use super::ValueKind;
use serde::{Deserialize, Serialize};

/// Raw input for one field: a string, a string sequence, or an upload
/// structure.
///
/// Deserializes untagged, so a decoded JSON body maps onto it directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlainValue {
    Text(String),
    List(Vec<String>),
    Upload(UploadDescriptor),
}

impl PlainValue {
    /// The value kind this input naturally corresponds to.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Text(_) => ValueKind::Scalar,
            Self::List(_) => ValueKind::List,
            Self::Upload(_) => ValueKind::Upload,
        }
    }
}

impl From<&str> for PlainValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for PlainValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<String>> for PlainValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<&str>> for PlainValue {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(str::to_string).collect())
    }
}

impl From<UploadDescriptor> for PlainValue {
    fn from(descriptor: UploadDescriptor) -> Self {
        Self::Upload(descriptor)
    }
}
