//! Typed wrappers around raw field input.
//!
//! A [`Value`] is one of three closed variants: a single string, an ordered
//! list of strings, or an upload descriptor. Each variant carries its own
//! notion of emptiness, which is what the `required` rule and every other
//! rule's "empty values never violate" short-cut rely on.

mod plain;
mod upload;

pub use plain::PlainValue;
pub use upload::{UnknownCode, UploadDescriptor, UploadErrorCode};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant of a [`Value`], used for field type enforcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Scalar,
    List,
    Upload,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Scalar => "scalar",
            Self::List => "list",
            Self::Upload => "upload",
        };
        f.write_str(name)
    }
}

/// Typed field input.
///
/// Equality is variant-strict: a scalar never equals a list, even when the
/// list holds that single string.
///
/// # Example
///
/// ```rust
/// use formwise::values::{UploadDescriptor, Value};
///
/// assert!(Value::scalar("").is_empty());
/// assert!(Value::list(["", ""]).is_empty());
/// assert!(!Value::list(["", "a"]).is_empty());
/// assert!(Value::upload(UploadDescriptor::default()).is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    Scalar(String),
    List(Vec<String>),
    Upload(UploadDescriptor),
}

impl Value {
    pub fn scalar(text: impl Into<String>) -> Self {
        Self::Scalar(text.into())
    }

    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    pub fn upload(descriptor: UploadDescriptor) -> Self {
        Self::Upload(descriptor)
    }

    /// The empty value of the given kind.
    pub fn empty(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Scalar => Self::Scalar(String::new()),
            ValueKind::List => Self::List(Vec::new()),
            ValueKind::Upload => Self::Upload(UploadDescriptor::default()),
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Scalar(_) => ValueKind::Scalar,
            Self::List(_) => ValueKind::List,
            Self::Upload(_) => ValueKind::Upload,
        }
    }

    /// Whether this value counts as "nothing submitted".
    ///
    /// - scalar: zero-length string
    /// - list: no elements, or only zero-length elements
    /// - upload: error code is `NoFile`
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Scalar(text) => text.is_empty(),
            Self::List(items) => items.iter().all(String::is_empty),
            Self::Upload(descriptor) => descriptor.error == UploadErrorCode::NoFile,
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_upload(&self) -> Option<&UploadDescriptor> {
        match self {
            Self::Upload(descriptor) => Some(descriptor),
            _ => None,
        }
    }

    /// The plain, untyped representation of this value.
    pub fn plain(&self) -> PlainValue {
        match self {
            Self::Scalar(text) => PlainValue::Text(text.clone()),
            Self::List(items) => PlainValue::List(items.clone()),
            Self::Upload(descriptor) => PlainValue::Upload(descriptor.clone()),
        }
    }

    /// Human-readable rendering: the string itself for scalars, compact
    /// JSON of the plain form otherwise.
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Scalar(text) => text.clone(),
            other => serde_json::to_string(&other.plain()).unwrap_or_default(),
        }
    }

    /// Converts plain input into a value of `kind`.
    ///
    /// Conversion never fails: scalars take the first element of a list,
    /// lists wrap a lone string, and uploads treat a lone string as the
    /// intended file name. Upload structures offered to scalar or list kinds
    /// contribute their file name.
    pub fn coerce(kind: ValueKind, plain: PlainValue) -> Self {
        match (kind, plain) {
            (ValueKind::Scalar, PlainValue::Text(text)) => Self::Scalar(text),
            (ValueKind::Scalar, PlainValue::List(items)) => {
                Self::Scalar(items.into_iter().next().unwrap_or_default())
            }
            (ValueKind::Scalar, PlainValue::Upload(descriptor)) => Self::Scalar(descriptor.name),
            (ValueKind::List, PlainValue::List(items)) => Self::List(items),
            (ValueKind::List, PlainValue::Text(text))
            | (ValueKind::List, PlainValue::Upload(UploadDescriptor { name: text, .. })) => {
                if text.is_empty() {
                    Self::List(Vec::new())
                } else {
                    Self::List(vec![text])
                }
            }
            (ValueKind::Upload, PlainValue::Upload(descriptor)) => Self::Upload(descriptor),
            (ValueKind::Upload, PlainValue::Text(name)) => {
                Self::Upload(UploadDescriptor::named(name))
            }
            (ValueKind::Upload, PlainValue::List(items)) => Self::Upload(UploadDescriptor::named(
                items.into_iter().next().unwrap_or_default(),
            )),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::scalar(text)
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Scalar(text)
    }
}

impl From<UploadDescriptor> for Value {
    fn from(descriptor: UploadDescriptor) -> Self {
        Self::Upload(descriptor)
    }
}
