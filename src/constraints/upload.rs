//! Rules for upload values.

use crate::bytes::ByteSize;
use crate::constraints::{Constraint, ConstraintError, ConstraintKind, ViolationKind};
use crate::values::{UploadDescriptor, UploadErrorCode, Value};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

static MIME_TYPE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-z-]+)/[a-z0-9.-]+$").unwrap());

static ACCEPTED_TYPE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z-]+(?:/[a-z0-9.-]+)?$").unwrap());

/// Type alias for "is this really an uploaded temp file" predicates.
pub type UploadedFilePredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Non-empty upload that arrived completely, if any.
fn received_upload(value: &Value) -> Option<&UploadDescriptor> {
    value
        .as_upload()
        .filter(|descriptor| descriptor.error == UploadErrorCode::Ok)
}

/// Limits the size of a received upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSizeConstraint {
    max_size: u64,
}

impl FileSizeConstraint {
    /// `max_size` is a byte count or a shorthand such as `"2M"`.
    pub fn new(max_size: impl Into<ByteSize>) -> Result<Self, ConstraintError> {
        let max_size = max_size.into().to_bytes()?;
        Ok(Self { max_size })
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }
}

impl Constraint for FileSizeConstraint {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::FileSize
    }

    fn assess(&self, value: &Value) -> Option<ViolationKind> {
        let upload = received_upload(value)?;
        (upload.size > self.max_size).then_some(ViolationKind::InvalidValue)
    }
}

/// Restricts the MIME type of a received upload.
///
/// Accepted entries are either a full `type/subtype` or a bare `type` that
/// admits every subtype. An upload whose type does not look like
/// `type/subtype` always violates. An empty accepted list admits everything.
///
/// # Example
///
/// ```rust
/// use formwise::constraints::{Constraint, MimeTypeConstraint};
/// use formwise::values::{UploadDescriptor, Value};
///
/// let images = MimeTypeConstraint::new(["image"]).unwrap();
/// let png = Value::upload(UploadDescriptor::received("a.png", "image/png", 10, "/tmp/a"));
/// let pdf = Value::upload(UploadDescriptor::received("a.pdf", "application/pdf", 10, "/tmp/b"));
///
/// assert!(images.check(&png).is_none());
/// assert!(images.check(&pdf).is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimeTypeConstraint {
    accepted_types: Vec<String>,
}

impl MimeTypeConstraint {
    pub fn new<I, T>(accepted_types: I) -> Result<Self, ConstraintError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let accepted_types = accepted_types
            .into_iter()
            .map(Into::into)
            .map(|accepted: String| {
                if ACCEPTED_TYPE_REGEX.is_match(&accepted) {
                    Ok(accepted)
                } else {
                    Err(ConstraintError::InvalidMimeType(accepted))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { accepted_types })
    }

    pub fn accepted_types(&self) -> &[String] {
        &self.accepted_types
    }

    fn accepts(&self, full_type: &str, super_type: &str) -> bool {
        self.accepted_types.iter().any(|accepted| {
            if accepted.contains('/') {
                accepted == full_type
            } else {
                accepted == super_type
            }
        })
    }
}

impl Constraint for MimeTypeConstraint {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::MimeType
    }

    fn assess(&self, value: &Value) -> Option<ViolationKind> {
        if self.accepted_types.is_empty() {
            return None;
        }
        let upload = received_upload(value)?;

        let accepted = MIME_TYPE_REGEX
            .captures(&upload.mime_type)
            .and_then(|captures| captures.get(1))
            .map_or(false, |super_type| {
                self.accepts(&upload.mime_type, super_type.as_str())
            });
        (!accepted).then_some(ViolationKind::InvalidValue)
    }
}

/// Checks the transport outcome of an upload.
///
/// | error code                          | result                          |
/// |-------------------------------------|---------------------------------|
/// | `Ok`                                | predicate on the temp location; `InvalidValue` if false |
/// | `NoFile`                            | no violation                    |
/// | server/form limit, extension stop   | `Configuration`                 |
/// | partial, temp dir, write, unknown   | `SystemState`                   |
///
/// The default predicate accepts temp locations that exist as regular files.
#[derive(Clone)]
pub struct UploadedFileConstraint {
    predicate: UploadedFilePredicate,
}

impl UploadedFileConstraint {
    pub fn new() -> Self {
        Self::with_predicate(|temp_location: &str| Path::new(temp_location).is_file())
    }

    pub fn with_predicate<F>(predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
        }
    }

    pub fn from_shared(predicate: UploadedFilePredicate) -> Self {
        Self { predicate }
    }
}

impl Default for UploadedFileConstraint {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UploadedFileConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFileConstraint").finish_non_exhaustive()
    }
}

impl Constraint for UploadedFileConstraint {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::UploadedFile
    }

    fn assess(&self, value: &Value) -> Option<ViolationKind> {
        let upload = value.as_upload()?;

        match upload.error {
            UploadErrorCode::Ok => (!(self.predicate)(&upload.temp_location))
                .then_some(ViolationKind::InvalidValue),
            UploadErrorCode::NoFile => None,
            UploadErrorCode::ExceedsServerLimit
            | UploadErrorCode::ExceedsFormLimit
            | UploadErrorCode::StoppedByExtension => {
                Some(ViolationKind::Configuration)
            }
            UploadErrorCode::Partial
            | UploadErrorCode::NoTempDir
            | UploadErrorCode::CantWrite
            | UploadErrorCode::Unknown(_) => Some(ViolationKind::SystemState),
        }
    }
}
