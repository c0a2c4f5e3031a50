//! Upload descriptors and the transport error-code vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome code attached to an upload by the host's transport layer.
///
/// Integer codes follow the conventional upload-error numbering, so a
/// decoded request body can be mapped without translation tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum UploadErrorCode {
    /// The file arrived completely.
    Ok,
    /// Larger than the server-wide upload limit.
    ExceedsServerLimit,
    /// Larger than the limit declared by the submitting form.
    ExceedsFormLimit,
    /// Only part of the file arrived.
    Partial,
    /// No file was submitted.
    NoFile,
    /// No temporary directory was available.
    NoTempDir,
    /// The temporary file could not be written.
    CantWrite,
    /// An extension of the host stopped the upload.
    StoppedByExtension,
    /// Any code outside the known vocabulary.
    Unknown(UnknownCode),
}

/// An upload error code with no named variant.
///
/// Only built by `UploadErrorCode::from`, so a known code such as `4` can
/// never hide behind `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnknownCode(i64);

impl UnknownCode {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl UploadErrorCode {
    pub fn code(self) -> i64 {
        match self {
            Self::Ok => 0,
            Self::ExceedsServerLimit => 1,
            Self::ExceedsFormLimit => 2,
            Self::Partial => 3,
            Self::NoFile => 4,
            Self::NoTempDir => 6,
            Self::CantWrite => 7,
            Self::StoppedByExtension => 8,
            Self::Unknown(code) => code.get(),
        }
    }
}

impl From<i64> for UploadErrorCode {
    fn from(code: i64) -> Self {
        match code {
            0 => Self::Ok,
            1 => Self::ExceedsServerLimit,
            2 => Self::ExceedsFormLimit,
            3 => Self::Partial,
            4 => Self::NoFile,
            6 => Self::NoTempDir,
            7 => Self::CantWrite,
            8 => Self::StoppedByExtension,
            other => Self::Unknown(UnknownCode(other)),
        }
    }
}

impl From<UploadErrorCode> for i64 {
    fn from(code: UploadErrorCode) -> Self {
        code.code()
    }
}

impl Default for UploadErrorCode {
    fn default() -> Self {
        Self::NoFile
    }
}

impl fmt::Display for UploadErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Metadata describing one uploaded file.
///
/// Serialized with the transport keys (`name`, `type`, `size`, `tmp_name`,
/// `error`). Missing keys take their defaults, so `{}` decodes to the empty
/// descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadDescriptor {
    /// Client-supplied file name.
    pub name: String,
    /// Client-supplied MIME type.
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Size in bytes.
    pub size: u64,
    /// Where the host stored the file while the request is handled.
    #[serde(rename = "tmp_name")]
    pub temp_location: String,
    /// Transport outcome.
    pub error: UploadErrorCode,
}

impl UploadDescriptor {
    /// Descriptor carrying only an intended file name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Descriptor for a completely received file.
    pub fn received(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        size: u64,
        temp_location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
            temp_location: temp_location.into(),
            error: UploadErrorCode::Ok,
        }
    }

    pub fn with_error(mut self, error: UploadErrorCode) -> Self {
        self.error = error;
        self
    }
}
