//! Request encoding.
//!
//! Turns a [`ParameterBag`](crate::params::ParameterBag) into an
//! [`EncodingPlan`]: plain form fields when nothing needs uploading, multipart
//! parts as soon as a single local file is attached.
//!
//! ```text
//! ParameterBag ──▶ encode_params ──┬── file::FileReference  (attachment fields)
//!                                  ├── media::normalize_media ("media" field)
//!                                  ▼
//!                      EncodingPlan::Form | EncodingPlan::Multipart
//! ```
//!
//! Opened files are owned by the plan. They are closed when the plan (or the
//! partially built part list, on error) is dropped.

mod encoder;
pub mod file;
pub mod media;

use std::fs::File;
use std::path::{Path, PathBuf};

pub use encoder::encode_params;
pub use file::{ATTACHMENT_FIELDS, FileReference, is_attachment_field};
pub use media::{MEDIA_FIELD, NormalizedMedia, normalize_media};

use crate::error::{EncodeError, EncodeResult};

/// MIME type of a form-encoded body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// MIME type of a multipart body (boundary appended by the transport).
pub const MULTIPART_CONTENT_TYPE: &str = "multipart/form-data";

// =============================================================================
// AttachedFile
// =============================================================================

/// An opened local file waiting to be streamed as a multipart part.
#[derive(Debug)]
pub struct AttachedFile {
    path: PathBuf,
    file_name: String,
    file: File,
}

impl AttachedFile {
    /// Opens `path` for reading.
    ///
    /// `field` only names the parameter in the error.
    pub fn open(field: &str, path: impl Into<PathBuf>) -> EncodeResult<Self> {
        let path = path.into();
        let file = File::open(&path).map_err(|e| EncodeError::file_open(field, &path, &e))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();
        Ok(Self {
            path,
            file_name,
            file,
        })
    }

    /// Local path the file was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name sent in the part's `Content-Disposition`.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Size in bytes, if the metadata is readable.
    pub fn len(&self) -> Option<u64> {
        self.file.metadata().ok().map(|m| m.len())
    }

    /// Releases the underlying handle.
    pub fn into_file(self) -> File {
        self.file
    }
}

// =============================================================================
// Parts
// =============================================================================

/// Contents of one multipart part.
#[derive(Debug)]
pub enum PartContents {
    /// A plain text value.
    Text(String),
    /// A file stream.
    Stream(AttachedFile),
}

/// One named multipart part.
#[derive(Debug)]
pub struct Part {
    /// Form field name.
    pub name: String,
    /// Part body.
    pub contents: PartContents,
}

impl Part {
    /// Creates a text part.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: PartContents::Text(value.into()),
        }
    }

    /// Creates a file-stream part.
    pub fn stream(name: impl Into<String>, file: AttachedFile) -> Self {
        Self {
            name: name.into(),
            contents: PartContents::Stream(file),
        }
    }

    /// Returns true for a file-stream part.
    pub fn is_stream(&self) -> bool {
        matches!(self.contents, PartContents::Stream(_))
    }

    /// Returns the text value of a text part.
    pub fn as_text(&self) -> Option<&str> {
        match &self.contents {
            PartContents::Text(s) => Some(s),
            PartContents::Stream(_) => None,
        }
    }
}

// =============================================================================
// EncodingPlan
// =============================================================================

/// The decided wire encoding of one request.
///
/// `Multipart` is produced only when at least one part is a stream; a plan
/// without streams is always `Form`.
#[derive(Debug)]
pub enum EncodingPlan {
    /// `application/x-www-form-urlencoded` fields, in order.
    Form(Vec<(String, String)>),
    /// `multipart/form-data` parts, in order.
    Multipart(Vec<Part>),
}

impl Default for EncodingPlan {
    fn default() -> Self {
        Self::Form(Vec::new())
    }
}

impl EncodingPlan {
    /// Number of fields or parts.
    pub fn len(&self) -> usize {
        match self {
            Self::Form(fields) => fields.len(),
            Self::Multipart(parts) => parts.len(),
        }
    }

    /// True when there is no body content at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True for a multipart plan.
    pub fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart(_))
    }

    /// MIME type matching this plan.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Form(_) => FORM_CONTENT_TYPE,
            Self::Multipart(_) => MULTIPART_CONTENT_TYPE,
        }
    }

    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Form(_) if self.is_empty() => "empty",
            Self::Form(_) => "form",
            Self::Multipart(_) => "multipart",
        }
    }

    /// Form fields, if this is a form plan.
    pub fn form_fields(&self) -> Option<&[(String, String)]> {
        match self {
            Self::Form(fields) => Some(fields),
            Self::Multipart(_) => None,
        }
    }

    /// Multipart parts, if this is a multipart plan.
    pub fn parts(&self) -> Option<&[Part]> {
        match self {
            Self::Form(_) => None,
            Self::Multipart(parts) => Some(parts),
        }
    }

    /// Number of file-stream parts.
    pub fn stream_count(&self) -> usize {
        self.parts()
            .map(|parts| parts.iter().filter(|p| p.is_stream()).count())
            .unwrap_or(0)
    }
}
