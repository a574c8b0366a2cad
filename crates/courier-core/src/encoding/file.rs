//! Local file detection for attachment-capable parameters.

use std::path::Path;

use tracing::trace;

use super::AttachedFile;
use crate::error::EncodeResult;
use crate::params::ParamValue;

/// Parameters whose string value may name a local file to upload.
///
/// `thumb` is the pre-6.6 spelling of `thumbnail`.
pub const ATTACHMENT_FIELDS: &[&str] = &[
    "photo",
    "sticker",
    "audio",
    "document",
    "video",
    "voice",
    "animation",
    "video_note",
    "thumbnail",
    "thumb",
];

/// Returns true if `field` may carry an upload.
pub fn is_attachment_field(field: &str) -> bool {
    ATTACHMENT_FIELDS.contains(&field)
}

/// How a file reference string is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileReference<'a> {
    /// An existing regular file on local storage.
    Local(&'a Path),
    /// A file id, URL, or anything else the API resolves itself.
    Remote(&'a str),
}

impl<'a> FileReference<'a> {
    /// Classifies a reference. URLs are never probed on disk.
    pub fn classify(reference: &'a str) -> Self {
        if reference.is_empty() || reference.contains("://") {
            return Self::Remote(reference);
        }
        let path = Path::new(reference);
        if path.is_file() {
            Self::Local(path)
        } else {
            Self::Remote(reference)
        }
    }

    /// Returns true for a local file.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }

    /// Opens a local reference; remote references yield `None`.
    ///
    /// A local file that exists but cannot be opened is an error.
    pub fn open(self, field: &str) -> EncodeResult<Option<AttachedFile>> {
        match self {
            Self::Local(path) => {
                trace!(field = %field, path = %path.display(), "Opening local attachment");
                AttachedFile::open(field, path).map(Some)
            }
            Self::Remote(_) => Ok(None),
        }
    }
}

/// Resolves a parameter to an attachment, if it denotes one.
///
/// - [`ParamValue::File`] is always opened, under any field name.
/// - A string scalar under an attachment-capable field is opened when it
///   names an existing local file.
/// - Everything else is left for the caller to send as a plain value.
pub fn resolve(field: &str, value: &ParamValue) -> EncodeResult<Option<AttachedFile>> {
    match value {
        ParamValue::File(path) => AttachedFile::open(field, path).map(Some),
        ParamValue::Scalar(serde_json::Value::String(reference)) if is_attachment_field(field) => {
            FileReference::classify(reference).open(field)
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EncodeError;
    use std::io::Write;

    #[test]
    fn test_classify() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"jpeg").unwrap();
        let local = tmp.path().to_str().unwrap();

        assert!(FileReference::classify(local).is_local());
        assert_eq!(
            FileReference::classify("AgADBAADr6cxG"),
            FileReference::Remote("AgADBAADr6cxG")
        );
        assert!(!FileReference::classify("https://example.com/cat.jpg").is_local());
        assert!(!FileReference::classify("").is_local());
        // Directories are not uploads.
        let dir = tempfile::tempdir().unwrap();
        assert!(!FileReference::classify(dir.path().to_str().unwrap()).is_local());
    }

    #[test]
    fn test_resolve_only_attachment_fields() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"data").unwrap();
        let path = tmp.path().to_str().unwrap().to_string();

        let file = resolve("document", &ParamValue::from(path.as_str())).unwrap();
        assert_eq!(file.map(|f| f.path().to_path_buf()), Some(tmp.path().to_path_buf()));

        // Same path under a non-attachment field stays a plain value.
        assert!(resolve("caption", &ParamValue::from(path.as_str())).unwrap().is_none());
        assert!(resolve("photo", &ParamValue::from(12)).unwrap().is_none());
    }

    #[test]
    fn test_explicit_file_must_exist() {
        let err = resolve("certificate", &ParamValue::File("/nonexistent/cert.pem".into()))
            .unwrap_err();
        assert!(matches!(err, EncodeError::FileOpen { ref field, .. } if field == "certificate"));
    }
}
