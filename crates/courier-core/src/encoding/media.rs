//! Media group normalization.
//!
//! The `media` parameter carries a JSON array of media items. Items that
//! point at local files cannot be sent inline: each such file becomes its own
//! multipart part under a generated name, and the item's reference is
//! rewritten to `attach://<name>`.

use serde_json::Value;
use tracing::trace;
use uuid::Uuid;

use super::file::FileReference;
use super::{AttachedFile, Part};
use crate::error::{EncodeError, EncodeResult};
use crate::params::{InputMedia, MediaEntry, ParamValue};

/// Name of the parameter that carries grouped media.
pub const MEDIA_FIELD: &str = "media";

/// URI scheme referencing another part of the same multipart request.
pub const ATTACH_SCHEME: &str = "attach://";

/// Part name prefix for a bare file bound to `media`.
const UNTYPED_TAG: &str = "file";

/// Result of normalizing the `media` parameter.
#[derive(Debug)]
pub struct NormalizedMedia {
    /// JSON array to bind to the `media` field.
    pub payload: String,
    /// File parts extracted from the items, in item order.
    pub attachments: Vec<Part>,
}

impl NormalizedMedia {
    /// True if at least one local file was extracted.
    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }
}

/// Normalizes the value bound to `media`.
///
/// A single value is treated as a one-element list. Structured items whose
/// `media` or `thumbnail` names a local file get that file extracted; all
/// other entries, including unrecognized ones, are serialized unchanged.
/// An explicit [`ParamValue::File`] is always uploaded and referenced by its
/// `attach://` name.
pub fn normalize_media(value: &ParamValue) -> EncodeResult<NormalizedMedia> {
    let mut attachments = Vec::new();
    let entries = match value {
        ParamValue::Media(entries) => entries.clone(),
        ParamValue::Scalar(Value::Array(items)) => {
            items.iter().cloned().map(MediaEntry::Raw).collect()
        }
        ParamValue::Scalar(other) => vec![MediaEntry::Raw(other.clone())],
        ParamValue::File(path) => {
            let file = AttachedFile::open(MEDIA_FIELD, path)?;
            let reference = attach(UNTYPED_TAG, file, &mut attachments);
            vec![MediaEntry::Raw(Value::String(reference))]
        }
    };

    let mut rewritten = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            MediaEntry::Item(item) => {
                rewritten.push(MediaEntry::Item(extract_item(item, &mut attachments)?));
            }
            raw @ MediaEntry::Raw(_) => rewritten.push(raw),
        }
    }

    let payload =
        serde_json::to_string(&rewritten).map_err(|e| EncodeError::MediaSerialize(e.to_string()))?;
    Ok(NormalizedMedia {
        payload,
        attachments,
    })
}

fn extract_item(mut item: InputMedia, attachments: &mut Vec<Part>) -> EncodeResult<InputMedia> {
    if let Some(file) = FileReference::classify(&item.media).open(MEDIA_FIELD)? {
        item.media = attach(item.kind.as_str(), file, attachments);
    }
    if let Some(thumbnail) = item.thumbnail.take() {
        let rewritten = match FileReference::classify(&thumbnail).open("media.thumbnail")? {
            Some(file) => attach("thumbnail", file, attachments),
            None => thumbnail,
        };
        item.thumbnail = Some(rewritten);
    }
    Ok(item)
}

fn attach(tag: &str, file: AttachedFile, attachments: &mut Vec<Part>) -> String {
    let name = unique_part_name(tag);
    trace!(part = %name, path = %file.path().display(), "Extracted media attachment");
    let reference = format!("{ATTACH_SCHEME}{name}");
    attachments.push(Part::stream(name, file));
    reference
}

/// Generates a part name unique within (and across) requests.
pub fn unique_part_name(tag: &str) -> String {
    format!("{tag}_{}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn payload_json(normalized: &NormalizedMedia) -> Value {
        serde_json::from_str(&normalized.payload).unwrap()
    }

    #[test]
    fn test_remote_references_pass_through() {
        let value = ParamValue::from(vec![
            InputMedia::photo("AgADBAADr6cxG").with_caption("one"),
            InputMedia::photo("https://example.com/2.jpg"),
        ]);
        let normalized = normalize_media(&value).unwrap();

        assert!(!normalized.has_attachments());
        assert_eq!(
            payload_json(&normalized),
            json!([
                {"type": "photo", "media": "AgADBAADr6cxG", "caption": "one"},
                {"type": "photo", "media": "https://example.com/2.jpg"}
            ])
        );
    }

    #[test]
    fn test_local_file_is_attached() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"\xff\xd8\xff").unwrap();
        let path = tmp.path().to_str().unwrap();

        let normalized = normalize_media(&ParamValue::from(vec![InputMedia::photo(path)])).unwrap();
        assert_eq!(normalized.attachments.len(), 1);

        let part = &normalized.attachments[0];
        assert!(part.is_stream());
        assert!(part.name.starts_with("photo_"));

        let payload = payload_json(&normalized);
        assert_eq!(payload[0]["media"], json!(format!("attach://{}", part.name)));
        assert!(!normalized.payload.contains(path));
    }

    #[test]
    fn test_single_item_is_wrapped() {
        let normalized = normalize_media(&ParamValue::from(InputMedia::video("BAADBAAD"))).unwrap();
        assert_eq!(
            payload_json(&normalized),
            json!([{"type": "video", "media": "BAADBAAD"}])
        );
    }

    #[test]
    fn test_unrecognized_entries_are_kept() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"x").unwrap();
        let path = tmp.path().to_str().unwrap();

        let value = ParamValue::Media(vec![
            MediaEntry::Raw(json!({"type": "photo", "media": path})),
            MediaEntry::Raw(json!("loose")),
        ]);
        let normalized = normalize_media(&value).unwrap();

        // Raw entries never take part in extraction, even with a local path.
        assert!(!normalized.has_attachments());
        assert_eq!(
            payload_json(&normalized),
            json!([{"type": "photo", "media": path}, "loose"])
        );
    }

    #[test]
    fn test_local_thumbnail_gets_own_part() {
        let mut thumb = tempfile::NamedTempFile::new().unwrap();
        thumb.write_all(b"thumb").unwrap();

        let item = InputMedia::document("BQADBAAD").with_thumbnail(thumb.path().to_str().unwrap());
        let normalized = normalize_media(&ParamValue::from(item)).unwrap();

        assert_eq!(normalized.attachments.len(), 1);
        let name = &normalized.attachments[0].name;
        assert!(name.starts_with("thumbnail_"));
        let payload = payload_json(&normalized);
        assert_eq!(payload[0]["media"], json!("BQADBAAD"));
        assert_eq!(payload[0]["thumbnail"], json!(format!("attach://{name}")));
    }

    #[test]
    fn test_explicit_file_is_attached() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"x").unwrap();

        let normalized = normalize_media(&ParamValue::from(tmp.path().to_path_buf())).unwrap();
        assert_eq!(normalized.attachments.len(), 1);
        let name = &normalized.attachments[0].name;
        assert!(name.starts_with("file_"));
        assert_eq!(payload_json(&normalized), json!([format!("attach://{name}")]));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let value = ParamValue::from(std::path::PathBuf::from("/nonexistent/album.jpg"));
        let err = normalize_media(&value).unwrap_err();
        assert!(matches!(err, EncodeError::FileOpen { ref field, .. } if field == "media"));
    }

    #[test]
    fn test_part_names_are_unique() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"x").unwrap();
        let path = tmp.path().to_str().unwrap();

        let value = ParamValue::from(vec![InputMedia::photo(path), InputMedia::photo(path)]);
        let normalized = normalize_media(&value).unwrap();
        assert_eq!(normalized.attachments.len(), 2);
        assert_ne!(normalized.attachments[0].name, normalized.attachments[1].name);
    }
}
