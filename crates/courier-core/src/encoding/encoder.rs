//! Parameter encoder: decides between form and multipart.

use tracing::debug;

use super::file::resolve;
use super::media::{MEDIA_FIELD, normalize_media};
use super::{EncodingPlan, Part, PartContents};
use crate::error::{EncodeError, EncodeResult};
use crate::params::{ParamValue, ParameterBag};

/// Encodes a parameter bag into a request plan.
///
/// Rules, per field in insertion order:
///
/// - `null` scalars are omitted.
/// - `media` is normalized; extracted files become stream parts and the
///   rewritten JSON array becomes the `media` value.
/// - An attachment that resolves to a local file becomes a single stream part
///   under the field's own name. The literal path is not sent alongside it.
/// - Everything else becomes a text value.
///
/// If any stream part was produced the plan is multipart and contains every
/// field; otherwise it is a form plan. An empty bag yields an empty form plan.
///
/// On error, files opened so far are closed before returning.
pub fn encode_params(params: &ParameterBag) -> EncodeResult<EncodingPlan> {
    let mut parts: Vec<Part> = Vec::with_capacity(params.len());
    let mut streams = 0usize;

    for (key, value) in params.iter() {
        if value.is_null() {
            continue;
        }

        if key == MEDIA_FIELD {
            let normalized = normalize_media(value)?;
            streams += normalized.attachments.len();
            parts.extend(normalized.attachments);
            parts.push(Part::text(key, normalized.payload));
            continue;
        }

        if let Some(file) = resolve(key, value)? {
            streams += 1;
            parts.push(Part::stream(key, file));
            continue;
        }

        parts.push(Part::text(key, literal(value)?));
    }

    if streams > 0 {
        debug!(parts = parts.len(), streams, "Encoding parameters as multipart");
        return Ok(EncodingPlan::Multipart(parts));
    }

    let fields = parts
        .into_iter()
        .filter_map(|part| match part.contents {
            PartContents::Text(text) => Some((part.name, text)),
            PartContents::Stream(_) => None,
        })
        .collect::<Vec<_>>();
    debug!(fields = fields.len(), "Encoding parameters as form");
    Ok(EncodingPlan::Form(fields))
}

fn literal(value: &ParamValue) -> EncodeResult<String> {
    match value {
        ParamValue::Media(entries) => {
            serde_json::to_string(entries).map_err(|e| EncodeError::MediaSerialize(e.to_string()))
        }
        other => Ok(other.to_form_value().unwrap_or_default()),
    }
}
