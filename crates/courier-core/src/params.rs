//! Loosely-typed API parameters.
//!
//! A [`ParameterBag`] is what a caller hands to a Bot API method: an ordered
//! set of named values. Values are scalars (anything JSON can express),
//! explicit local files, or grouped media items.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Media Items
// =============================================================================

/// The `type` tag of a media item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Photo,
    Video,
    Animation,
    Audio,
    Document,
}

impl MediaKind {
    /// Returns the wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Video => "video",
            Self::Animation => "animation",
            Self::Audio => "audio",
            Self::Document => "document",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One element of a media group (an album), or the payload of a single media edit.
///
/// `media` and `thumbnail` may each be a remote file id, a URL, or a path to a
/// local file. Local files are uploaded and the reference is rewritten to
/// `attach://<part name>` when the request is encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputMedia {
    /// Kind of media.
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// File to send.
    pub media: String,
    /// Optional thumbnail (audio, document, video and animation only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Optional caption, 0-1024 characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Caption parse mode (`MarkdownV2`, `HTML`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<String>,
    /// Any further kind-specific fields (width, duration, has_spoiler, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InputMedia {
    /// Creates a media item of the given kind.
    pub fn new(kind: MediaKind, media: impl Into<String>) -> Self {
        Self {
            kind,
            media: media.into(),
            thumbnail: None,
            caption: None,
            parse_mode: None,
            extra: Map::new(),
        }
    }

    /// Creates a photo item.
    pub fn photo(media: impl Into<String>) -> Self {
        Self::new(MediaKind::Photo, media)
    }

    /// Creates a video item.
    pub fn video(media: impl Into<String>) -> Self {
        Self::new(MediaKind::Video, media)
    }

    /// Creates an animation item.
    pub fn animation(media: impl Into<String>) -> Self {
        Self::new(MediaKind::Animation, media)
    }

    /// Creates an audio item.
    pub fn audio(media: impl Into<String>) -> Self {
        Self::new(MediaKind::Audio, media)
    }

    /// Creates a document item.
    pub fn document(media: impl Into<String>) -> Self {
        Self::new(MediaKind::Document, media)
    }

    /// Sets the caption.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Sets the caption parse mode.
    pub fn with_parse_mode(mut self, parse_mode: impl Into<String>) -> Self {
        self.parse_mode = Some(parse_mode.into());
        self
    }

    /// Sets the thumbnail reference.
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    /// Sets an additional field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// An entry bound to the `media` parameter.
///
/// Only [`MediaEntry::Item`] takes part in file extraction; raw values are
/// serialized exactly as given.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MediaEntry {
    /// A structured media item.
    Item(InputMedia),
    /// Anything else; passed through untouched.
    Raw(Value),
}

impl From<InputMedia> for MediaEntry {
    fn from(media: InputMedia) -> Self {
        Self::Item(media)
    }
}

impl From<Value> for MediaEntry {
    fn from(value: Value) -> Self {
        Self::Raw(value)
    }
}

// =============================================================================
// ParamValue
// =============================================================================

/// A single parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Plain value. Strings that name an existing local file under an
    /// attachment-capable field are uploaded.
    Scalar(Value),
    /// Explicit local file, uploaded under whatever field it is bound to.
    File(PathBuf),
    /// Media group entries.
    Media(Vec<MediaEntry>),
}

impl ParamValue {
    /// Serializes any value into a scalar.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Self::Scalar)
    }

    /// Returns the string content if this is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Returns true for a JSON `null` scalar.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(Value::Null))
    }

    /// Coerces a scalar into its wire text.
    ///
    /// Strings are sent verbatim, numbers and booleans by their textual form,
    /// objects and arrays JSON-encoded. Files and media have no scalar form.
    pub fn to_form_value(&self) -> Option<String> {
        match self {
            Self::Scalar(value) => Some(scalar_to_string(value)),
            Self::File(_) | Self::Media(_) => None,
        }
    }
}

pub(crate) fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

macro_rules! impl_scalar_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    Self::Scalar(Value::from(value))
                }
            }
        )*
    };
}

impl_scalar_from!(&str, String, i32, i64, u32, u64, f64, bool);

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        Self::Scalar(value)
    }
}

impl From<PathBuf> for ParamValue {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

impl From<&Path> for ParamValue {
    fn from(path: &Path) -> Self {
        Self::File(path.to_path_buf())
    }
}

impl From<InputMedia> for ParamValue {
    fn from(media: InputMedia) -> Self {
        Self::Media(vec![MediaEntry::Item(media)])
    }
}

impl From<Vec<InputMedia>> for ParamValue {
    fn from(media: Vec<InputMedia>) -> Self {
        Self::Media(media.into_iter().map(MediaEntry::Item).collect())
    }
}

impl From<Vec<MediaEntry>> for ParamValue {
    fn from(media: Vec<MediaEntry>) -> Self {
        Self::Media(media)
    }
}

// =============================================================================
// ParameterBag
// =============================================================================

/// Ordered named parameters for one API call.
///
/// Insertion order is kept so encoded requests are deterministic. Inserting an
/// existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterBag {
    entries: Vec<(String, ParamValue)>,
}

impl ParameterBag {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds a parameter only if a value is present.
    pub fn with_opt<V: Into<ParamValue>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    /// Inserts or replaces a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Looks up a parameter by name.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Removes a parameter, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParameterBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bag = Self::new();
        for (k, v) in iter {
            bag.insert(k, v);
        }
        bag
    }
}

impl<K: Into<String>, V: Into<ParamValue>> Extend<(K, V)> for ParameterBag {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for ParameterBag {
    type Item = (String, ParamValue);
    type IntoIter = std::vec::IntoIter<(String, ParamValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
