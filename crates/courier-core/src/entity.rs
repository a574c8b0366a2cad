//! Entity hydration.
//!
//! Entities are plain serde structs whose fields are all optional; unknown
//! keys are ignored so new upstream fields never break decoding. Fields that
//! hold another entity can be declared as [`Virtual`]: the raw JSON is kept
//! at hydration time and the typed entity is built on first read, then cached.
//!
//! ```rust,ignore
//! #[derive(Debug, Clone, Default, Serialize, Deserialize)]
//! pub struct Message {
//!     #[serde(default)]
//!     pub message_id: Option<i64>,
//!     #[serde(default, skip_serializing_if = "Option::is_none")]
//!     chat: Option<Virtual<Chat>>,
//! }
//!
//! impl Message {
//!     pub fn chat(&self) -> Option<&Chat> {
//!         self.chat.as_ref().and_then(Virtual::get)
//!     }
//! }
//! ```

use std::fmt;
use std::sync::OnceLock;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::warn;

use crate::error::{ApiError, ApiResult};

/// Hydrates a raw JSON value into an entity.
pub fn hydrate<T: DeserializeOwned>(raw: Value) -> ApiResult<T> {
    serde_json::from_value(raw).map_err(ApiError::from)
}

/// A lazily typed entity field.
///
/// Holds the raw sub-object and a per-instance cache slot. The typed value is
/// constructed at most once; later reads return the same instance. Cloning
/// copies the raw value only, so clones never share a cache.
pub struct Virtual<T> {
    raw: Value,
    cell: OnceLock<Box<T>>,
}

impl<T> Virtual<T> {
    /// Wraps a raw value without hydrating it.
    pub fn from_raw(raw: Value) -> Self {
        Self {
            raw,
            cell: OnceLock::new(),
        }
    }

    /// The raw JSON this field was hydrated from.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Returns true once the typed value has been built.
    pub fn is_hydrated(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T: DeserializeOwned> Virtual<T> {
    /// Returns the typed value, building it on first access.
    pub fn try_get(&self) -> ApiResult<&T> {
        if let Some(value) = self.cell.get() {
            return Ok(value);
        }
        let value: T = serde_json::from_value(self.raw.clone())?;
        // A concurrent reader may have won the race; either value is equivalent.
        Ok(self.cell.get_or_init(|| Box::new(value)))
    }

    /// Returns the typed value, or `None` if the raw value does not fit the type.
    pub fn get(&self) -> Option<&T> {
        match self.try_get() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(
                    entity = std::any::type_name::<T>(),
                    error = %e,
                    "Failed to hydrate nested entity"
                );
                None
            }
        }
    }
}

impl<T: Serialize> Virtual<T> {
    /// Wraps an already typed value, keeping the raw form in sync.
    pub fn new(value: T) -> ApiResult<Self> {
        let raw = serde_json::to_value(&value)?;
        let cell = OnceLock::new();
        let _ = cell.set(Box::new(value));
        Ok(Self { raw, cell })
    }

    /// Replaces the field with a fresh typed value.
    pub fn set(&mut self, value: T) -> ApiResult<()> {
        *self = Self::new(value)?;
        Ok(())
    }
}

impl<T> Clone for Virtual<T> {
    fn clone(&self) -> Self {
        Self::from_raw(self.raw.clone())
    }
}

impl<T> PartialEq for Virtual<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T> fmt::Debug for Virtual<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Virtual")
            .field("raw", &self.raw)
            .field("hydrated", &self.is_hydrated())
            .finish()
    }
}

impl<T> Serialize for Virtual<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Virtual<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_raw)
    }
}
