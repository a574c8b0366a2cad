//! Memoized inbound request body.
//!
//! A webhook body can be read from its source only once. [`InboundBody`]
//! takes the bytes on first access, parses them, and caches the outcome
//! (including "no usable input") for the rest of the request.

use std::sync::OnceLock;

use bytes::Bytes;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// One inbound request body, parsed at most once.
#[derive(Debug, Default)]
pub struct InboundBody {
    source: Mutex<Option<Bytes>>,
    parsed: OnceLock<Option<Map<String, Value>>>,
}

impl InboundBody {
    /// Wraps raw body bytes.
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self {
            source: Mutex::new(Some(body.into())),
            parsed: OnceLock::new(),
        }
    }

    /// A request that carried no body.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the parsed JSON object, or `None` if the body was empty,
    /// not valid JSON, or not an object.
    pub fn json(&self) -> Option<&Map<String, Value>> {
        self.parsed
            .get_or_init(|| parse_object(self.source.lock().take()))
            .as_ref()
    }

    /// True once the raw bytes have been taken from the source.
    pub fn is_consumed(&self) -> bool {
        self.parsed.get().is_some()
    }
}

fn parse_object(raw: Option<Bytes>) -> Option<Map<String, Value>> {
    let raw = raw.filter(|b| !b.is_empty())?;
    match serde_json::from_slice::<Value>(&raw) {
        Ok(Value::Object(map)) => Some(map),
        Ok(other) => {
            debug!(kind = json_kind(&other), "Inbound body is not a JSON object");
            None
        }
        Err(e) => {
            warn!(error = %e, len = raw.len(), "Ignoring inbound body with invalid JSON");
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_once() {
        let body = InboundBody::new(r#"{"update_id": 10}"#);
        assert!(!body.is_consumed());

        let first = body.json().unwrap();
        assert_eq!(first["update_id"], 10);
        assert!(body.is_consumed());
        assert!(body.source.lock().is_none());

        let second = body.json().unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_empty_and_invalid_bodies_are_no_input() {
        assert!(InboundBody::empty().json().is_none());
        assert!(InboundBody::new("").json().is_none());
        assert!(InboundBody::new("{not json").json().is_none());
        assert!(InboundBody::new("[1,2]").json().is_none());

        let invalid = InboundBody::new("{oops");
        assert!(invalid.json().is_none());
        // The negative outcome is cached as well.
        assert!(invalid.is_consumed());
        assert!(invalid.json().is_none());
    }
}
