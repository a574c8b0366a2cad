//! Webhook input.

use std::sync::OnceLock;

use serde_json::{Map, Value};
use tracing::warn;

use courier_core::{InboundBody, hydrate};

use crate::model::{Message, Update};

/// One inbound webhook request.
///
/// The body is read and parsed once; the [`Update`] is hydrated once. An empty
/// or malformed body is "no input": every accessor returns `None`.
#[derive(Debug)]
pub struct Input {
    body: InboundBody,
    update: OnceLock<Option<Update>>,
}

impl Input {
    /// Wraps an inbound body.
    pub fn new(body: InboundBody) -> Self {
        Self {
            body,
            update: OnceLock::new(),
        }
    }

    /// The raw JSON object of the request.
    pub fn json(&self) -> Option<&Map<String, Value>> {
        self.body.json()
    }

    /// The update carried by this request.
    pub fn update(&self) -> Option<&Update> {
        self.update
            .get_or_init(|| {
                let raw = Value::Object(self.json()?.clone());
                hydrate(raw)
                    .inspect_err(|e| warn!(error = %e, "Webhook body is not a valid update"))
                    .ok()
            })
            .as_ref()
    }

    /// Shortcut for [`Update::effective_message`].
    pub fn message(&self) -> Option<&Message> {
        self.update()?.effective_message()
    }

    /// Chat of the carried message.
    pub fn chat_id(&self) -> Option<i64> {
        self.message()?.chat_id()
    }

    /// Text of the carried message.
    pub fn text(&self) -> Option<&str> {
        self.message()?.text.as_deref()
    }
}

impl From<InboundBody> for Input {
    fn from(body: InboundBody) -> Self {
        Self::new(body)
    }
}
