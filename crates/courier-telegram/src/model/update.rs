//! Incoming updates.

use serde::{Deserialize, Serialize};

use courier_core::Virtual;

use super::message::Message;
use super::types::User;

/// An incoming callback query from an inline keyboard button.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub from: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<Virtual<Message>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_instance: Option<String>,
    /// Data attached to the pressed button.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl CallbackQuery {
    /// Message carrying the pressed button, if it is not too old.
    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref().and_then(Virtual::get)
    }
}

/// One incoming update, from `getUpdates` or a webhook.
///
/// At most one of the optional payloads is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Update {
    /// Update identifier; pass `update_id + 1` as the next polling offset.
    #[serde(default)]
    pub update_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<Virtual<Message>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    edited_message: Option<Virtual<Message>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    channel_post: Option<Virtual<Message>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    edited_channel_post: Option<Virtual<Message>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    callback_query: Option<Virtual<CallbackQuery>>,
}

impl Update {
    /// New incoming message.
    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref().and_then(Virtual::get)
    }

    /// New version of a known message.
    pub fn edited_message(&self) -> Option<&Message> {
        self.edited_message.as_ref().and_then(Virtual::get)
    }

    /// New channel post.
    pub fn channel_post(&self) -> Option<&Message> {
        self.channel_post.as_ref().and_then(Virtual::get)
    }

    /// New version of a known channel post.
    pub fn edited_channel_post(&self) -> Option<&Message> {
        self.edited_channel_post.as_ref().and_then(Virtual::get)
    }

    /// New callback query.
    pub fn callback_query(&self) -> Option<&CallbackQuery> {
        self.callback_query.as_ref().and_then(Virtual::get)
    }

    /// Whichever message this update carries, including the one behind a
    /// callback query.
    pub fn effective_message(&self) -> Option<&Message> {
        self.message()
            .or_else(|| self.edited_message())
            .or_else(|| self.channel_post())
            .or_else(|| self.edited_channel_post())
            .or_else(|| self.callback_query().and_then(CallbackQuery::message))
    }

    /// Offset that acknowledges this update in the next `getUpdates` call.
    pub fn next_offset(&self) -> Option<i64> {
        self.update_id.map(|id| id + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::hydrate;
    use serde_json::json;

    #[test]
    fn test_effective_message() {
        let update: Update = hydrate(json!({
            "update_id": 100,
            "edited_message": {"message_id": 4, "text": "edited"}
        }))
        .unwrap();
        assert!(update.message().is_none());
        assert_eq!(
            update.effective_message().unwrap().text.as_deref(),
            Some("edited")
        );
        assert_eq!(update.next_offset(), Some(101));
    }

    #[test]
    fn test_callback_query_message() {
        let update: Update = hydrate(json!({
            "update_id": 1,
            "callback_query": {
                "id": "q1",
                "from": {"id": 9, "first_name": "Bob"},
                "data": "yes",
                "message": {"message_id": 8, "chat": {"id": 9, "type": "private"}}
            }
        }))
        .unwrap();
        let query = update.callback_query().unwrap();
        assert_eq!(query.data.as_deref(), Some("yes"));
        assert_eq!(update.effective_message().unwrap().chat_id(), Some(9));
    }
}
