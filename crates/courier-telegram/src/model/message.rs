//! The `Message` entity.
//!
//! Sender, chat, forward origin and the replied-to / pinned messages are
//! [`Virtual`] fields: kept raw at hydration, typed on first read. This keeps
//! decoding of deeply nested reply chains proportional to what is read.

use serde::{Deserialize, Serialize};

use courier_core::{ApiResult, Virtual};

use super::markup::InlineKeyboardMarkup;
use super::types::{
    Animation, Audio, Chat, Contact, Document, Location, MessageEntity, PhotoSize, Sticker, User,
    Video, VideoNote, Voice,
};

/// A message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier inside its chat.
    #[serde(default)]
    pub message_id: Option<i64>,
    /// Unix time the message was sent.
    #[serde(default)]
    pub date: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    from: Option<Virtual<User>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    chat: Option<Virtual<Chat>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    forward_from: Option<Virtual<User>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    forward_from_chat: Option<Virtual<Chat>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reply_to_message: Option<Virtual<Message>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pinned_message: Option<Virtual<Message>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_from_message_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_sender_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_date: Option<i64>,
    /// Album this message belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_signature: Option<String>,

    /// UTF-8 text of a text message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<MessageEntity>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption_entities: Option<Vec<MessageEntity>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<Audio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<Document>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
    /// Available sizes of a photo, smallest first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<Vec<PhotoSize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticker: Option<Sticker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<Video>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<Voice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_note: Option<VideoNote>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_chat_members: Option<Vec<User>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_chat_member: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_chat_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_chat_photo: Option<Vec<PhotoSize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_chat_photo: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_chat_created: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supergroup_chat_created: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_chat_created: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migrate_to_chat_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migrate_from_chat_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

/// Generates the getter / setter pair of a virtual field.
macro_rules! virtual_fields {
    ($($(#[$meta:meta])* $field:ident, $setter:ident: $ty:ty;)*) => {
        $(
            $(#[$meta])*
            pub fn $field(&self) -> Option<&$ty> {
                self.$field.as_ref().and_then(Virtual::get)
            }

            #[doc = concat!("Replaces `", stringify!($field), "` with a typed value.")]
            pub fn $setter(&mut self, value: $ty) -> ApiResult<()> {
                self.$field = Some(Virtual::new(value)?);
                Ok(())
            }
        )*
    };
}

impl Message {
    virtual_fields! {
        /// Sender; empty for messages sent to channels.
        from, set_from: User;
        /// Conversation the message belongs to.
        chat, set_chat: Chat;
        /// Sender of the original message, for forwards.
        forward_from, set_forward_from: User;
        /// Original channel, for forwards from channels.
        forward_from_chat, set_forward_from_chat: Chat;
        /// The message this one replies to.
        reply_to_message, set_reply_to_message: Message;
        /// The pinned message, for pin service messages.
        pinned_message, set_pinned_message: Message;
    }

    /// Identifier of the conversation, without hydrating anything else.
    pub fn chat_id(&self) -> Option<i64> {
        self.chat().and_then(|chat| chat.id)
    }

    /// Text or caption, whichever is present.
    pub fn text_or_caption(&self) -> Option<&str> {
        self.text.as_deref().or(self.caption.as_deref())
    }

    /// Parses a leading `/command[@bot] args` out of the text.
    pub fn command(&self) -> Option<Command<'_>> {
        Command::parse(self.text.as_deref()?)
    }
}

/// A bot command at the start of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command<'a> {
    /// Command name without the leading `/`.
    pub name: &'a str,
    /// Addressed bot username, if written as `/cmd@bot`.
    pub mention: Option<&'a str>,
    /// Remaining text after the command, trimmed.
    pub args: &'a str,
}

impl<'a> Command<'a> {
    /// Parses `text`; `None` unless it starts with `/`.
    pub fn parse(text: &'a str) -> Option<Self> {
        let rest = text.strip_prefix('/')?;
        let (head, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        let (name, mention) = match head.split_once('@') {
            Some((name, mention)) => (name, Some(mention)),
            None => (head, None),
        };
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name,
            mention,
            args: args.trim(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::hydrate;
    use serde_json::json;

    #[test]
    fn test_virtual_fields_hydrate_lazily() {
        let msg: Message = hydrate(json!({
            "message_id": 10,
            "from": {"id": 7, "is_bot": false, "first_name": "Ada"},
            "chat": {"id": -100, "type": "supergroup", "title": "Rust"},
            "text": "hi"
        }))
        .unwrap();

        let raw_chat = msg.chat.as_ref().unwrap();
        assert!(!raw_chat.is_hydrated());
        assert_eq!(msg.chat_id(), Some(-100));
        assert!(raw_chat.is_hydrated());
        assert!(std::ptr::eq(msg.chat().unwrap(), msg.chat().unwrap()));
        assert!(!msg.from.as_ref().unwrap().is_hydrated());
        assert_eq!(msg.from().unwrap().first_name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_reply_chain() {
        let msg: Message = hydrate(json!({
            "message_id": 3,
            "reply_to_message": {
                "message_id": 2,
                "pinned_message": {"message_id": 1, "text": "pinned"}
            }
        }))
        .unwrap();
        let parent = msg.reply_to_message().unwrap();
        assert_eq!(parent.message_id, Some(2));
        assert_eq!(
            parent.pinned_message().unwrap().text.as_deref(),
            Some("pinned")
        );
    }

    #[test]
    fn test_setter_replaces_raw() {
        let mut msg = Message::default();
        msg.set_chat(Chat {
            id: Some(5),
            kind: Some("private".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(msg.chat_id(), Some(5));
        assert_eq!(
            serde_json::to_value(&msg).unwrap()["chat"],
            json!({"id": 5, "type": "private"})
        );
    }

    #[test]
    fn test_command_parsing() {
        let cmd = Command::parse("/start@courier_bot  hello there ").unwrap();
        assert_eq!(cmd.name, "start");
        assert_eq!(cmd.mention, Some("courier_bot"));
        assert_eq!(cmd.args, "hello there");

        let cmd = Command::parse("/help").unwrap();
        assert_eq!(cmd.mention, None);
        assert_eq!(cmd.args, "");

        assert!(Command::parse("hello").is_none());
        assert!(Command::parse("/ x").is_none());
    }
}
