//! Plain Bot API entities.
//!
//! These carry no nested entity that needs lazy hydration, so they are
//! decoded eagerly. Every field is optional and unknown keys are ignored.

use serde::{Deserialize, Serialize};

/// A Telegram user or bot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    #[serde(default)]
    pub id: Option<i64>,
    /// True if this user is a bot.
    #[serde(default)]
    pub is_bot: Option<bool>,
    /// First name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Username, without the leading `@`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// IETF language tag of the user's client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    /// Whether the bot can be invited to groups (`getMe` only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_join_groups: Option<bool>,
}

impl User {
    /// First and last name joined by a space.
    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A chat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    /// Unique identifier.
    #[serde(default)]
    pub id: Option<i64>,
    /// One of `private`, `group`, `supergroup` or `channel`.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Title, for groups and channels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Username, for private chats and public groups or channels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// First name of the other party in a private chat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name of the other party in a private chat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Description (`getChat` only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Invite link (`getChat` only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invite_link: Option<String>,
}

impl Chat {
    /// Returns true for a one-to-one chat.
    pub fn is_private(&self) -> bool {
        self.kind.as_deref() == Some("private")
    }
}

/// One size of a photo or a file thumbnail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoSize {
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub file_unique_id: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub file_size: Option<u64>,
}

/// An audio file to be treated as music.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Audio {
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub file_unique_id: Option<String>,
    /// Duration in seconds.
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub performer: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default, alias = "thumb")]
    pub thumbnail: Option<PhotoSize>,
}

/// A general file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub file_unique_id: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default, alias = "thumb")]
    pub thumbnail: Option<PhotoSize>,
}

/// A video file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Video {
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub file_unique_id: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default, alias = "thumb")]
    pub thumbnail: Option<PhotoSize>,
}

/// An animation (GIF or H.264/MPEG-4 AVC video without sound).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub file_unique_id: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default, alias = "thumb")]
    pub thumbnail: Option<PhotoSize>,
}

/// A voice note.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Voice {
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub file_unique_id: Option<String>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
}

/// A round video message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoNote {
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub file_unique_id: Option<String>,
    /// Width and height (diameter).
    #[serde(default)]
    pub length: Option<u32>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default, alias = "thumb")]
    pub thumbnail: Option<PhotoSize>,
}

/// A sticker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sticker {
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub file_unique_id: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub is_animated: Option<bool>,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub set_name: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
}

/// A phone contact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub vcard: Option<String>,
}

/// A point on the map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub latitude: Option<f64>,
}

/// A file ready to be downloaded.
///
/// The download link is `{api_url}/file/bot<token>/<file_path>`, see
/// [`TelegramBot::file_url`](crate::TelegramBot::file_url). It stays valid for
/// at least one hour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct File {
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub file_unique_id: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub file_path: Option<String>,
}

/// A special entity in a text message (hashtag, URL, bot command, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageEntity {
    /// Entity type, e.g. `bot_command` or `url`.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Offset in UTF-16 code units.
    #[serde(default)]
    pub offset: Option<usize>,
    /// Length in UTF-16 code units.
    #[serde(default)]
    pub length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Current webhook status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookInfo {
    /// Webhook URL, empty if not set up.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub has_custom_certificate: Option<bool>,
    #[serde(default)]
    pub pending_update_count: Option<u32>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub last_error_date: Option<i64>,
    #[serde(default)]
    pub last_error_message: Option<String>,
    #[serde(default)]
    pub max_connections: Option<u32>,
    #[serde(default)]
    pub allowed_updates: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_full_name() {
        let user: User = serde_json::from_value(json!({
            "id": 1, "is_bot": false, "first_name": "Ada", "last_name": "Lovelace"
        }))
        .unwrap();
        assert_eq!(user.full_name(), "Ada Lovelace");

        let user: User = serde_json::from_value(json!({"id": 2, "first_name": "Bot"})).unwrap();
        assert_eq!(user.full_name(), "Bot");
    }

    #[test]
    fn test_legacy_thumb_alias() {
        let doc: Document = serde_json::from_value(json!({
            "file_id": "abc", "thumb": {"file_id": "t", "width": 90, "height": 90}
        }))
        .unwrap();
        assert_eq!(doc.thumbnail.unwrap().width, Some(90));
    }
}
