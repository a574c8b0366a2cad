//! Telegram Bot API client.
//!
//! [`TelegramBot`] turns a method name and a [`ParameterBag`] into one HTTP
//! call and decodes the answer:
//!
//! ```text
//! send(method, params)
//!   ├── encode_params     form or multipart, local files opened
//!   ├── Transport::send   POST {api_url}/bot<token>/<method>
//!   └── decode_response   ok → result, !ok → ApiError::Upstream
//! ```
//!
//! The typed methods below are thin wrappers that build the bag and hydrate
//! the result.
//!
//! # Usage
//!
//! ```rust,ignore
//! let bot = TelegramBot::new(transport, "123456:ABC");
//! let me = bot.get_me().await?;
//!
//! // Local path under an attachment field: uploaded as multipart.
//! bot.send_photo(chat_id, "/tmp/cat.jpg", ParameterBag::new().with("caption", "cat"))
//!     .await?;
//! ```

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};

use courier_core::{
    ApiResult, BoxedTransport, DEFAULT_API_URL, InputMedia, ParamValue, ParameterBag,
    decode_response, encode_params, hydrate,
};

use crate::model::{Chat, File, Message, Update, User, WebhookInfo};

// =============================================================================
// TelegramBot
// =============================================================================

/// A Bot API client bound to one bot token.
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct TelegramBot {
    transport: BoxedTransport,
    token: String,
    api_url: String,
    username: Option<String>,
}

impl TelegramBot {
    /// Creates a client for `token` over `transport`.
    pub fn new(transport: BoxedTransport, token: impl Into<String>) -> Self {
        Self {
            transport,
            token: token.into(),
            api_url: DEFAULT_API_URL.to_string(),
            username: None,
        }
    }

    /// Sets the API base URL used for file download links.
    ///
    /// Requests themselves go wherever the transport is configured to send them.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Sets the bot's username, used to match `/command@username`.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        let username = username.into();
        self.username = Some(username.trim_start_matches('@').to_string());
        self
    }

    /// The bot's username, if known.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// The API base URL.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Calls `method` and returns the raw `result`.
    ///
    /// Encoding errors abort before anything is sent. Opened files are closed
    /// when this returns, whatever the outcome.
    pub async fn send(&self, method: &str, params: ParameterBag) -> ApiResult<Value> {
        let plan = encode_params(&params)?;
        debug!(method = %method, encoding = plan.kind(), fields = plan.len(), "Calling Bot API");

        let path = format!("bot{}/{}", self.token, method);
        let response = self.transport.send(&path, plan).await?;
        trace!(method = %method, status = response.status, len = response.body.len(), "Bot API responded");

        decode_response(response.status, &response.body)
    }

    /// Calls `method` and hydrates the result into `T`.
    pub async fn call<T: DeserializeOwned>(&self, method: &str, params: ParameterBag) -> ApiResult<T> {
        hydrate(self.send(method, params).await?)
    }

    /// Download link for a file returned by [`get_file`](Self::get_file).
    ///
    /// `None` if the server did not provide a `file_path`.
    pub fn file_url(&self, file: &File) -> Option<String> {
        let file_path = file.file_path.as_deref()?;
        Some(format!(
            "{}/file/bot{}/{}",
            self.api_url.trim_end_matches('/'),
            self.token,
            file_path.trim_start_matches('/')
        ))
    }

    /// Returns true if the message starts with a command meant for this bot.
    ///
    /// A bare `/command` is always for us. `/command@name` is only when `name`
    /// matches the configured username (case-insensitively).
    pub fn is_command_for_me(&self, message: &Message) -> bool {
        let Some(command) = message.command() else {
            return false;
        };
        match (command.mention, self.username()) {
            (None, _) => true,
            (Some(mention), Some(username)) => mention.eq_ignore_ascii_case(username),
            (Some(_), None) => false,
        }
    }
}

// The token is a credential.
impl fmt::Debug for TelegramBot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramBot")
            .field("api_url", &self.api_url)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Typed API
// =============================================================================

macro_rules! impl_api {
    // Required arguments plus a bag of optional parameters.
    ($(#[$meta:meta])* $name:ident => $method:literal, ($($arg:ident: $typ:ty),*; options) -> $ret:ty $(,)?) => {
        $(#[$meta])*
        pub async fn $name(&self, $($arg: $typ,)* options: ParameterBag) -> ApiResult<$ret> {
            let mut params = ParameterBag::new()$(.with(stringify!($arg), $arg))*;
            params.extend(options);
            self.call($method, params).await
        }
    };
    // Required arguments only.
    ($(#[$meta:meta])* $name:ident => $method:literal, ($($arg:ident: $typ:ty),*) -> $ret:ty $(,)?) => {
        $(#[$meta])*
        pub async fn $name(&self, $($arg: $typ),*) -> ApiResult<$ret> {
            let params = ParameterBag::new()$(.with(stringify!($arg), $arg))*;
            self.call($method, params).await
        }
    };
}

impl TelegramBot {
    // =========================================================================
    // Bot and Updates
    // =========================================================================

    impl_api!(
        /// Returns basic information about the bot.
        get_me => "getMe",
        () -> User
    );

    impl_api!(
        /// Long-polls for updates (`offset`, `limit`, `timeout`,
        /// `allowed_updates` go in `options`).
        get_updates => "getUpdates",
        (; options) -> Vec<Update>
    );

    impl_api!(
        /// Registers a webhook URL (`secret_token`, `max_connections`,
        /// `certificate` go in `options`).
        set_webhook => "setWebhook",
        (url: &str; options) -> bool
    );

    impl_api!(
        /// Removes the webhook.
        delete_webhook => "deleteWebhook",
        (; options) -> bool
    );

    impl_api!(
        /// Returns the current webhook status.
        get_webhook_info => "getWebhookInfo",
        () -> WebhookInfo
    );

    // =========================================================================
    // Sending
    // =========================================================================

    impl_api!(
        /// Sends a text message.
        send_message => "sendMessage",
        (chat_id: impl Into<ParamValue>, text: &str; options) -> Message
    );

    impl_api!(
        /// Forwards a message.
        forward_message => "forwardMessage",
        (chat_id: impl Into<ParamValue>, from_chat_id: impl Into<ParamValue>, message_id: i64; options) -> Message
    );

    impl_api!(
        /// Sends a photo: a file id, a URL or a local path.
        send_photo => "sendPhoto",
        (chat_id: impl Into<ParamValue>, photo: impl Into<ParamValue>; options) -> Message
    );

    impl_api!(
        /// Sends an audio file.
        send_audio => "sendAudio",
        (chat_id: impl Into<ParamValue>, audio: impl Into<ParamValue>; options) -> Message
    );

    impl_api!(
        /// Sends a general file.
        send_document => "sendDocument",
        (chat_id: impl Into<ParamValue>, document: impl Into<ParamValue>; options) -> Message
    );

    impl_api!(
        /// Sends a video.
        send_video => "sendVideo",
        (chat_id: impl Into<ParamValue>, video: impl Into<ParamValue>; options) -> Message
    );

    impl_api!(
        /// Sends an animation.
        send_animation => "sendAnimation",
        (chat_id: impl Into<ParamValue>, animation: impl Into<ParamValue>; options) -> Message
    );

    impl_api!(
        /// Sends a voice note.
        send_voice => "sendVoice",
        (chat_id: impl Into<ParamValue>, voice: impl Into<ParamValue>; options) -> Message
    );

    impl_api!(
        /// Sends a round video message.
        send_video_note => "sendVideoNote",
        (chat_id: impl Into<ParamValue>, video_note: impl Into<ParamValue>; options) -> Message
    );

    impl_api!(
        /// Sends a sticker.
        send_sticker => "sendSticker",
        (chat_id: impl Into<ParamValue>, sticker: impl Into<ParamValue>; options) -> Message
    );

    impl_api!(
        /// Sends an album. Local paths in the items are uploaded.
        send_media_group => "sendMediaGroup",
        (chat_id: impl Into<ParamValue>, media: Vec<InputMedia>; options) -> Vec<Message>
    );

    impl_api!(
        /// Sends a point on the map.
        send_location => "sendLocation",
        (chat_id: impl Into<ParamValue>, latitude: f64, longitude: f64; options) -> Message
    );

    impl_api!(
        /// Shows a status such as `typing` or `upload_photo`.
        send_chat_action => "sendChatAction",
        (chat_id: impl Into<ParamValue>, action: &str) -> bool
    );

    // =========================================================================
    // Editing
    // =========================================================================

    impl_api!(
        /// Edits the text of a message sent by the bot.
        edit_message_text => "editMessageText",
        (chat_id: impl Into<ParamValue>, message_id: i64, text: &str; options) -> Message
    );

    impl_api!(
        /// Deletes a message.
        delete_message => "deleteMessage",
        (chat_id: impl Into<ParamValue>, message_id: i64) -> bool
    );

    impl_api!(
        /// Answers a callback query (`text`, `show_alert` go in `options`).
        answer_callback_query => "answerCallbackQuery",
        (callback_query_id: &str; options) -> bool
    );

    // =========================================================================
    // Files and Chats
    // =========================================================================

    impl_api!(
        /// Prepares a file for download; see [`file_url`](Self::file_url).
        get_file => "getFile",
        (file_id: &str) -> File
    );

    impl_api!(
        /// Returns up-to-date information about a chat.
        get_chat => "getChat",
        (chat_id: impl Into<ParamValue>) -> Chat
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use courier_core::{EncodingPlan, RawResponse, Transport, TransportResult};
    use serde_json::json;

    struct NullTransport;

    #[async_trait]
    impl Transport for NullTransport {
        async fn send(&self, _path: &str, _plan: EncodingPlan) -> TransportResult<RawResponse> {
            Ok(RawResponse::new(200, r#"{"ok":true,"result":true}"#))
        }
    }

    fn bot() -> TelegramBot {
        TelegramBot::new(Arc::new(NullTransport), "123:SECRET")
    }

    #[test]
    fn test_file_url() {
        let bot = bot().with_api_url("https://example.org/");
        let file = File {
            file_path: Some("photos/file_0.jpg".into()),
            ..Default::default()
        };
        assert_eq!(
            bot.file_url(&file).as_deref(),
            Some("https://example.org/file/bot123:SECRET/photos/file_0.jpg")
        );
        assert!(bot.file_url(&File::default()).is_none());
    }

    #[test]
    fn test_is_command_for_me() {
        let bot = bot().with_username("@Courier_Bot");
        let message = |text: &str| -> Message { hydrate(json!({"text": text})).unwrap() };

        assert!(bot.is_command_for_me(&message("/start")));
        assert!(bot.is_command_for_me(&message("/start@courier_bot now")));
        assert!(!bot.is_command_for_me(&message("/start@other_bot")));
        assert!(!bot.is_command_for_me(&message("start")));
        assert!(!super::TelegramBot::new(Arc::new(NullTransport), "t")
            .is_command_for_me(&message("/start@courier_bot")));
    }

    #[test]
    fn test_debug_hides_token() {
        assert!(!format!("{:?}", bot()).contains("SECRET"));
    }
}
