//! Bot API entity catalog.
//!
//! Every entity is a serde struct of optional fields. Nested entities that
//! can be large or recursive are declared as
//! [`Virtual`](courier_core::Virtual) and hydrated on first read.

pub mod markup;
pub mod message;
pub mod types;
pub mod update;

pub use markup::{
    ForceReply, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, ReplyKeyboardMarkup,
    ReplyKeyboardRemove, ReplyMarkup,
};
pub use message::{Command, Message};
pub use types::{
    Animation, Audio, Chat, Contact, Document, File, Location, MessageEntity, PhotoSize, Sticker,
    User, Video, VideoNote, Voice, WebhookInfo,
};
pub use update::{CallbackQuery, Update};
