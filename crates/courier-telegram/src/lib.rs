//! # Courier Telegram
//!
//! Telegram Bot API client built on `courier-core`.
//!
//! - [`TelegramBot`]: generic [`send`](TelegramBot::send) plus typed methods
//! - [`model`]: the entity catalog ([`Message`], [`Update`], [`Chat`], ...)
//! - [`Input`]: one inbound webhook request
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use courier_core::{ParameterBag, TransportConfig};
//! use courier_telegram::TelegramBot;
//! use courier_transport::HttpTransport;
//!
//! let transport = Arc::new(HttpTransport::new(TransportConfig::default())?);
//! let bot = TelegramBot::new(transport, "123456:ABC");
//!
//! for update in bot.get_updates(ParameterBag::new().with("timeout", 30)).await? {
//!     if let Some(chat_id) = update.message().and_then(|m| m.chat_id()) {
//!         bot.send_message(chat_id, "pong", ParameterBag::new()).await?;
//!     }
//! }
//! ```

pub mod bot;
pub mod input;
pub mod model;

pub use bot::TelegramBot;
pub use input::Input;
pub use model::{
    CallbackQuery, Chat, Command, File, InlineKeyboardButton, InlineKeyboardMarkup, Message,
    ReplyMarkup, Update, User,
};
