//! # Courier
//!
//! An outbound Telegram Bot API client.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌────────────────────┐     ┌─────────────┐
//! │   Runtime   │────▶│ TelegramBot  │────▶│ Core: encode plan  │────▶│  Transport  │──▶ api.telegram.org
//! │ poll/webhook│     │ typed calls  │◀────│ decode + hydrate   │◀────│ reqwest/axum│
//! └─────────────┘     └──────────────┘     └────────────────────┘     └─────────────┘
//! ```
//!
//! - **Core**: file detection, media normalization, form/multipart choice,
//!   response envelopes and lazily hydrated entities
//! - **Transport**: the HTTP client and the webhook listener
//! - **Telegram**: the bot client and the Bot API entity model
//! - **Runtime**: configuration, logging and update loops
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use courier::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let runtime = CourierRuntime::new()?;
//!     runtime
//!         .run_polling(|bot, update| async move {
//!             if let Some(chat_id) = update.message().and_then(Message::chat_id) {
//!                 let _ = bot
//!                     .send_photo(chat_id, "/tmp/cat.jpg", ParameterBag::new())
//!                     .await;
//!             }
//!         })
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `toml-config`: TOML configuration files (default)
//! - `yaml-config`: YAML configuration files
//! - `json-log`: JSON log output

pub use courier_core as core;
pub use courier_runtime as runtime;
pub use courier_telegram as telegram;
pub use courier_transport as transport;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use courier::prelude::*;
/// ```
pub mod prelude {
    // Runtime - main entry point
    pub use courier_runtime::{CourierConfig, CourierRuntime, RuntimeError, RuntimeResult};

    // Client and parameters
    pub use courier_core::{ApiError, ApiResult, InputMedia, ParamValue, ParameterBag};
    pub use courier_telegram::TelegramBot;

    // Entities
    pub use courier_telegram::{
        CallbackQuery, Chat, File, InlineKeyboardButton, InlineKeyboardMarkup, Input, Message,
        ReplyMarkup, Update, User,
    };
}
