//! Courier Runtime - configuration, logging and update loops.
//!
//! This crate provides:
//! - Layered configuration (`CourierConfig`, `ConfigLoader`)
//! - Logging setup driven by that configuration
//! - Runtime orchestration (`CourierRuntime`): long polling or webhook
//!
//! ```ignore
//! use courier_runtime::CourierRuntime;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Reads courier.toml and COURIER_* variables
//!     let runtime = CourierRuntime::new()?;
//!
//!     runtime
//!         .run_polling(|bot, update| async move {
//!             let Some(message) = update.message() else { return };
//!             // ...
//!         })
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [telegram]
//! bot_token = "123456:ABC-DEF"
//! proxy = "user:pass@127.0.0.1:1080"
//!
//! [webhook]
//! port = 8443
//! public_url = "https://bot.example.com/webhook"
//! ```
//!
//! Any key can be overridden from the environment, e.g.
//! `COURIER_TELEGRAM__BOT_TOKEN`.

pub mod config;
pub mod error;
pub mod logging;
pub mod runtime;

// Re-exports
pub use config::{
    ConfigError, ConfigLoader, ConfigResult, CourierConfig, LoggingConfig, Profile,
    TelegramConfig, WebhookConfig,
};
pub use error::{RuntimeError, RuntimeResult};
pub use logging::LoggingBuilder;
pub use runtime::{CourierRuntime, RuntimeBuilder};

// Re-export tracing for use by other crates
pub use tracing;
pub use tracing_subscriber;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
}
