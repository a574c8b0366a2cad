//! Configuration module for the Courier runtime.
//!
//! This module provides layered configuration loading (defaults, files,
//! environment) and validation for the bot client, webhook listener and
//! logging.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, Profile};
pub use schema::{
    CourierConfig, LogFormat, LogLevel, LogOutput, LoggingConfig, SpanEventConfig,
    TelegramConfig, WebhookConfig,
};
pub use validation::validate_config;
