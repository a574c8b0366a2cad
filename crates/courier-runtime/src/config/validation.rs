//! Configuration validation utilities.

use super::error::{ConfigError, ConfigResult};
use super::schema::{CourierConfig, TelegramConfig, WebhookConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &CourierConfig) -> ConfigResult<()> {
    validate_telegram_config(&config.telegram)?;
    validate_webhook_config(&config.webhook)?;
    Ok(())
}

/// Validates the Bot API client settings.
fn validate_telegram_config(config: &TelegramConfig) -> ConfigResult<()> {
    if config.bot_token.trim().is_empty() {
        return Err(ConfigError::missing_field("telegram.bot_token"));
    }

    if config.bot_token.contains(char::is_whitespace) || config.bot_token.contains('/') {
        return Err(ConfigError::validation(
            "Bot token cannot contain whitespace or '/'",
        ));
    }

    validate_url(&config.api_url)?;

    if config.timeout_secs == 0 {
        return Err(ConfigError::validation("Timeout must be greater than 0"));
    }

    if config.poll_timeout_secs >= config.timeout_secs {
        return Err(ConfigError::validation(
            "Poll timeout must be shorter than the request timeout",
        ));
    }

    config.proxy_config()?;

    Ok(())
}

/// Validates the webhook listener settings.
fn validate_webhook_config(config: &WebhookConfig) -> ConfigResult<()> {
    validate_port(config.port)?;
    validate_path(&config.path)?;

    if let Some(url) = &config.public_url {
        validate_url(url)?;
    }

    Ok(())
}

/// Validates an HTTP(S) URL.
fn validate_url(url: &str) -> ConfigResult<()> {
    if url.is_empty() {
        return Err(ConfigError::missing_field("url"));
    }

    let valid_schemes = ["http://", "https://"];
    if !valid_schemes.iter().any(|s| url.starts_with(s)) {
        return Err(ConfigError::invalid_url(
            url,
            format!("URL must start with one of: {valid_schemes:?}"),
        ));
    }

    Ok(())
}

/// Validates a port number.
fn validate_port(port: u16) -> ConfigResult<()> {
    if port == 0 {
        return Err(ConfigError::InvalidPort(port));
    }
    Ok(())
}

/// Validates a path.
fn validate_path(path: &str) -> ConfigResult<()> {
    if !path.starts_with('/') {
        return Err(ConfigError::validation("Path must start with '/'"));
    }
    Ok(())
}
