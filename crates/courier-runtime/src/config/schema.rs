//! Configuration schema definitions.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use courier_core::{DEFAULT_API_URL, ProxyConfig};

use super::error::{ConfigError, ConfigResult};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CourierConfig {
    /// Bot API client settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Inbound webhook listener settings.
    #[serde(default)]
    pub webhook: WebhookConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

// =============================================================================
// Telegram
// =============================================================================

/// Bot API client configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Bot token issued by @BotFather.
    #[serde(default)]
    pub bot_token: String,

    /// Bot username, used to match `/command@username`.
    #[serde(default)]
    pub bot_username: Option<String>,

    /// SOCKS5 proxy, `[<user>:<pass>@]<host>:<port>`.
    #[serde(default)]
    pub proxy: Option<String>,

    /// Whole-request deadline in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Server-side wait of one `getUpdates` long poll, in seconds.
    #[serde(default = "default_poll_timeout_secs")]
    pub poll_timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            bot_token: String::new(),
            bot_username: None,
            proxy: None,
            timeout_secs: default_timeout_secs(),
            poll_timeout_secs: default_poll_timeout_secs(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_poll_timeout_secs() -> u64 {
    25
}

impl TelegramConfig {
    /// Parses the proxy descriptor, if any.
    pub fn proxy_config(&self) -> ConfigResult<Option<ProxyConfig>> {
        self.proxy
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| {
                p.parse::<ProxyConfig>()
                    .map_err(|e| ConfigError::InvalidProxy(e.to_string()))
            })
            .transpose()
    }

    /// Converts to the transport configuration.
    pub fn to_transport_config(&self) -> ConfigResult<courier_core::TransportConfig> {
        let mut config = courier_core::TransportConfig::new(self.api_url.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs));
        if let Some(proxy) = self.proxy_config()? {
            config = config.with_proxy(proxy);
        }
        Ok(config)
    }
}

// Keeps the token and proxy credentials out of logs.
impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("api_url", &self.api_url)
            .field("bot_token", &"<redacted>")
            .field("bot_username", &self.bot_username)
            .field("proxy", &self.proxy_config().ok().flatten())
            .field("timeout_secs", &self.timeout_secs)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .finish()
    }
}

// =============================================================================
// Webhook
// =============================================================================

/// Webhook listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path of the webhook endpoint.
    #[serde(default = "default_webhook_path")]
    pub path: String,

    /// Expected `X-Telegram-Bot-Api-Secret-Token` value.
    #[serde(default)]
    pub secret_token: Option<String>,

    /// Public HTTPS URL registered with `setWebhook` on startup.
    #[serde(default)]
    pub public_url: Option<String>,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            path: default_webhook_path(),
            secret_token: None,
            public_url: None,
        }
    }
}

impl WebhookConfig {
    /// `host:port` to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8443
}

fn default_webhook_path() -> String {
    "/webhook".to_string()
}

// =============================================================================
// Logging
// =============================================================================

/// Log verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Lowercase name, as used in filter directives.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Converts to a `tracing` level.
    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Full,
    Pretty,
    #[cfg(feature = "json-log")]
    Json,
}

/// Log destination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stdout,
    Stderr,
    File,
}

/// Which span lifecycle events are logged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpanEventConfig {
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub enter: bool,
    #[serde(default)]
    pub exit: bool,
    #[serde(default)]
    pub close: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Global level.
    #[serde(default)]
    pub level: LogLevel,

    /// Per-module levels, e.g. `courier_transport = "trace"`.
    #[serde(default)]
    pub filters: HashMap<String, LogLevel>,

    #[serde(default)]
    pub format: LogFormat,

    #[serde(default)]
    pub output: LogOutput,

    /// Log file, when `output = "file"`.
    #[serde(default)]
    pub file_path: Option<PathBuf>,

    #[serde(default)]
    pub span_events: SpanEventConfig,

    #[serde(default)]
    pub thread_ids: bool,

    /// Include file names and line numbers.
    #[serde(default)]
    pub file_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            filters: HashMap::new(),
            format: LogFormat::default(),
            output: LogOutput::default(),
            file_path: None,
            span_events: SpanEventConfig::default(),
            thread_ids: false,
            file_location: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
telegram:
  bot_token: "123:abc"
  bot_username: courier_bot
  proxy: "alice:pw@127.0.0.1:1080"
webhook:
  port: 8080
  secret_token: s3cret
logging:
  level: debug
  filters:
    courier_transport: trace
"#;
        let config: CourierConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.telegram.api_url, DEFAULT_API_URL);
        assert_eq!(config.telegram.timeout_secs, 30);
        assert_eq!(config.webhook.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.webhook.path, "/webhook");
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(
            config.logging.filters.get("courier_transport"),
            Some(&LogLevel::Trace)
        );

        let transport = config.telegram.to_transport_config().unwrap();
        assert_eq!(transport.proxy.unwrap().port, 1080);
        assert_eq!(transport.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = TelegramConfig {
            bot_token: "123:TOPSECRET".into(),
            proxy: Some("alice:hunter2@10.0.0.1:1080".into()),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("TOPSECRET"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_invalid_proxy() {
        let config = TelegramConfig {
            proxy: Some("no-port".into()),
            ..Default::default()
        };
        assert!(matches!(
            config.to_transport_config(),
            Err(ConfigError::InvalidProxy(_))
        ));
    }
}
