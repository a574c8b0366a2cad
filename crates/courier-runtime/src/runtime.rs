//! Runtime wiring: configuration → transport → bot → update loop.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use courier_runtime::CourierRuntime;
//!
//! let runtime = CourierRuntime::new()?;
//! runtime
//!     .run_polling(|bot, update| async move {
//!         if let Some(chat_id) = update.message().and_then(|m| m.chat_id()) {
//!             let _ = bot.send_message(chat_id, "pong", Default::default()).await;
//!         }
//!     })
//!     .await?;
//! ```

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::signal;
use tracing::{debug, info, warn};

use courier_core::{
    BoxedTransport, InboundBody, ListenerHandle, ParameterBag, WebhookHandler,
};
use courier_telegram::{Input, TelegramBot, Update};
use courier_transport::{HttpTransport, listen_webhook};

use crate::config::{ConfigLoader, CourierConfig, validate_config};
use crate::error::RuntimeResult;
use crate::logging;

/// Wires a validated configuration into a ready [`TelegramBot`] and runs
/// update loops on it.
pub struct CourierRuntime {
    config: CourierConfig,
    bot: TelegramBot,
}

impl CourierRuntime {
    /// Loads configuration from the current directory and the environment.
    pub fn new() -> RuntimeResult<Self> {
        let config = ConfigLoader::new().with_current_dir().load()?;
        Self::from_config(config)
    }

    /// Creates a runtime builder for custom configuration.
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Validates `config`, initializes logging and builds the HTTP transport.
    pub fn from_config(config: CourierConfig) -> RuntimeResult<Self> {
        validate_config(&config)?;
        logging::init_from_config(&config.logging);

        let transport = HttpTransport::new(config.telegram.to_transport_config()?)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Builds the runtime over an existing transport.
    pub fn with_transport(config: CourierConfig, transport: BoxedTransport) -> Self {
        let mut bot = TelegramBot::new(transport, config.telegram.bot_token.clone())
            .with_api_url(config.telegram.api_url.clone());
        if let Some(username) = &config.telegram.bot_username {
            bot = bot.with_username(username.clone());
        }

        info!(
            api_url = %config.telegram.api_url,
            username = ?config.telegram.bot_username,
            "Runtime initialized"
        );
        Self { config, bot }
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &CourierConfig {
        &self.config
    }

    /// The configured bot client.
    pub fn bot(&self) -> &TelegramBot {
        &self.bot
    }

    // =========================================================================
    // Long Polling
    // =========================================================================

    /// Fetches one batch of updates starting at `offset` and hands each to
    /// `handler` in order. Returns the offset for the next call.
    pub async fn poll_once<F, Fut>(&self, offset: Option<i64>, handler: &F) -> RuntimeResult<Option<i64>>
    where
        F: Fn(TelegramBot, Update) -> Fut,
        Fut: Future<Output = ()>,
    {
        let params = ParameterBag::new()
            .with_opt("offset", offset)
            .with("timeout", self.config.telegram.poll_timeout_secs);
        let updates = self.bot.get_updates(params).await?;
        debug!(count = updates.len(), offset = ?offset, "Polled updates");

        let mut next = offset;
        for update in updates {
            if let Some(candidate) = update.next_offset() {
                next = Some(next.map_or(candidate, |n| n.max(candidate)));
            }
            handler(self.bot.clone(), update).await;
        }
        Ok(next)
    }

    /// Long-polls until Ctrl+C / SIGTERM.
    ///
    /// Any webhook is removed first, since the API refuses `getUpdates` while
    /// one is set. A failed poll ends the loop with its error.
    pub async fn run_polling<F, Fut>(&self, handler: F) -> RuntimeResult<()>
    where
        F: Fn(TelegramBot, Update) -> Fut,
        Fut: Future<Output = ()>,
    {
        self.bot.delete_webhook(ParameterBag::new()).await?;
        info!("Polling for updates. Press Ctrl+C to stop.");

        let shutdown = wait_for_shutdown();
        tokio::pin!(shutdown);

        let mut offset = None;
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                next = self.poll_once(offset, &handler) => offset = next?,
            }
        }

        info!("Polling stopped");
        Ok(())
    }

    // =========================================================================
    // Webhook
    // =========================================================================

    /// Starts the webhook listener. Each accepted update is handled on its own
    /// task; dropping the returned handle stops the listener.
    pub async fn serve_webhook<F, Fut>(&self, handler: F) -> RuntimeResult<ListenerHandle>
    where
        F: Fn(TelegramBot, Update) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let webhook = &self.config.webhook;
        let dispatch = Arc::new(WebhookDispatch {
            bot: self.bot.clone(),
            handler,
        });
        let handle = listen_webhook(
            &webhook.bind_addr(),
            &webhook.path,
            webhook.secret_token.clone(),
            dispatch,
        )
        .await?;
        Ok(handle)
    }

    /// Registers the public webhook URL (if configured), serves until
    /// Ctrl+C / SIGTERM, then stops the listener.
    pub async fn run_webhook<F, Fut>(&self, handler: F) -> RuntimeResult<()>
    where
        F: Fn(TelegramBot, Update) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let webhook = &self.config.webhook;
        if let Some(url) = &webhook.public_url {
            let params = ParameterBag::new().with_opt("secret_token", webhook.secret_token.clone());
            self.bot.set_webhook(url, params).await?;
            info!(url = %url, "Webhook registered");
        }

        let handle = self.serve_webhook(handler).await?;
        info!(addr = %handle.id, path = %webhook.path, "Serving webhook. Press Ctrl+C to stop.");

        wait_for_shutdown().await;
        handle.stop();
        Ok(())
    }
}

/// Feeds webhook bodies, parsed once, to the user handler.
struct WebhookDispatch<F> {
    bot: TelegramBot,
    handler: F,
}

#[async_trait]
impl<F, Fut> WebhookHandler for WebhookDispatch<F>
where
    F: Fn(TelegramBot, Update) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    async fn on_body(&self, body: InboundBody) {
        let input = Input::new(body);
        let Some(update) = input.update() else {
            debug!("Ignoring webhook request without a usable update");
            return;
        };
        debug!(update_id = ?update.update_id, "Received update via webhook");
        tokio::spawn((self.handler)(self.bot.clone(), update.clone()));
    }
}

/// Waits for Ctrl+C or SIGTERM.
async fn wait_for_shutdown() {
    #[cfg(unix)]
    {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = signal::ctrl_c() => info!("Received Ctrl+C, shutting down"),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down"),
                }
            }
            Err(e) => {
                warn!(error = %e, "Failed to register SIGTERM handler");
                let _ = signal::ctrl_c().await;
                info!("Received Ctrl+C, shutting down");
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    }
}

// =============================================================================
// RuntimeBuilder
// =============================================================================

/// Builder for creating a [`CourierRuntime`] with custom configuration.
///
/// ```rust,ignore
/// let runtime = CourierRuntime::builder()
///     .config_file("config/courier.toml")
///     .profile("production")
///     .build()?;
/// ```
pub struct RuntimeBuilder {
    config_loader: ConfigLoader,
}

impl RuntimeBuilder {
    /// Creates a new runtime builder searching the current directory.
    pub fn new() -> Self {
        Self {
            config_loader: ConfigLoader::new().with_current_dir(),
        }
    }

    /// Sets a specific configuration file to load.
    pub fn config_file<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        self.config_loader = self.config_loader.file(path);
        self
    }

    /// Sets the configuration profile.
    pub fn profile(mut self, profile: impl AsRef<str>) -> Self {
        self.config_loader = self.config_loader.profile(profile);
        self
    }

    /// Adds a search path for configuration files.
    pub fn search_path<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        self.config_loader = self.config_loader.search_path(path);
        self
    }

    /// Disables loading environment variables.
    pub fn without_env(mut self) -> Self {
        self.config_loader = self.config_loader.without_env();
        self
    }

    /// Adds an override applied above files and environment.
    pub fn merge<T: serde::Serialize>(mut self, overrides: T) -> Self {
        self.config_loader = self.config_loader.merge(overrides);
        self
    }

    /// Loads, validates and builds the runtime.
    pub fn build(self) -> RuntimeResult<CourierRuntime> {
        let config = self.config_loader.load()?;
        CourierRuntime::from_config(config)
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
