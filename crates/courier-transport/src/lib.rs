//! # Courier Transport
//!
//! Network transport implementations for the Courier Telegram client.
//!
//! This crate provides concrete implementations of the boundaries defined in
//! `courier-core`, selected by feature flags.
//!
//! ## Features
//!
//! - `http-client` (default): [`HttpTransport`], the outbound Bot API caller
//! - `http-server`: [`listen_webhook`], the inbound webhook listener
//! - `full`: both
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │  courier-telegram   │  (TelegramBot, entities)
//! ├─────────────────────┤
//! │  courier-core       │  (Transport / WebhookHandler traits)
//! ├─────────────────────┤
//! │  courier-transport  │  <- This crate (implementations)
//! ├─────────────────────┤
//! │  Network (HTTP)     │
//! └─────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use courier_core::{TransportConfig, encode_params, ParameterBag};
//! use courier_core::Transport;
//! use courier_transport::HttpTransport;
//!
//! let transport = HttpTransport::new(TransportConfig::default())?;
//! let plan = encode_params(&ParameterBag::new())?;
//! let response = transport.send("/bot<token>/getMe", plan).await?;
//! ```

#[cfg(any(feature = "http-client", feature = "http-server"))]
pub mod http;

#[cfg(feature = "http-client")]
pub use http::HttpTransport;

#[cfg(feature = "http-server")]
pub use http::{SECRET_TOKEN_HEADER, listen_webhook};
