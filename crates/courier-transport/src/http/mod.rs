//! HTTP transports.
//!
//! This module provides the HTTP client and webhook server implementations.

#[cfg(feature = "http-client")]
mod client;
#[cfg(feature = "http-client")]
pub use client::HttpTransport;

#[cfg(feature = "http-server")]
mod server;
#[cfg(feature = "http-server")]
pub use server::{SECRET_TOKEN_HEADER, listen_webhook};
