//! Unified error types for the Courier core.
//!
//! Encoding errors abort a call before anything touches the network,
//! transport errors come from the adapter that moved the bytes, and API errors
//! describe what the remote side answered.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Encode Errors
// =============================================================================

/// Errors raised while turning a parameter bag into an encoding plan.
#[derive(Debug, Clone, Error)]
pub enum EncodeError {
    /// A local attachment exists (or was explicitly requested) but could not be opened.
    #[error("failed to open attachment '{field}' at {}: {reason}", path.display())]
    FileOpen {
        /// Parameter (or media item) the file was bound to.
        field: String,
        /// Local path that failed to open.
        path: PathBuf,
        /// Underlying I/O failure.
        reason: String,
    },

    /// A media payload could not be serialized to JSON.
    #[error("failed to serialize media payload: {0}")]
    MediaSerialize(String),
}

impl EncodeError {
    /// Creates a file-open error from an I/O failure.
    pub fn file_open(field: impl Into<String>, path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self::FileOpen {
            field: field.into(),
            path: path.into(),
            reason: err.to_string(),
        }
    }
}

// =============================================================================
// Transport Errors
// =============================================================================

/// Errors that can occur in transport operations.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Connection failed.
    #[error("connection failed: {url} - {reason}")]
    ConnectionFailed {
        /// The URL that failed to connect.
        url: String,
        /// Reason for failure.
        reason: String,
    },

    /// Request could not be sent or its body could not be read.
    #[error("failed to send request: {0}")]
    SendFailed(String),

    /// Invalid configuration.
    #[error("invalid transport configuration: {0}")]
    InvalidConfig(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

// =============================================================================
// API Errors
// =============================================================================

/// Extra hints the API attaches to some failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseParameters {
    /// The group has been migrated to a supergroup with this identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migrate_to_chat_id: Option<i64>,
    /// Seconds to wait before the request can be repeated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

/// Error type for API calls.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The parameters could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Transport error.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body was not a JSON envelope.
    #[error("malformed response (HTTP {status}): {reason}")]
    MalformedResponse {
        /// HTTP status of the response.
        status: u16,
        /// Why decoding failed.
        reason: String,
    },

    /// The API answered with `ok: false`.
    #[error("API error ({error_code}): {description}")]
    Upstream {
        /// Numeric error code (mirrors the HTTP status in practice).
        error_code: i64,
        /// Human-readable description.
        description: String,
        /// Optional hints such as `retry_after`.
        parameters: Option<ResponseParameters>,
    },

    /// A result could not be hydrated into the requested type.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl ApiError {
    /// Returns the upstream error code, if this is an upstream failure.
    pub fn error_code(&self) -> Option<i64> {
        match self {
            Self::Upstream { error_code, .. } => Some(*error_code),
            _ => None,
        }
    }

    /// Returns `retry_after` seconds if the API asked the caller to back off.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Self::Upstream {
                parameters: Some(p),
                ..
            } => p.retry_after,
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for encoding operations.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Result type for API calls.
pub type ApiResult<T> = Result<T, ApiError>;
