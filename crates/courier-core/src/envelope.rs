//! Response envelope decoding.
//!
//! Every Bot API response is a JSON object of the shape
//! `{ok, result?, description?, error_code?, parameters?}`. Decoding gives
//! typed access to it; [`ResponseEnvelope::into_result`] turns it into the
//! call outcome.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{ApiError, ApiResult, ResponseParameters};

/// The generic success/error wrapper around every API result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Whether the call succeeded.
    pub ok: bool,
    /// The call result (present when `ok`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error description (present when not `ok`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Error code (present when not `ok`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i64>,
    /// Optional hints on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ResponseParameters>,
}

impl ResponseEnvelope {
    /// Parses a raw response body.
    ///
    /// A body that is not a JSON envelope is a [`ApiError::MalformedResponse`].
    pub fn decode(status: u16, body: &[u8]) -> ApiResult<Self> {
        serde_json::from_slice(body).map_err(|e| ApiError::MalformedResponse {
            status,
            reason: e.to_string(),
        })
    }

    /// Converts the envelope into the call result.
    ///
    /// `ok: true` yields `result` (JSON `null` if the server omitted it);
    /// `ok: false` yields [`ApiError::Upstream`].
    pub fn into_result(self) -> ApiResult<Value> {
        if self.ok {
            return Ok(self.result.unwrap_or(Value::Null));
        }

        let error_code = self.error_code.unwrap_or_default();
        let description = self
            .description
            .unwrap_or_else(|| "Unknown error".to_string());
        warn!(error_code, description = %description, "API call failed");
        Err(ApiError::Upstream {
            error_code,
            description,
            parameters: self.parameters,
        })
    }
}

/// Decodes a raw response straight into its result.
pub fn decode_response(status: u16, body: &[u8]) -> ApiResult<Value> {
    ResponseEnvelope::decode(status, body)?.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_envelope() {
        let body = br#"{"ok":true,"result":{"id":1,"is_bot":true,"first_name":"b"}}"#;
        let result = decode_response(200, body).unwrap();
        assert_eq!(result["id"], json!(1));
    }

    #[test]
    fn test_ok_true_result() {
        let result = decode_response(200, br#"{"ok":true,"result":true}"#).unwrap();
        assert_eq!(result, json!(true));
    }

    #[test]
    fn test_error_envelope() {
        let body = br#"{"ok":false,"description":"Bad Request","error_code":400}"#;
        let err = decode_response(400, body).unwrap_err();
        match err {
            ApiError::Upstream {
                error_code,
                description,
                parameters,
            } => {
                assert_eq!(error_code, 400);
                assert_eq!(description, "Bad Request");
                assert!(parameters.is_none());
            }
            other => panic!("Expected Upstream, got {other:?}"),
        }
    }

    #[test]
    fn test_error_parameters() {
        let body = br#"{"ok":false,"error_code":429,"description":"Too Many Requests: retry after 3","parameters":{"retry_after":3}}"#;
        let err = decode_response(429, body).unwrap_err();
        assert_eq!(err.retry_after(), Some(3));
    }

    #[test]
    fn test_malformed_body() {
        let err = decode_response(502, b"<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse { status: 502, .. }));

        let err = decode_response(200, b"").unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse { .. }));
    }

    #[test]
    fn test_envelope_fields() {
        let envelope = ResponseEnvelope::decode(200, br#"{"ok":true,"result":[]}"#).unwrap();
        assert!(envelope.ok);
        assert_eq!(envelope.result, Some(json!([])));
        assert_eq!(envelope.description, None);
    }
}
