//! # Courier Core
//!
//! Protocol-level building blocks for the Courier Telegram Bot API client.
//!
//! ## Request Flow
//!
//! ```text
//! ┌──────────────┐   ┌────────────────┐   ┌───────────┐   ┌──────────────────┐   ┌──────────┐
//! │ ParameterBag │──▶│ encode_params  │──▶│ Transport │──▶│ ResponseEnvelope │──▶│ hydrate  │
//! │  (caller)    │   │ form/multipart │   │ (adapter) │   │  ok / error      │   │ entities │
//! └──────────────┘   └────────────────┘   └───────────┘   └──────────────────┘   └──────────┘
//! ```
//!
//! - [`params`]: loosely-typed parameters and media items
//! - [`encoding`]: file detection, media normalization, the [`EncodingPlan`]
//! - [`transport`]: the [`Transport`] boundary and its configuration
//! - [`envelope`]: response decoding
//! - [`entity`]: typed entities with lazily hydrated [`Virtual`] fields
//! - [`input`]: the once-only inbound webhook body
//!
//! Nothing here retries, rate-limits, or streams responses.
//!
//! ## Example
//!
//! ```rust,ignore
//! use courier_core::{ParameterBag, encode_params};
//!
//! let params = ParameterBag::new()
//!     .with("chat_id", 12345)
//!     .with("photo", "/tmp/cat.jpg")
//!     .with("caption", "A cat");
//!
//! // The photo exists locally, so this is a multipart plan.
//! let plan = encode_params(&params)?;
//! assert!(plan.is_multipart());
//! ```

pub mod encoding;
pub mod entity;
pub mod envelope;
pub mod error;
pub mod input;
pub mod params;
pub mod transport;

pub use encoding::{
    ATTACHMENT_FIELDS, AttachedFile, EncodingPlan, FileReference, NormalizedMedia, Part,
    PartContents, encode_params, is_attachment_field, normalize_media,
};
pub use entity::{Virtual, hydrate};
pub use envelope::{ResponseEnvelope, decode_response};
pub use error::{
    ApiError, ApiResult, EncodeError, EncodeResult, ResponseParameters, TransportError,
    TransportResult,
};
pub use input::InboundBody;
pub use params::{InputMedia, MediaEntry, MediaKind, ParamValue, ParameterBag};
pub use transport::{
    BoxedTransport, BoxedWebhookHandler, DEFAULT_API_URL, ListenerHandle, ProxyConfig,
    RawResponse, Transport, TransportConfig, WebhookHandler,
};
