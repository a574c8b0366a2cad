//! HTTP client transport implementation.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part as FormPart};
use reqwest::{Body, Client, ClientBuilder, Proxy, RequestBuilder};
use tokio_util::io::ReaderStream;
use tracing::{debug, info, trace};

use courier_core::encoding::FORM_CONTENT_TYPE;
use courier_core::{
    AttachedFile, EncodingPlan, Part, PartContents, RawResponse, Transport, TransportConfig,
    TransportError, TransportResult,
};

/// Bot API transport over `reqwest`.
///
/// One client is shared by every call; it is cheap to clone.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: TransportConfig,
}

impl HttpTransport {
    /// Creates a transport from its configuration.
    pub fn new(config: TransportConfig) -> TransportResult<Self> {
        let mut builder = ClientBuilder::new().timeout(config.timeout);
        if let Some(proxy) = &config.proxy {
            let proxy = Proxy::all(proxy.to_url())
                .map_err(|e| TransportError::InvalidConfig(format!("proxy: {e}")))?;
            builder = builder.proxy(proxy);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::InvalidConfig(e.without_url().to_string()))?;

        info!(
            api_url = %config.api_url,
            proxy = config.proxy.is_some(),
            timeout = ?config.timeout,
            "HTTP transport ready"
        );
        Ok(Self { client, config })
    }

    /// The configuration this transport was built with.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    fn attach_body(
        &self,
        request: RequestBuilder,
        plan: EncodingPlan,
    ) -> TransportResult<RequestBuilder> {
        match plan {
            EncodingPlan::Form(fields) if fields.is_empty() => Ok(request),
            EncodingPlan::Form(fields) => {
                let body = serde_urlencoded::to_string(&fields)
                    .map_err(|e| TransportError::SendFailed(format!("form encoding: {e}")))?;
                Ok(request.header(CONTENT_TYPE, FORM_CONTENT_TYPE).body(body))
            }
            EncodingPlan::Multipart(parts) => {
                let form = parts.into_iter().fold(Form::new(), add_part);
                Ok(request.multipart(form))
            }
        }
    }
}

fn add_part(form: Form, part: Part) -> Form {
    let Part { name, contents } = part;
    match contents {
        PartContents::Text(value) => form.text(name, value),
        PartContents::Stream(file) => form.part(name, stream_part(file)),
    }
}

fn stream_part(file: AttachedFile) -> FormPart {
    let file_name = file.file_name().to_string();
    let len = file.len();
    let reader = tokio::fs::File::from_std(file.into_file());
    let body = Body::wrap_stream(ReaderStream::new(reader));
    let part = match len {
        Some(len) => FormPart::stream_with_length(body, len),
        None => FormPart::stream(body),
    };
    part.file_name(file_name)
}

/// Last path segment, i.e. the API method. Never includes the token.
fn method_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or_default()
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, path: &str, plan: EncodingPlan) -> TransportResult<RawResponse> {
        let method = method_of(path);
        let kind = plan.kind();
        let fields = plan.len();
        debug!(method, kind, fields, "Sending API request");

        let request = self.client.post(self.config.url_for(path));
        let request = self.attach_body(request, plan)?;

        let response = request.send().await.map_err(|e| {
            if e.is_connect() {
                TransportError::ConnectionFailed {
                    url: self.config.api_url.clone(),
                    reason: e.without_url().to_string(),
                }
            } else if e.is_timeout() {
                TransportError::SendFailed(format!(
                    "{method}: timed out after {:?}",
                    self.config.timeout
                ))
            } else {
                TransportError::SendFailed(format!("{method}: {}", e.without_url()))
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Io(format!("{method}: {}", e.without_url())))?;

        trace!(method, status, len = body.len(), "Received API response");
        Ok(RawResponse::new(status, body))
    }
}
