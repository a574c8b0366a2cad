//! Webhook listener implementation.

use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
};
use tracing::{debug, error, info, warn};

use courier_core::{BoxedWebhookHandler, InboundBody, ListenerHandle, TransportResult};

/// Header carrying the secret token configured with `setWebhook`.
pub const SECRET_TOKEN_HEADER: &str = "X-Telegram-Bot-Api-Secret-Token";

/// Shared state for the webhook server.
struct ServerState {
    handler: BoxedWebhookHandler,
    secret_token: Option<String>,
}

/// Binds `addr` and feeds every POST on `path` to `handler`.
///
/// When `secret_token` is set, requests whose secret header does not match
/// are answered with `401` and never reach the handler. The returned handle's
/// `id` is the actually bound address; dropping the handle stops the server.
pub async fn listen_webhook(
    addr: &str,
    path: &str,
    secret_token: Option<String>,
    handler: BoxedWebhookHandler,
) -> TransportResult<ListenerHandle> {
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };

    let state = Arc::new(ServerState {
        handler,
        secret_token,
    });
    let router = Router::new()
        .route(&path, post(webhook_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    info!(addr = %actual_addr, path = %path, "Webhook listener started");

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        let server = axum::serve(listener, router).with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
        });
        if let Err(e) = server.await {
            error!(error = %e, "Webhook server error");
        }
        info!("Webhook listener stopped");
    });

    Ok(ListenerHandle::new(actual_addr.to_string(), shutdown_tx))
}

async fn webhook_handler(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    if let Some(expected) = &state.secret_token {
        let provided = headers
            .get(SECRET_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok());
        if provided != Some(expected.as_str()) {
            warn!("Rejected webhook request with a bad secret token");
            return StatusCode::UNAUTHORIZED;
        }
    }

    debug!(len = body.len(), "Received webhook request");
    state.handler.on_body(InboundBody::new(body)).await;
    StatusCode::OK
}
