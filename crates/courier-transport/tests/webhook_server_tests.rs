//! Integration tests for the webhook listener.

#![cfg(feature = "http-server")]

use std::sync::Arc;

use async_trait::async_trait;
use courier_core::{InboundBody, WebhookHandler};
use courier_transport::{SECRET_TOKEN_HEADER, listen_webhook};
use serde_json::Value;
use tokio::sync::mpsc;

struct ChannelHandler(mpsc::UnboundedSender<Option<Value>>);

#[async_trait]
impl WebhookHandler for ChannelHandler {
    async fn on_body(&self, body: InboundBody) {
        let _ = self.0.send(body.json().cloned().map(Value::Object));
    }
}

#[tokio::test]
async fn test_delivers_body_to_handler() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = listen_webhook("127.0.0.1:0", "hook", None, Arc::new(ChannelHandler(tx)))
        .await
        .unwrap();

    let response = reqwest::Client::new()
        .post(format!("http://{}/hook", handle.id))
        .body(r#"{"update_id":1}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let received = rx.recv().await.unwrap().unwrap();
    assert_eq!(received["update_id"], 1);
    handle.stop();
}

#[tokio::test]
async fn test_rejects_wrong_secret_token() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = listen_webhook(
        "127.0.0.1:0",
        "/hook",
        Some("s3cret".to_string()),
        Arc::new(ChannelHandler(tx)),
    )
    .await
    .unwrap();
    let url = format!("http://{}/hook", handle.id);
    let client = reqwest::Client::new();

    let rejected = client
        .post(&url)
        .header(SECRET_TOKEN_HEADER, "wrong")
        .body("{}")
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status(), 401);

    let accepted = client
        .post(&url)
        .header(SECRET_TOKEN_HEADER, "s3cret")
        .body("{}")
        .send()
        .await
        .unwrap();
    assert_eq!(accepted.status(), 200);

    // Only the accepted request reached the handler.
    assert_eq!(rx.recv().await.unwrap(), Some(serde_json::json!({})));
    assert!(rx.try_recv().is_err());
}
