//! Integration tests for the update loops against a mock Bot API.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use courier_core::{ApiError, TransportConfig};
use courier_runtime::{CourierConfig, CourierRuntime, RuntimeError};
use courier_telegram::{TelegramBot, Update};
use courier_transport::{HttpTransport, SECRET_TOKEN_HEADER};
use serde_json::json;
use tokio::sync::mpsc;
use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "123:abc";

fn runtime_for(api_url: &str) -> CourierRuntime {
    let mut config = CourierConfig::default();
    config.telegram.bot_token = TOKEN.to_string();
    config.telegram.api_url = api_url.to_string();
    config.webhook.host = "127.0.0.1".to_string();
    config.webhook.port = 0;
    config.webhook.path = "/hook".to_string();
    config.webhook.secret_token = Some("s3cret".to_string());

    let transport = HttpTransport::new(TransportConfig::new(api_url)).unwrap();
    CourierRuntime::with_transport(config, Arc::new(transport))
}

#[tokio::test]
async fn test_poll_once_advances_offset() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/getUpdates")))
        .and(body_string("timeout=25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": [
                {"update_id": 10, "message": {"message_id": 1, "chat": {"id": 7, "type": "private"}, "text": "hi"}},
                {"update_id": 11, "edited_message": {"message_id": 1, "chat": {"id": 7, "type": "private"}}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let runtime = runtime_for(&server.uri());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let handler = |_bot: TelegramBot, update: Update| {
        let seen = seen.clone();
        async move {
            let text = update.message().and_then(|m| m.text.clone());
            seen.lock().unwrap().push((update.update_id, text));
        }
    };

    let next = runtime.poll_once(None, &handler).await.unwrap();
    assert_eq!(next, Some(12));
    assert_eq!(
        *seen.lock().unwrap(),
        vec![(Some(10), Some("hi".to_string())), (Some(11), None)]
    );
}

#[tokio::test]
async fn test_poll_once_keeps_offset_when_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/getUpdates")))
        .and(body_string("offset=40&timeout=25"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"ok":true,"result":[]}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let runtime = runtime_for(&server.uri());
    let next = runtime
        .poll_once(Some(40), &|_: TelegramBot, _: Update| async {})
        .await
        .unwrap();
    assert_eq!(next, Some(40));
}

#[tokio::test]
async fn test_poll_once_surfaces_api_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/getUpdates")))
        .respond_with(ResponseTemplate::new(409).set_body_string(
            r#"{"ok":false,"error_code":409,"description":"Conflict: can't use getUpdates method while webhook is active"}"#,
        ))
        .mount(&server)
        .await;

    let runtime = runtime_for(&server.uri());
    let err = runtime
        .poll_once(None, &|_: TelegramBot, _: Update| async {})
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Api(ApiError::Upstream { error_code: 409, .. })
    ));
}

#[tokio::test]
async fn test_webhook_dispatches_updates() {
    let runtime = runtime_for("http://127.0.0.1:1");
    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = runtime
        .serve_webhook(move |_bot: TelegramBot, update: Update| {
            let tx = tx.clone();
            async move {
                let _ = tx.send(update.update_id);
            }
        })
        .await
        .unwrap();

    let client = reqwest::Client::new();
    let url = format!("http://{}/hook", handle.id);

    let rejected = client
        .post(&url)
        .body(r#"{"update_id": 1}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status().as_u16(), 401);

    let ignored = client
        .post(&url)
        .header(SECRET_TOKEN_HEADER, "s3cret")
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(ignored.status().as_u16(), 200);

    let accepted = client
        .post(&url)
        .header(SECRET_TOKEN_HEADER, "s3cret")
        .body(r#"{"update_id": 77, "message": {"message_id": 1, "text": "hello"}}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(accepted.status().as_u16(), 200);

    let received = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap();
    assert_eq!(received, Some(Some(77)));

    handle.stop();
}
