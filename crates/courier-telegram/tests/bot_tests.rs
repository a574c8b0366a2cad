//! End-to-end tests of `TelegramBot` against a recording transport.

use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};

use courier_core::{
    ApiError, EncodeError, EncodingPlan, InputMedia, ParameterBag, RawResponse, Transport,
    TransportError, TransportResult,
};
use courier_telegram::TelegramBot;

/// What the transport saw for one call.
#[derive(Debug)]
struct Recorded {
    path: String,
    kind: &'static str,
    names: Vec<String>,
    texts: Vec<(String, String)>,
}

struct RecordingTransport {
    response: RawResponse,
    calls: Mutex<Vec<Recorded>>,
}

impl RecordingTransport {
    fn replying(status: u16, body: Value) -> Arc<Self> {
        Arc::new(Self {
            response: RawResponse::new(status, body.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, path: &str, plan: EncodingPlan) -> TransportResult<RawResponse> {
        let kind = plan.kind();
        let (names, texts) = match &plan {
            EncodingPlan::Form(fields) => (
                fields.iter().map(|(k, _)| k.clone()).collect(),
                fields.clone(),
            ),
            EncodingPlan::Multipart(parts) => (
                parts.iter().map(|p| p.name.clone()).collect(),
                parts
                    .iter()
                    .filter_map(|p| Some((p.name.clone(), p.as_text()?.to_string())))
                    .collect(),
            ),
        };
        self.calls.lock().push(Recorded {
            path: path.to_string(),
            kind,
            names,
            texts,
        });
        Ok(self.response.clone())
    }
}

struct FailingTransport;

#[async_trait]
impl Transport for FailingTransport {
    async fn send(&self, _path: &str, _plan: EncodingPlan) -> TransportResult<RawResponse> {
        Err(TransportError::SendFailed("connection reset".into()))
    }
}

fn message_result() -> Value {
    json!({
        "ok": true,
        "result": {
            "message_id": 77,
            "date": 1700000000,
            "chat": {"id": 42, "type": "private"},
            "text": "hello"
        }
    })
}

#[tokio::test]
async fn test_send_message_uses_form() {
    let transport = RecordingTransport::replying(200, message_result());
    let bot = TelegramBot::new(transport.clone(), "1:tok");

    let message = bot
        .send_message(42, "hello", ParameterBag::new().with("parse_mode", "HTML"))
        .await
        .unwrap();
    assert_eq!(message.message_id, Some(77));
    assert_eq!(message.chat_id(), Some(42));

    let calls = transport.calls.lock();
    assert_eq!(calls[0].path, "bot1:tok/sendMessage");
    assert_eq!(calls[0].kind, "form");
    assert_eq!(
        calls[0].texts,
        vec![
            ("chat_id".to_string(), "42".to_string()),
            ("text".to_string(), "hello".to_string()),
            ("parse_mode".to_string(), "HTML".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_get_me_sends_empty_plan() {
    let transport = RecordingTransport::replying(
        200,
        json!({"ok": true, "result": {"id": 1, "is_bot": true, "first_name": "Courier", "username": "courier_bot"}}),
    );
    let bot = TelegramBot::new(transport.clone(), "1:tok");

    let me = bot.get_me().await.unwrap();
    assert_eq!(me.username.as_deref(), Some("courier_bot"));
    assert_eq!(transport.calls.lock()[0].kind, "empty");
}

#[tokio::test]
async fn test_send_local_photo_uses_multipart() {
    let transport = RecordingTransport::replying(200, message_result());
    let bot = TelegramBot::new(transport.clone(), "1:tok");

    let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    file.write_all(b"PNG").unwrap();

    bot.send_photo(
        42,
        file.path().to_str().unwrap(),
        ParameterBag::new().with("caption", "local"),
    )
    .await
    .unwrap();

    let calls = transport.calls.lock();
    assert_eq!(calls[0].kind, "multipart");
    assert_eq!(calls[0].names, ["chat_id", "photo", "caption"]);
    // The photo part is a stream; no literal duplicate is sent.
    assert!(calls[0].texts.iter().all(|(name, _)| name != "photo"));
}

#[tokio::test]
async fn test_send_remote_photo_uses_form() {
    let transport = RecordingTransport::replying(200, message_result());
    let bot = TelegramBot::new(transport.clone(), "1:tok");

    bot.send_photo(42, "https://example.org/cat.jpg", ParameterBag::new())
        .await
        .unwrap();
    assert_eq!(transport.calls.lock()[0].kind, "form");
}

#[tokio::test]
async fn test_send_media_group_rewrites_local_items() {
    let transport = RecordingTransport::replying(200, json!({"ok": true, "result": []}));
    let bot = TelegramBot::new(transport.clone(), "1:tok");

    let file = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
    let media = vec![
        InputMedia::photo(file.path().to_str().unwrap()).with_caption("local"),
        InputMedia::photo("AgADBAAD"),
    ];
    let messages = bot
        .send_media_group(42, media, ParameterBag::new())
        .await
        .unwrap();
    assert!(messages.is_empty());

    let calls = transport.calls.lock();
    let call = &calls[0];
    assert_eq!(call.kind, "multipart");
    let attached = call.names.iter().find(|n| n.starts_with("photo_")).unwrap();

    let media_json = &call.texts.iter().find(|(k, _)| k == "media").unwrap().1;
    let items: Value = serde_json::from_str(media_json).unwrap();
    assert_eq!(items[0]["media"], format!("attach://{attached}"));
    assert_eq!(items[0]["caption"], "local");
    assert_eq!(items[1]["media"], "AgADBAAD");
}

#[tokio::test]
async fn test_upstream_error() {
    let transport = RecordingTransport::replying(
        400,
        json!({"ok": false, "error_code": 400, "description": "Bad Request: chat not found"}),
    );
    let bot = TelegramBot::new(transport, "1:tok");

    let err = bot
        .send_message(0, "x", ParameterBag::new())
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), Some(400));
    assert!(err.to_string().contains("chat not found"));
}

#[tokio::test]
async fn test_missing_explicit_file_aborts_before_sending() {
    let transport = RecordingTransport::replying(200, message_result());
    let bot = TelegramBot::new(transport.clone(), "1:tok");

    let params = ParameterBag::new()
        .with("chat_id", 42)
        .with("document", std::path::PathBuf::from("/definitely/not/here.pdf"));
    let err = bot.send("sendDocument", params).await.unwrap_err();

    assert!(matches!(err, ApiError::Encode(EncodeError::FileOpen { .. })));
    assert!(transport.calls.lock().is_empty());
}

#[tokio::test]
async fn test_transport_error_propagates() {
    let bot = TelegramBot::new(Arc::new(FailingTransport), "1:tok");
    let err = bot.get_me().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(TransportError::SendFailed(_))));
}

#[tokio::test]
async fn test_wrong_result_shape_is_serialization_error() {
    let transport = RecordingTransport::replying(200, json!({"ok": true, "result": "not a user"}));
    let bot = TelegramBot::new(transport, "1:tok");
    let err = bot.get_me().await.unwrap_err();
    assert!(matches!(err, ApiError::SerializationError(_)));
}
