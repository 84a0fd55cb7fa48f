//! Router-level tests for the payment request endpoint, with the XUMM
//! platform replaced by an in-memory provider.

use async_trait::async_trait;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum_test::TestServer;
use pay_api::{create_router, AppConfig, AppState, CREATE_PAYMENT_PATH};
use pay_core::{
    CreatedPayload, PayloadProvider, PayloadRequest, PaymentError, PaymentResult,
    ProviderCredentials, INVALID_AMOUNT_MESSAGE, MISSING_FIELDS_MESSAGE,
};
use pay_xumm::XummConfig;
use serde_json::{json, Value};
use std::io;
use std::sync::{Arc, Mutex};

const UUID: &str = "5f0e2b8c-1a3d-4c6e-9b7f-2d4a6c8e0f13";

enum Reply {
    Payload(Value),
    Fail(String),
}

struct FakeProvider {
    reply: Reply,
    calls: Mutex<Vec<(ProviderCredentials, PayloadRequest)>>,
}

impl FakeProvider {
    fn replying(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn ok() -> Arc<Self> {
        Self::replying(Reply::Payload(complete_payload()))
    }

    fn calls(&self) -> Vec<(ProviderCredentials, PayloadRequest)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PayloadProvider for FakeProvider {
    async fn create_payload(
        &self,
        credentials: &ProviderCredentials,
        request: &PayloadRequest,
    ) -> PaymentResult<CreatedPayload> {
        self.calls
            .lock()
            .unwrap()
            .push((credentials.clone(), request.clone()));

        match &self.reply {
            Reply::Payload(raw) => Ok(CreatedPayload::from_value(raw.clone())),
            Reply::Fail(message) => Err(PaymentError::ProviderCall(message.clone())),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

fn complete_payload() -> Value {
    json!({
        "uuid": UUID,
        "next": { "always": format!("https://xumm.app/sign/{UUID}") },
        "refs": {
            "qr_png": format!("https://xumm.app/sign/{UUID}_q.png"),
            "websocket_status": format!("wss://xumm.app/sign/{UUID}")
        },
        "pushed": false
    })
}

fn app_config(public_host: Option<&str>) -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        public_host: public_host.map(str::to_string),
        environment: "test".to_string(),
    }
}

fn server_with(provider: Arc<FakeProvider>, xumm: XummConfig, public_host: Option<&str>) -> TestServer {
    let state = AppState::with_provider(app_config(public_host), xumm, provider);
    TestServer::new(create_router(state)).unwrap()
}

fn configured() -> XummConfig {
    XummConfig::new("key-123", "secret-456")
}

fn valid_body() -> Value {
    json!({ "destination": "rExampleAddress", "amount": 10 })
}

/// Collects formatted log lines written by the handler
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Installs a thread-local subscriber writing into the returned buffer
fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}

#[tokio::test]
async fn non_post_methods_are_rejected() {
    let provider = FakeProvider::ok();
    let server = server_with(provider.clone(), configured(), None);

    let responses = [
        server.get(CREATE_PAYMENT_PATH).await,
        server.put(CREATE_PAYMENT_PATH).json(&valid_body()).await,
        server.delete(CREATE_PAYMENT_PATH).await,
        server.patch(CREATE_PAYMENT_PATH).text("garbage").await,
        server.method(Method::OPTIONS, CREATE_PAYMENT_PATH).await,
        server
            .method(Method::OPTIONS, CREATE_PAYMENT_PATH)
            .add_header(header::ORIGIN, HeaderValue::from_static("https://elsewhere.example"))
            .add_header(
                header::ACCESS_CONTROL_REQUEST_METHOD,
                HeaderValue::from_static("POST"),
            )
            .await,
    ];

    for response in responses {
        assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        let body: Value = response.json();
        assert_eq!(body["message"], "Method Not Allowed");
    }
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn non_post_wins_over_missing_config() {
    let provider = FakeProvider::ok();
    let server = server_with(provider, XummConfig::unconfigured(), None);

    let response = server.get(CREATE_PAYMENT_PATH).await;
    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn missing_fields_are_bad_request() {
    let provider = FakeProvider::ok();
    let server = server_with(provider.clone(), configured(), None);

    for body in [
        json!({ "amount": 10 }),
        json!({ "destination": "rExampleAddress" }),
        json!({}),
    ] {
        let response = server.post(CREATE_PAYMENT_PATH).json(&body).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "body: {body}");
        let body: Value = response.json();
        assert_eq!(body["message"], MISSING_FIELDS_MESSAGE);
    }

    let response = server.post(CREATE_PAYMENT_PATH).text("not json").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn invalid_amount_is_bad_request() {
    let provider = FakeProvider::ok();
    let server = server_with(provider.clone(), configured(), None);

    for amount in [json!(0), json!("-3"), json!("ten"), json!(0.0000001)] {
        let response = server
            .post(CREATE_PAYMENT_PATH)
            .json(&json!({ "destination": "rExampleAddress", "amount": amount }))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "amount: {amount}");
        let body: Value = response.json();
        assert_eq!(body["message"], INVALID_AMOUNT_MESSAGE);
    }

    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn missing_secret_is_server_error_without_provider_call() {
    for xumm in [XummConfig::unconfigured(), configured().without_api_secret()] {
        let provider = FakeProvider::ok();
        let server = server_with(provider.clone(), xumm, None);

        let response = server.post(CREATE_PAYMENT_PATH).json(&valid_body()).await;

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(
            body["message"],
            "Server configuration error: XUMM API keys are missing."
        );
        assert!(body.get("error").is_none());
        assert!(provider.calls().is_empty());
    }
}

#[tokio::test]
async fn missing_secret_is_reported_before_validation() {
    let provider = FakeProvider::ok();
    let server = server_with(provider, XummConfig::unconfigured(), None);

    let response = server.post(CREATE_PAYMENT_PATH).json(&json!({})).await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn provider_receives_payment_in_drops() {
    let provider = FakeProvider::ok();
    let server = server_with(provider.clone(), configured(), Some("pay-demo.vercel.app"));

    let response = server.post(CREATE_PAYMENT_PATH).json(&valid_body()).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);

    let (credentials, request) = &calls[0];
    assert_eq!(credentials.api_key, "key-123");
    assert_eq!(credentials.api_secret, "secret-456");
    assert_eq!(request.txjson.transaction_type, "Payment");
    assert_eq!(request.txjson.destination, "rExampleAddress");
    assert_eq!(request.txjson.amount, "10000000");
    assert_eq!(request.options.return_url.web, "https://pay-demo.vercel.app");
    assert_eq!(request.options.return_url.app, "xaman://");
}

#[tokio::test]
async fn return_url_falls_back_to_localhost() {
    let provider = FakeProvider::ok();
    let server = server_with(provider.clone(), configured(), None);

    server
        .post(CREATE_PAYMENT_PATH)
        .json(&json!({ "destination": "rExampleAddress", "amount": "12.5" }))
        .await
        .assert_status_ok();

    let (_, request) = &provider.calls()[0];
    assert_eq!(request.txjson.amount, "12500000");
    assert_eq!(request.options.return_url.web, "http://localhost:3000");
}

#[tokio::test]
async fn success_returns_exactly_three_fields() {
    let provider = FakeProvider::ok();
    let server = server_with(provider, configured(), None);

    let response = server.post(CREATE_PAYMENT_PATH).json(&valid_body()).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "qrCodeUrl": format!("https://xumm.app/sign/{UUID}_q.png"),
            "xummDeepLink": format!("https://xumm.app/sign/{UUID}"),
            "payloadUuid": UUID
        })
    );
}

#[tokio::test]
async fn payload_id_is_returned_as_given() {
    let mut reply = complete_payload();
    reply["uuid"] = json!("payload-123");

    let provider = FakeProvider::replying(Reply::Payload(reply));
    let server = server_with(provider, configured(), None);

    let response = server.post(CREATE_PAYMENT_PATH).json(&valid_body()).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["payloadUuid"], "payload-123");
    assert_eq!(body["xummDeepLink"], format!("https://xumm.app/sign/{UUID}"));
}

#[tokio::test]
async fn incomplete_provider_reply_is_server_error() {
    let (logs, _guard) = capture_logs();
    let mut reply = complete_payload();
    reply["refs"].as_object_mut().unwrap().remove("qr_png");

    let provider = FakeProvider::replying(Reply::Payload(reply));
    let server = server_with(provider.clone(), configured(), None);

    let response = server.post(CREATE_PAYMENT_PATH).json(&valid_body()).await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["message"], "Failed to create XUMM payment payload.");
    assert!(body.get("error").is_none());
    assert_eq!(provider.calls().len(), 1);

    // The raw provider reply only goes to the log
    let logs = logs.contents();
    assert!(logs.contains("XUMM payload creation failed or missing data"), "logs: {logs}");
    assert!(logs.contains(UUID), "logs: {logs}");
    assert!(logs.contains("websocket_status"), "logs: {logs}");
}

#[tokio::test]
async fn null_provider_reply_is_server_error() {
    let provider = FakeProvider::replying(Reply::Payload(Value::Null));
    let server = server_with(provider, configured(), None);

    let response = server.post(CREATE_PAYMENT_PATH).json(&valid_body()).await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn provider_failure_message_is_returned() {
    let (logs, _guard) = capture_logs();
    let provider = FakeProvider::replying(Reply::Fail("connect ECONNREFUSED".to_string()));
    let server = server_with(provider, configured(), None);

    let response = server.post(CREATE_PAYMENT_PATH).json(&valid_body()).await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(
        body["message"],
        "Internal server error during XUMM payload creation."
    );
    assert_eq!(body["error"], "connect ECONNREFUSED");

    let logs = logs.contents();
    assert!(
        logs.contains("Error creating XUMM payment payload: connect ECONNREFUSED"),
        "logs: {logs}"
    );
}

#[tokio::test]
async fn health_check() {
    let server = server_with(FakeProvider::ok(), configured(), None);

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "xaman-qr-pay");
}
