//! Duplicate-submission suppression through the full dispatch path: the
//! second identical mutating request must be rejected before any network
//! traffic, with no notification.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use outpost::ports::{NotificationSink, Severity};
use outpost::{ApiClient, ApiError, HttpConfig, RequestEnvelope};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct CountingNotifier {
    messages: Mutex<Vec<String>>,
}

impl NotificationSink for CountingNotifier {
    fn show(&self, _severity: Severity, _title: &str, message: &str, _duration: Duration) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

fn ok_body() -> serde_json::Value {
    json!({"code": 200, "msg": "ok"})
}

#[tokio::test]
async fn immediate_repeat_is_suppressed_without_network_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/system/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = Arc::new(CountingNotifier::default());
    let client = ApiClient::builder(HttpConfig::new(server.uri()))
        .notifier(notifier.clone())
        .build()
        .unwrap();

    let body = json!({"userName": "admin", "nickName": "Admin"});
    client.post("/system/user", Some(body.clone())).await.unwrap();

    let error = client.post("/system/user", Some(body)).await.unwrap_err();
    assert!(matches!(error, ApiError::DuplicateSubmission));
    // Suppression rejects silently; the user just double-clicked
    assert!(notifier.messages.lock().unwrap().is_empty());

    server.verify().await;
}

#[tokio::test]
async fn distinct_mutating_calls_are_never_suppressed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/system/role"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
        .expect(2)
        .mount(&server)
        .await;

    let client = ApiClient::builder(HttpConfig::new(server.uri()))
        .build()
        .unwrap();

    client
        .post("/system/role", Some(json!({"roleName": "a"})))
        .await
        .unwrap();
    client
        .post("/system/role", Some(json!({"roleName": "b"})))
        .await
        .unwrap();

    server.verify().await;
}

#[tokio::test]
async fn repeat_after_window_reaches_network() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/system/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
        .expect(2)
        .mount(&server)
        .await;

    let client = ApiClient::builder(HttpConfig::new(server.uri()))
        .dedupe_window(Duration::from_millis(50))
        .build()
        .unwrap();

    let body = json!({"configValue": "on"});
    client.put("/system/config", Some(body.clone())).await.unwrap();
    tokio::time::sleep(Duration::from_millis(80)).await;
    client.put("/system/config", Some(body)).await.unwrap();

    server.verify().await;
}

#[tokio::test]
async fn skip_dedupe_flag_bypasses_suppression() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/monitor/cache/clear"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
        .expect(2)
        .mount(&server)
        .await;

    let client = ApiClient::builder(HttpConfig::new(server.uri()))
        .build()
        .unwrap();

    for _ in 0..2 {
        client
            .send(RequestEnvelope::post("/monitor/cache/clear").skip_dedupe())
            .await
            .unwrap();
    }

    server.verify().await;
}

#[tokio::test]
async fn get_requests_are_not_fingerprinted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/system/dict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
        .expect(2)
        .mount(&server)
        .await;

    let client = ApiClient::builder(HttpConfig::new(server.uri()))
        .build()
        .unwrap();

    client.get("/system/dict", None).await.unwrap();
    client.get("/system/dict", None).await.unwrap();

    server.verify().await;
}
