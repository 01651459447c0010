#![allow(dead_code)]

use categorizer_service::config::Settings;
use categorizer_service::startup::Application;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "sk-ant-test-key";
pub const TEST_PDF_BASE64: &str = "JVBERi0xLjQKJcOkw7zDtsOfCg==";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the service on an ephemeral port, pointed at `upstream_base_url`.
    pub async fn spawn(upstream_base_url: &str) -> Self {
        let base_url = upstream_base_url.to_string();
        Self::spawn_with(move |settings| settings.upstream.base_url = base_url).await
    }

    pub async fn spawn_with<F>(customize: F) -> Self
    where
        F: FnOnce(&mut Settings),
    {
        let mut settings = Settings::default();
        settings.server.port = 0; // Random port for testing
        settings.upstream.timeout_secs = 5;
        customize(&mut settings);

        let app = Application::build(settings)
            .await
            .expect("Failed to build test application");
        let port = app.port();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        TestApp {
            address: format!("http://127.0.0.1:{}", port),
            port,
            client: reqwest::Client::new(),
        }
    }

    pub async fn post_analyze(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}/api/analyze", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

pub fn analyze_body(chart_of_accounts: Option<&str>) -> Value {
    let mut body = json!({
        "apiKey": TEST_API_KEY,
        "base64Data": TEST_PDF_BASE64,
    });
    if let Some(chart) = chart_of_accounts {
        body["chartOfAccounts"] = json!(chart);
    }
    body
}

/// A Messages API success body with one text block per entry.
pub fn messages_reply(texts: &[&str]) -> Value {
    let content: Vec<Value> = texts
        .iter()
        .map(|text| json!({"type": "text", "text": text}))
        .collect();

    json!({
        "id": "msg_test",
        "type": "message",
        "role": "assistant",
        "model": "claude-sonnet-4-20250514",
        "content": content,
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 1200, "output_tokens": 85}
    })
}

pub async fn mount_messages(server: &MockServer, response: ResponseTemplate, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(response)
        .expect(expected_calls)
        .mount(server)
        .await;
}
