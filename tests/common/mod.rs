//! Replays recorded API interactions ("cassettes") on a wiremock server.
//!
//! A cassette lives in `tests/fixtures/<name>.json`:
//!
//! ```json
//! {"interactions": [
//!   {"request": {"method": "POST", "path": "/api/v1/...", "body": {...}},
//!    "response": {"status": 200, "body": {...}, "headers": {"k": "v"}}}
//! ]}
//! ```
//!
//! Each interaction is mounted once and must be hit exactly once.

#![allow(dead_code)]

use std::collections::BTreeMap;

use datadog_api_client::{Client, Config, RetryConfig};
use serde::Deserialize;
use serde_json::Value;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_APP_KEY: &str = "test-app-key";

#[derive(Debug, Deserialize)]
pub struct Cassette {
    pub interactions: Vec<Interaction>,
}

#[derive(Debug, Deserialize)]
pub struct Interaction {
    pub request: RecordedRequest,
    pub response: RecordedResponse,
}

#[derive(Debug, Deserialize)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub body: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct RecordedResponse {
    pub status: u16,
    #[serde(default)]
    pub body: Option<Value>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

/// Loads `tests/fixtures/<name>.json`.
pub fn load_cassette(name: &str) -> Cassette {
    let file = format!("{}/tests/fixtures/{name}.json", env!("CARGO_MANIFEST_DIR"));
    let raw = std::fs::read_to_string(&file).unwrap_or_else(|err| panic!("read {file}: {err}"));
    serde_json::from_str(&raw).unwrap_or_else(|err| panic!("parse {file}: {err}"))
}

/// Starts a server replaying the named cassette.
pub async fn replay(name: &str) -> MockServer {
    let server = MockServer::start().await;
    mount_cassette(&server, &load_cassette(name)).await;
    server
}

pub async fn mount_cassette(server: &MockServer, cassette: &Cassette) {
    for interaction in &cassette.interactions {
        let req = &interaction.request;
        let mut mock = Mock::given(method(req.method.as_str()))
            .and(path(req.path.as_str()))
            .and(header("DD-API-KEY", TEST_API_KEY))
            .and(header("DD-APPLICATION-KEY", TEST_APP_KEY));
        if let Some(body) = &req.body {
            mock = mock.and(body_json(body.clone()));
        }

        let resp = &interaction.response;
        let mut template = ResponseTemplate::new(resp.status);
        if let Some(body) = &resp.body {
            template = template.set_body_json(body.clone());
        }
        for (key, value) in &resp.headers {
            template = template.insert_header(key.as_str(), value.as_str());
        }

        mock.respond_with(template)
            .up_to_n_times(1)
            .expect(1)
            .mount(server)
            .await;
    }
}

/// Client pointing at `base_url` with both keys set and retries disabled.
pub fn test_client(base_url: &str) -> Client {
    Client::new(Config {
        base_url: Some(base_url.to_string()),
        api_key: Some(TEST_API_KEY.to_string()),
        application_key: Some(TEST_APP_KEY.to_string()),
        retry: Some(RetryConfig::disabled()),
        ..Default::default()
    })
    .expect("client")
}
