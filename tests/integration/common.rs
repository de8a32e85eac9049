//! Shared fixtures for the integration tests

use async_trait::async_trait;
use hal_navigator::{HttpClient, Navigator};
use reqwest::header::HeaderMap;
use reqwest::{Method, Request, Response};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A request as it was handed to the transport
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
}

/// Transport that records every request before sending it with reqwest
#[derive(Default)]
pub struct RecordingClient {
    inner: reqwest::Client,
    requests: Mutex<Vec<Recorded>>,
}

impl RecordingClient {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }
}

#[async_trait]
impl HttpClient for RecordingClient {
    async fn execute(&self, request: Request) -> hal_navigator::Result<Response> {
        self.requests.lock().unwrap().push(Recorded {
            method: request.method().clone(),
            path: request.url().path().to_string(),
            headers: request.headers().clone(),
        });
        HttpClient::execute(&self.inner, request).await
    }
}

/// Creates a navigator at `root` whose requests are recorded
pub fn recording_navigator(root: &str) -> (Navigator, Arc<RecordingClient>) {
    let recorder = Arc::new(RecordingClient::default());
    let nav = Navigator::with_client(root, recorder.clone());
    (nav, recorder)
}

/// A 200 response carrying `body` as HAL
pub fn hal(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "application/hal+json")
}

/// Serves `body` for GET requests on `at`
pub async fn mount_get(server: &MockServer, at: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(hal(body))
        .mount(server)
        .await;
}

/// Starts a server with a root linking to `/2nd` and to the template
/// `/a/{id}`
pub async fn start_api() -> MockServer {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_get(
        &server,
        "/",
        json!({
            "_links": {
                "self": { "href": "/" },
                "next": { "href": "/2nd" },
                "one": { "href": format!("{}/a/{{id}}", base_url), "templated": true }
            }
        }),
    )
    .await;

    mount_get(
        &server,
        "/2nd",
        json!({ "_links": { "self": { "href": "/2nd" } }, "page": 2 }),
    )
    .await;

    mount_get(
        &server,
        "/a/1",
        json!({ "_links": { "self": { "href": "/a/1" } }, "id": 1 }),
    )
    .await;

    server
}
