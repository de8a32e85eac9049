//! Headers and terminal request methods

use crate::common::{mount_get, recording_navigator, start_api};
use hal_navigator::navigator::HAL_ACCEPT;
use hal_navigator::{HalError, LoggingHttpClient, Navigator};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn name(name: &'static str) -> HeaderName {
    HeaderName::from_static(name)
}

fn value(value: &'static str) -> HeaderValue {
    HeaderValue::from_static(value)
}

/// Starts a server with a single `orders` link and mounts `mock` on `/orders`
async fn start_orders_api(mock: Mock) -> MockServer {
    let server = MockServer::start().await;
    mount_get(&server, "/", json!({ "_links": { "orders": { "href": "/orders" } } })).await;
    mock.mount(&server).await;
    server
}

#[tokio::test]
async fn test_session_and_request_header_scope() {
    let server = MockServer::start().await;
    mount_get(&server, "/", json!({ "_links": { "first": { "href": "/first" } } })).await;
    mount_get(&server, "/first", json!({ "_links": { "second": { "href": "/second" } } })).await;
    mount_get(&server, "/second", json!({ "done": true })).await;

    let (nav, recorder) = recording_navigator(&server.uri());
    let response = nav
        .set_session_header(name("x-session"), value("abc"))
        .follow("first")
        .follow("second")
        .add_request_header(name("x-hop"), value("2"))
        .get(None)
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let requests = recorder.requests();
    assert_eq!(recorder.paths(), vec!["/", "/first", "/second"]);
    for request in &requests {
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.headers["x-session"], "abc");
        assert_eq!(request.headers[ACCEPT], HAL_ACCEPT);
    }

    // The second hop fetches /first to find the `second` relation
    assert!(!requests[0].headers.contains_key("x-hop"));
    assert_eq!(requests[1].headers["x-hop"], "2");
    assert!(!requests[2].headers.contains_key("x-hop"));
}

#[tokio::test]
async fn test_per_call_headers_replace_session_headers() {
    let server = start_api().await;
    let (nav, recorder) = recording_navigator(&server.uri());

    let mut headers = HeaderMap::new();
    headers.insert(name("x-tenant"), value("per-call"));
    headers.insert(ACCEPT, value("application/json"));

    nav.set_session_header(name("x-tenant"), value("session"))
        .get(Some(&headers))
        .await
        .unwrap();

    let requests = recorder.requests();
    let sent = &requests[0].headers;
    let tenants: Vec<_> = sent.get_all("x-tenant").iter().collect();
    assert_eq!(tenants, vec!["per-call"]);
    assert_eq!(sent[ACCEPT], "application/json");
}

#[tokio::test]
async fn test_post_sends_body_and_content_type() {
    let server = start_orders_api(
        Mock::given(method("POST"))
            .and(path("/orders"))
            .and(header("content-type", "application/json"))
            .and(body_string(r#"{"item":"tea"}"#))
            .respond_with(ResponseTemplate::new(201))
            .expect(1),
    )
    .await;

    let response = Navigator::new(server.uri())
        .follow("orders")
        .post("application/json", r#"{"item":"tea"}"#, None)
        .await
        .unwrap();

    assert_eq!(response.status(), 201);
}

#[tokio::test]
async fn test_content_type_argument_replaces_session_value() {
    let server = start_orders_api(
        Mock::given(method("PUT"))
            .and(path("/orders"))
            .respond_with(ResponseTemplate::new(204)),
    )
    .await;
    let (nav, recorder) = recording_navigator(&server.uri());

    nav.set_session_header(CONTENT_TYPE, value("text/plain"))
        .follow("orders")
        .put("application/json", "{}", None)
        .await
        .unwrap();

    let requests = recorder.requests();
    let put = requests.last().unwrap();
    assert_eq!(put.method, Method::PUT);
    assert_eq!(put.headers[CONTENT_TYPE], "application/json");
}

#[tokio::test]
async fn test_put_and_patch() {
    let server = MockServer::start().await;
    mount_get(&server, "/", json!({ "_links": { "orders": { "href": "/orders" } } })).await;
    Mock::given(method("PUT"))
        .and(path("/orders"))
        .and(body_string("replace"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/orders"))
        .and(header("content-type", "application/merge-patch+json"))
        .and(body_string(r#"{"qty":3}"#))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let orders = Navigator::new(server.uri()).follow("orders");
    let put = orders.put("text/plain", "replace", None).await.unwrap();
    let patch = orders
        .patch("application/merge-patch+json", r#"{"qty":3}"#.to_string(), None)
        .await
        .unwrap();

    assert_eq!(put.status(), 204);
    assert_eq!(patch.status(), 200);
}

#[tokio::test]
async fn test_delete_and_options() {
    let server = MockServer::start().await;
    mount_get(&server, "/", json!({ "_links": { "orders": { "href": "/orders" } } })).await;
    Mock::given(method("DELETE"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("OPTIONS"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(200).insert_header("allow", "DELETE"))
        .expect(1)
        .mount(&server)
        .await;

    let orders = Navigator::new(server.uri()).follow("orders");

    assert_eq!(orders.delete(None).await.unwrap().status(), 204);
    let options = orders.options(None).await.unwrap();
    assert_eq!(options.headers()["allow"], "DELETE");
}

#[tokio::test]
async fn test_post_form() {
    let server = start_orders_api(
        Mock::given(method("POST"))
            .and(path("/orders"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string("name=Fred+Bloggs&qty=2"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1),
    )
    .await;

    let response = Navigator::new(server.uri())
        .follow("orders")
        .post_form(&[("name", "Fred Bloggs"), ("qty", "2")], None)
        .await
        .unwrap();

    assert_eq!(response.status(), 201);
}

#[derive(Debug, Deserialize)]
struct Page {
    page: u32,
}

#[tokio::test]
async fn test_unmarshal() {
    let server = start_api().await;

    let page: Page = Navigator::new(server.uri())
        .follow("next")
        .unmarshal()
        .await
        .unwrap();

    assert_eq!(page.page, 2);
}

#[tokio::test]
async fn test_unmarshal_invalid_body() {
    let server = start_orders_api(
        Mock::given(method("GET"))
            .and(path("/orders"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json")),
    )
    .await;

    let err = Navigator::new(server.uri())
        .follow("orders")
        .unmarshal::<Value>()
        .await
        .unwrap_err();

    assert!(err
        .to_string()
        .starts_with(&format!("Unable to decode 'not json' from {}/orders:", server.uri())));
    assert!(matches!(err, HalError::Format { .. }));
}

#[tokio::test]
async fn test_logging_client_in_navigator() {
    let server = start_api().await;
    let client = Arc::new(LoggingHttpClient::new(reqwest::Client::new()));

    let response = Navigator::with_client(server.uri(), client)
        .follow("next")
        .get(None)
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_swapping_client_keeps_path() {
    let server = start_api().await;
    let (recording, recorder) = recording_navigator(&server.uri());

    let nav = Navigator::new(server.uri())
        .follow("next")
        .set_http_client(recording.http_client().clone());
    nav.get(None).await.unwrap();

    assert_eq!(recorder.paths(), vec!["/", "/2nd"]);
}
