//! Continuing navigation from a Location header

use crate::common::{mount_get, recording_navigator};
use hal_navigator::HalError;
use reqwest::header::{HeaderName, HeaderValue};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn start_created_api(location: Option<&str>) -> MockServer {
    let server = MockServer::start().await;
    mount_get(&server, "/", json!({ "_links": { "orders": { "href": "/orders" } } })).await;

    let mut created = ResponseTemplate::new(201);
    if let Some(location) = location {
        created = created.insert_header("location", location);
    }
    Mock::given(method("POST"))
        .and(path("/orders"))
        .respond_with(created)
        .mount(&server)
        .await;

    mount_get(
        &server,
        "/orders/9",
        json!({ "_links": { "self": { "href": "/orders/9" } }, "id": 9 }),
    )
    .await;

    server
}

#[tokio::test]
async fn test_relative_location() {
    let server = start_created_api(Some("/orders/9")).await;
    let (nav, recorder) = recording_navigator(&server.uri());
    let nav = nav.set_session_header(
        HeaderName::from_static("x-session"),
        HeaderValue::from_static("abc"),
    );

    let response = nav.follow("orders").post("application/json", "{}", None).await.unwrap();
    let created = nav.location(&response).unwrap();

    assert_eq!(created.root_uri(), format!("{}/orders/9", server.uri()));
    assert!(created.path().is_empty());
    assert_eq!(created.session_headers()["x-session"], "abc");

    // The new navigator keeps sending through the same client
    let order: serde_json::Value = created.unmarshal().await.unwrap();
    assert_eq!(order["id"], 9);
    assert_eq!(recorder.paths(), vec!["/", "/orders", "/orders/9"]);
}

#[tokio::test]
async fn test_absolute_location() {
    let server = start_created_api(Some("http://elsewhere.example.com/orders/9")).await;
    let (nav, _recorder) = recording_navigator(&server.uri());

    let response = nav.follow("orders").post("application/json", "{}", None).await.unwrap();
    let created = nav.location(&response).unwrap();

    assert_eq!(created.root_uri(), "http://elsewhere.example.com/orders/9");
}

#[tokio::test]
async fn test_missing_location() {
    let server = start_created_api(None).await;
    let (nav, _recorder) = recording_navigator(&server.uri());

    let response = nav.follow("orders").post("application/json", "{}", None).await.unwrap();
    let err = nav.location(&response).unwrap_err();

    assert!(matches!(err, HalError::MissingLocation));
}
