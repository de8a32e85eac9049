//! Walking links and embedded resources

use crate::common::{mount_get, recording_navigator, start_api};
use hal_navigator::{HalError, Navigator, Params};
use serde::Deserialize;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_getting_the_root() {
    let server = start_api().await;

    let response = Navigator::new(server.uri()).get(None).await.unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.url().as_str(), format!("{}/", server.uri()));
}

#[tokio::test]
async fn test_following_a_templated_link() {
    let server = start_api().await;
    let (nav, recorder) = recording_navigator(&server.uri());

    let response = nav
        .follow_with_params("one", Params::new().with("id", 1))
        .get(None)
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.url().as_str(), format!("{}/a/1", server.uri()));
    assert_eq!(recorder.paths(), vec!["/", "/a/1"]);
}

#[tokio::test]
async fn test_following_a_relative_link() {
    let server = start_api().await;

    let url = Navigator::new(server.uri()).follow("next").resolve().await.unwrap();

    assert_eq!(url, format!("{}/2nd", server.uri()));
}

#[tokio::test]
async fn test_building_a_path_sends_nothing() {
    let server = start_api().await;
    let (nav, recorder) = recording_navigator(&server.uri());

    let _chain = nav.follow("next").extract("customer").follow("one");

    assert!(recorder.requests().is_empty());
}

#[tokio::test]
async fn test_navigating_to_unknown_link() {
    let server = start_api().await;
    let (nav, recorder) = recording_navigator(&server.uri());

    let err = nav.follow("missing").get(None).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        format!(
            "Response didn't contain link with relation: missing ({})",
            server.uri()
        )
    );
    match err {
        HalError::LinkNotFound {
            rel,
            url,
            available,
        } => {
            assert_eq!(rel, "missing");
            assert_eq!(url, server.uri());
            assert_eq!(available, vec!["next", "one", "self"]);
        }
        other => panic!("Expected LinkNotFound, got {:?}", other),
    }
    // The final request is never sent
    assert_eq!(recorder.paths(), vec!["/"]);
}

#[tokio::test]
async fn test_unknown_link_names_the_failing_hop() {
    let server = start_api().await;

    let err = Navigator::new(server.uri())
        .follow("next")
        .follow("missing")
        .resolve()
        .await
        .unwrap_err();

    match err {
        HalError::LinkNotFound { url, available, .. } => {
            assert_eq!(url, format!("{}/2nd", server.uri()));
            assert_eq!(available, vec!["self"]);
        }
        other => panic!("Expected LinkNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_follow_ignores_embedded_section() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/",
        json!({ "_links": { "next": { "href": "/2nd" } }, "_embedded": null }),
    )
    .await;
    mount_get(
        &server,
        "/2nd",
        json!({ "_links": { "last": { "href": "/3rd" } }, "_embedded": { "count": 3 } }),
    )
    .await;

    let url = Navigator::new(server.uri())
        .follow("next")
        .follow("last")
        .resolve()
        .await
        .unwrap();

    assert_eq!(url, format!("{}/3rd", server.uri()));
}

#[tokio::test]
async fn test_protocol_relative_href_stays_on_root_host() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/",
        json!({ "_links": { "away": { "href": "//evil.example.com/x" } } }),
    )
    .await;

    let url = Navigator::new(server.uri())
        .follow("away")
        .resolve()
        .await
        .unwrap();

    assert_eq!(url, format!("{}/x", server.uri()));
}

#[tokio::test]
async fn test_empty_href_is_invalid_url() {
    let server = MockServer::start().await;
    mount_get(&server, "/", json!({ "_links": { "nowhere": { "href": "" } } })).await;

    let err = Navigator::new(server.uri())
        .follow("nowhere")
        .resolve()
        .await
        .unwrap_err();

    assert!(matches!(err, HalError::InvalidUrl { url } if url.is_empty()));
}

#[tokio::test]
async fn test_multi_hop_requests_in_order() {
    let server = MockServer::start().await;
    mount_get(&server, "/", json!({ "_links": { "orders": { "href": "/orders" } } })).await;
    mount_get(
        &server,
        "/orders",
        json!({ "_links": { "next": { "href": "/orders?page=2" } } }),
    )
    .await;

    let (nav, recorder) = recording_navigator(&server.uri());
    let url = nav.follow("orders").follow("next").resolve().await.unwrap();

    assert_eq!(url, format!("{}/orders?page=2", server.uri()));
    assert_eq!(recorder.paths(), vec!["/", "/orders"]);
}

#[derive(Debug, Deserialize)]
struct Customer {
    name: String,
}

#[tokio::test]
async fn test_extracting_an_embedded_resource() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/",
        json!({
            "_links": { "self": { "href": "/" } },
            "_embedded": {
                "customer": {
                    "_links": { "self": { "href": "/customers/7" } },
                    "name": "Stale Fred"
                }
            }
        }),
    )
    .await;
    mount_get(
        &server,
        "/customers/7",
        json!({ "_links": { "self": { "href": "/customers/7" } }, "name": "Fred" }),
    )
    .await;

    let (nav, recorder) = recording_navigator(&server.uri());
    let customer: Customer = nav.extract("customer").unmarshal().await.unwrap();

    assert_eq!(customer.name, "Fred");
    assert_eq!(recorder.paths(), vec!["/", "/customers/7"]);
}

#[tokio::test]
async fn test_extracting_from_an_embedded_array_uses_first_entry() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/",
        json!({
            "_embedded": {
                "orders": [
                    { "_links": { "self": { "href": "/orders/1" } } },
                    { "_links": { "self": { "href": "/orders/2" } } }
                ]
            }
        }),
    )
    .await;

    let url = Navigator::new(server.uri())
        .extract("orders")
        .resolve()
        .await
        .unwrap();

    assert_eq!(url, format!("{}/orders/1", server.uri()));
}

#[tokio::test]
async fn test_extracting_unknown_embedded_resource() {
    let server = start_api().await;

    let err = Navigator::new(server.uri())
        .extract("customer")
        .resolve()
        .await
        .unwrap_err();

    match err {
        HalError::EmbeddedNotFound { rel, url } => {
            assert_eq!(rel, "customer");
            assert_eq!(url, server.uri());
        }
        other => panic!("Expected EmbeddedNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_hop_is_format_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = Navigator::new(server.uri())
        .follow("next")
        .get(None)
        .await
        .unwrap_err();

    match err {
        HalError::Format { url, body, .. } => {
            assert_eq!(url.as_deref(), Some(server.uri().as_str()));
            assert_eq!(body, "<html>oops</html>");
        }
        other => panic!("Expected format error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_forks_navigate_concurrently() {
    let server = start_api().await;
    let base = Navigator::new(server.uri());

    let next = base.follow("next");
    let one = base.follow_with_params("one", Params::new().with("id", "1"));

    let next = tokio::spawn(async move { next.resolve().await });
    let one = tokio::spawn(async move { one.resolve().await });

    assert_eq!(next.await.unwrap().unwrap(), format!("{}/2nd", server.uri()));
    assert_eq!(one.await.unwrap().unwrap(), format!("{}/a/1", server.uri()));
    assert!(base.path().is_empty());
}
