//! HTTP transport used by the navigator
//!
//! The navigator never talks to the network directly. Every request goes
//! through an [`HttpClient`], which is implemented for `reqwest::Client` and
//! can be wrapped by decorators such as [`LoggingHttpClient`] to add logging,
//! caching or request recording.
//!
//! Implementations must be safe to share between concurrent navigation
//! chains. Timeouts and cancellation belong to the implementation's own
//! configuration.

mod builder;
mod logging;
mod request;

pub use builder::build_http_client;
pub use logging::LoggingHttpClient;
pub use request::{encode_form, new_request, set_body};

use crate::{HalError, Result};
use async_trait::async_trait;
use reqwest::{Body, Client, Method, Request, Response};
use std::sync::Arc;

/// Request-issuing capability consumed by the navigator
///
/// Only [`HttpClient::execute`] is required; the convenience methods build a
/// request and hand it to `execute` unless an implementation overrides them.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends a fully built request
    async fn execute(&self, request: Request) -> Result<Response>;

    async fn get(&self, url: &str) -> Result<Response> {
        self.execute(new_request(Method::GET, url)?).await
    }

    async fn head(&self, url: &str) -> Result<Response> {
        self.execute(new_request(Method::HEAD, url)?).await
    }

    async fn post(&self, url: &str, content_type: &str, body: Body) -> Result<Response> {
        let mut request = new_request(Method::POST, url)?;
        set_body(&mut request, content_type, body)?;
        self.execute(request).await
    }

    async fn post_form(&self, url: &str, form: &[(String, String)]) -> Result<Response> {
        let mut request = new_request(Method::POST, url)?;
        set_body(
            &mut request,
            "application/x-www-form-urlencoded",
            encode_form(form).into(),
        )?;
        self.execute(request).await
    }
}

#[async_trait]
impl HttpClient for Client {
    async fn execute(&self, request: Request) -> Result<Response> {
        let url = request.url().to_string();
        Client::execute(self, request)
            .await
            .map_err(|e| HalError::transport(url, e))
    }
}

#[async_trait]
impl<C: HttpClient + ?Sized> HttpClient for Arc<C> {
    async fn execute(&self, request: Request) -> Result<Response> {
        (**self).execute(request).await
    }

    async fn get(&self, url: &str) -> Result<Response> {
        (**self).get(url).await
    }

    async fn head(&self, url: &str) -> Result<Response> {
        (**self).head(url).await
    }

    async fn post(&self, url: &str, content_type: &str, body: Body) -> Result<Response> {
        (**self).post(url, content_type, body).await
    }

    async fn post_form(&self, url: &str, form: &[(String, String)]) -> Result<Response> {
        (**self).post_form(url, form).await
    }
}
