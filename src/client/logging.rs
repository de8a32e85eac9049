use crate::client::HttpClient;
use crate::Result;
use async_trait::async_trait;
use reqwest::{Body, Request, Response};

/// Decorator that logs every request before delegating to the wrapped client
///
/// ```no_run
/// use hal_navigator::{LoggingHttpClient, Navigator};
/// use std::sync::Arc;
///
/// let client = LoggingHttpClient::new(reqwest::Client::new());
/// let nav = Navigator::with_client("https://api.example.com/", Arc::new(client));
/// ```
#[derive(Debug, Clone)]
pub struct LoggingHttpClient<C> {
    inner: C,
}

impl<C: HttpClient> LoggingHttpClient<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for LoggingHttpClient<C> {
    async fn execute(&self, request: Request) -> Result<Response> {
        tracing::info!("{} {}", request.method(), request.url());
        self.inner.execute(request).await
    }

    async fn get(&self, url: &str) -> Result<Response> {
        tracing::info!("GET {}", url);
        self.inner.get(url).await
    }

    async fn head(&self, url: &str) -> Result<Response> {
        tracing::info!("HEAD {}", url);
        self.inner.head(url).await
    }

    async fn post(&self, url: &str, content_type: &str, body: Body) -> Result<Response> {
        tracing::info!("POST {}", url);
        self.inner.post(url, content_type, body).await
    }

    async fn post_form(&self, url: &str, form: &[(String, String)]) -> Result<Response> {
        tracing::info!("POST {}", url);
        self.inner.post_form(url, form).await
    }
}
