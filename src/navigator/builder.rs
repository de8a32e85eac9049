use crate::client::HttpClient;
use crate::navigator::Operation;
use crate::template::Params;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::fmt;
use std::sync::Arc;

/// Lazily evaluated walk through a HAL API
///
/// A `Navigator` starts at a root URI and accumulates a path of link
/// relations to follow. Building the path performs no I/O; requests are only
/// issued by the terminal methods (`get`, `post`, `unmarshal`, ...), which
/// resolve every hop in order and then act on the final URL.
///
/// ```no_run
/// use hal_navigator::Navigator;
///
/// # async fn example() -> hal_navigator::Result<()> {
/// let response = Navigator::new("http://api.example.com")
///     .follow("products")
///     .follow("next")
///     .get(None)
///     .await?;
/// # Ok(())
/// # }
/// ```
///
/// Navigators are values: every chaining method returns a new navigator
/// and leaves the receiver untouched, so one base navigator can be forked
/// into independent chains, including across tasks.
#[derive(Clone)]
pub struct Navigator {
    pub(crate) client: Arc<dyn HttpClient>,
    /// Headers sent with every request of the chain
    pub(crate) session_headers: HeaderMap,
    /// The follow queue
    pub(crate) path: Vec<Operation>,
    /// Where navigation begins
    pub(crate) root_uri: String,
}

impl Navigator {
    /// Creates a navigator rooted at `uri` using a default `reqwest::Client`
    pub fn new(uri: impl Into<String>) -> Self {
        Self::with_client(uri, Arc::new(reqwest::Client::new()))
    }

    /// Creates a navigator rooted at `uri` that sends requests through `client`
    pub fn with_client(uri: impl Into<String>, client: Arc<dyn HttpClient>) -> Self {
        Self {
            client,
            session_headers: HeaderMap::new(),
            path: Vec::new(),
            root_uri: uri.into(),
        }
    }

    pub fn root_uri(&self) -> &str {
        &self.root_uri
    }

    pub fn path(&self) -> &[Operation] {
        &self.path
    }

    pub fn session_headers(&self) -> &HeaderMap {
        &self.session_headers
    }

    pub fn http_client(&self) -> &Arc<dyn HttpClient> {
        &self.client
    }

    /// Returns a navigator that sends its requests through `client`
    pub fn set_http_client(&self, client: Arc<dyn HttpClient>) -> Self {
        Self {
            client,
            ..self.clone()
        }
    }

    /// Adds a relation to the follow queue
    pub fn follow(&self, rel: impl Into<String>) -> Self {
        self.push(Operation::follow(rel, None))
    }

    /// Adds a relation whose URI template is expanded with `params`
    pub fn follow_with_params(&self, rel: impl Into<String>, params: Params) -> Self {
        self.push(Operation::follow(rel, Some(params)))
    }

    /// Adds a jump to the `self` link of the embedded resource `rel`
    pub fn extract(&self, rel: impl Into<String>) -> Self {
        self.push(Operation::extract(rel))
    }

    fn push(&self, operation: Operation) -> Self {
        let mut path = self.path.clone();
        path.push(operation);
        Self {
            client: Arc::clone(&self.client),
            session_headers: self.session_headers.clone(),
            path,
            root_uri: self.root_uri.clone(),
        }
    }

    /// Sets a header on every request of the chain, replacing earlier values
    pub fn set_session_header(&self, name: HeaderName, value: HeaderValue) -> Self {
        let mut headers = self.session_headers.clone();
        headers.insert(name, value);
        self.with_session_headers(headers)
    }

    /// Adds a header value to every request of the chain
    pub fn add_session_header(&self, name: HeaderName, value: HeaderValue) -> Self {
        let mut headers = self.session_headers.clone();
        headers.append(name, value);
        self.with_session_headers(headers)
    }

    fn with_session_headers(&self, session_headers: HeaderMap) -> Self {
        Self {
            client: Arc::clone(&self.client),
            session_headers,
            path: self.path.clone(),
            root_uri: self.root_uri.clone(),
        }
    }

    /// Sets a header on the request of the most recently added hop only
    pub fn set_request_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        match self.path.last_mut() {
            Some(operation) => operation.set_header(name, value),
            None => tracing::warn!(header = %name, "No hop to attach request header to"),
        }
        self
    }

    /// Adds a header value to the request of the most recently added hop only
    pub fn add_request_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        match self.path.last_mut() {
            Some(operation) => operation.add_header(name, value),
            None => tracing::warn!(header = %name, "No hop to attach request header to"),
        }
        self
    }
}

impl fmt::Debug for Navigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("root_uri", &self.root_uri)
            .field("path", &self.path)
            .field("session_headers", &self.session_headers)
            .finish_non_exhaustive()
    }
}
