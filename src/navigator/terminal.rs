//! Terminal methods
//!
//! When a terminal method runs, the navigator first requests the root, then
//! each relation on the path until it reaches the tip. The tip's URL is then
//! used for the requested action. Any error along the way stops the walk and
//! is returned immediately.
//!
//! Headers are layered in this order, later layers replacing earlier values
//! of the same name: the default `Accept`, session headers, the explicit
//! Content-Type of body-carrying methods, then per-call headers.

use crate::client::{encode_form, set_body};
use crate::navigator::resolve::{make_absolute, merge_headers, new_hal_request};
use crate::navigator::Navigator;
use crate::{HalError, Result};
use reqwest::header::{HeaderMap, LOCATION};
use reqwest::{Body, Method, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

impl Navigator {
    /// Performs a GET on the tip of the path
    pub async fn get(&self, headers: Option<&HeaderMap>) -> Result<Response> {
        self.send(Method::GET, None, headers).await
    }

    /// Performs an OPTIONS request on the tip of the path
    pub async fn options(&self, headers: Option<&HeaderMap>) -> Result<Response> {
        self.send(Method::OPTIONS, None, headers).await
    }

    /// Performs a DELETE on the tip of the path
    pub async fn delete(&self, headers: Option<&HeaderMap>) -> Result<Response> {
        self.send(Method::DELETE, None, headers).await
    }

    /// POSTs `body` with the given content type to the tip of the path
    pub async fn post(
        &self,
        content_type: &str,
        body: impl Into<Body>,
        headers: Option<&HeaderMap>,
    ) -> Result<Response> {
        self.send(Method::POST, Some((content_type, body.into())), headers)
            .await
    }

    /// PUTs `body` with the given content type to the tip of the path
    pub async fn put(
        &self,
        content_type: &str,
        body: impl Into<Body>,
        headers: Option<&HeaderMap>,
    ) -> Result<Response> {
        self.send(Method::PUT, Some((content_type, body.into())), headers)
            .await
    }

    /// PATCHes the tip of the path with `body`
    pub async fn patch(
        &self,
        content_type: &str,
        body: impl Into<Body>,
        headers: Option<&HeaderMap>,
    ) -> Result<Response> {
        self.send(Method::PATCH, Some((content_type, body.into())), headers)
            .await
    }

    /// POSTs url-encoded form fields to the tip of the path
    pub async fn post_form<K, V>(
        &self,
        form: &[(K, V)],
        headers: Option<&HeaderMap>,
    ) -> Result<Response>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let body = encode_form(form);
        self.send(
            Method::POST,
            Some(("application/x-www-form-urlencoded", body.into())),
            headers,
        )
        .await
    }

    /// GETs the tip of the path and decodes its JSON body into `T`
    ///
    /// The response body is always consumed, whether decoding succeeds or
    /// not.
    pub async fn unmarshal<T: DeserializeOwned>(&self) -> Result<T> {
        let response = self.get(None).await?;
        let url = response.url().to_string();

        let body = response
            .bytes()
            .await
            .map_err(|e| HalError::transport(&url, e))?;
        serde_json::from_slice(&body).map_err(|e| HalError::format(&body, e).at_url(&url))
    }

    /// Starts a new navigator at the `Location` of `response`
    ///
    /// The location is made absolute against the root URI. The new navigator
    /// has an empty path and keeps this navigator's client and session
    /// headers.
    ///
    /// # Errors
    ///
    /// Returns [`HalError::MissingLocation`] if the response has no Location
    /// header.
    pub fn location(&self, response: &Response) -> Result<Navigator> {
        let location = response
            .headers()
            .get(LOCATION)
            .ok_or(HalError::MissingLocation)?
            .to_str()
            .map_err(|e| HalError::InvalidHeader(format!("Location: {}", e)))?;

        Ok(Navigator {
            client: self.client.clone(),
            session_headers: self.session_headers.clone(),
            path: Vec::new(),
            root_uri: make_absolute(location, &self.root_uri)?,
        })
    }

    async fn send(
        &self,
        method: Method,
        body: Option<(&str, Body)>,
        headers: Option<&HeaderMap>,
    ) -> Result<Response> {
        let url = self.resolve().await?;

        let mut request = new_hal_request(method, &url)?;
        merge_headers(&mut request, &self.session_headers);
        if let Some((content_type, body)) = body {
            set_body(&mut request, content_type, body)?;
        }
        if let Some(headers) = headers {
            merge_headers(&mut request, headers);
        }

        debug!(method = %request.method(), url = %url, "Sending request");
        self.client.execute(request).await
    }
}
