use crate::{HalError, Result};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Body, Method, Request};
use url::Url;

/// Builds a bodyless request for `url`
pub fn new_request(method: Method, url: &str) -> Result<Request> {
    Ok(Request::new(method, Url::parse(url)?))
}

/// Attaches `body` with an explicit Content-Type
pub fn set_body(request: &mut Request, content_type: &str, body: Body) -> Result<()> {
    let content_type = HeaderValue::from_str(content_type)
        .map_err(|e| HalError::InvalidHeader(format!("Content-Type '{}': {}", content_type, e)))?;
    request.headers_mut().insert(CONTENT_TYPE, content_type);
    *request.body_mut() = Some(body);
    Ok(())
}

/// Encodes form fields as `application/x-www-form-urlencoded`
pub fn encode_form<K, V>(form: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(form.iter().map(|(k, v)| (k.as_ref(), v.as_ref())))
        .finish()
}
