use crate::links::{Links, Resource};
use crate::navigator::Navigator;
use crate::{HalError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Method, Request};
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// Media types requested by every navigator request
pub const HAL_ACCEPT: &str = "application/hal+json, application/json";

impl Navigator {
    /// Resolves the path to the URL of its last hop
    ///
    /// Starting at the root URI, each operation fetches the current resource
    /// and yields the next URL, which is made absolute against the root when
    /// relative. Resolution stops at the first failing hop.
    pub async fn resolve(&self) -> Result<String> {
        let mut url = self.root_uri.clone();

        for (hop, operation) in self.path.iter().enumerate() {
            debug!(hop, rel = operation.rel(), url = %url, "Resolving hop");
            let next = operation.fetch(self, &url).await?;
            url = make_absolute(&next, &self.root_uri)?;
        }

        Ok(url)
    }

    /// GETs `url` with session and step headers and decodes it as HAL
    pub(crate) async fn get_resource(&self, url: &str, step_headers: &HeaderMap) -> Result<Resource> {
        let body = self.get_body(url, step_headers).await?;
        Resource::from_json(&body).map_err(|e| e.at_url(url))
    }

    /// Like `get_resource`, but only `_links` is decoded
    pub(crate) async fn get_links(&self, url: &str, step_headers: &HeaderMap) -> Result<Links> {
        let body = self.get_body(url, step_headers).await?;
        serde_json::from_slice::<LinksOnly>(&body)
            .map(|doc| doc.links)
            .map_err(|e| HalError::format(&body, e).at_url(url))
    }

    async fn get_body(&self, url: &str, step_headers: &HeaderMap) -> Result<Vec<u8>> {
        let mut request = new_hal_request(Method::GET, url)?;
        merge_headers(&mut request, &self.session_headers);
        merge_headers(&mut request, step_headers);

        let response = self.client.execute(request).await?;
        debug!(url, status = %response.status(), "Fetched resource");

        let body = response
            .bytes()
            .await
            .map_err(|e| HalError::transport(url, e))?;
        Ok(body.to_vec())
    }
}

#[derive(Deserialize)]
struct LinksOnly {
    #[serde(rename = "_links", default)]
    links: Links,
}

/// Builds a request that asks for HAL or plain JSON
pub(crate) fn new_hal_request(method: Method, url: &str) -> Result<Request> {
    let mut request = crate::client::new_request(method, url)?;
    request
        .headers_mut()
        .insert(ACCEPT, HeaderValue::from_static(HAL_ACCEPT));
    Ok(request)
}

/// Applies a header layer; names present in `layer` replace earlier values
pub(crate) fn merge_headers(request: &mut Request, layer: &HeaderMap) {
    let headers = request.headers_mut();
    for name in layer.keys() {
        headers.remove(name);
        for value in layer.get_all(name) {
            headers.append(name.clone(), value.clone());
        }
    }
}

/// Makes `current` absolute using the scheme, host, port and credentials of
/// `root` when it is relative
pub(crate) fn make_absolute(current: &str, root: &str) -> Result<String> {
    match Url::parse(current) {
        Ok(_) => Ok(current.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let mut base = Url::parse(root)?;
            base.set_path("/");
            base.set_query(None);
            base.set_fragment(None);

            // A network-path reference (`//host/x`) brings its own authority,
            // which is replaced by the root's
            let mut absolute = base.join(current)?;
            let invalid = || HalError::InvalidUrl {
                url: current.to_string(),
            };
            absolute.set_host(base.host_str())?;
            absolute.set_port(base.port()).map_err(|_| invalid())?;
            absolute.set_username(base.username()).map_err(|_| invalid())?;
            absolute.set_password(base.password()).map_err(|_| invalid())?;
            Ok(absolute.to_string())
        }
        Err(e) => Err(e.into()),
    }
}
