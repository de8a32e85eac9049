//! Path steps
//!
//! A navigator's path is a list of [`Operation`]s. Each one knows how to get
//! from the URL of the current resource to the URL of the next:
//! - `Follow` reads only the current resource's `_links` and expands a
//!   relation
//! - `Extract` reads the current resource's `_embedded` section and jumps to
//!   the embedded resource's own `self` link

use crate::navigator::Navigator;
use crate::template::Params;
use crate::{HalError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// One hop of a navigation path
#[derive(Debug, Clone)]
pub enum Operation {
    Follow(Follow),
    Extract(Extract),
}

/// Follows a link relation, expanding its template with `params`
#[derive(Debug, Clone)]
pub struct Follow {
    rel: String,
    params: Option<Params>,
    headers: HeaderMap,
}

/// Moves to the canonical location of an embedded resource
#[derive(Debug, Clone)]
pub struct Extract {
    rel: String,
    headers: HeaderMap,
}

impl Operation {
    pub fn follow(rel: impl Into<String>, params: Option<Params>) -> Self {
        Self::Follow(Follow {
            rel: rel.into(),
            params,
            headers: HeaderMap::new(),
        })
    }

    pub fn extract(rel: impl Into<String>) -> Self {
        Self::Extract(Extract {
            rel: rel.into(),
            headers: HeaderMap::new(),
        })
    }

    /// The relation this step looks up
    pub fn rel(&self) -> &str {
        match self {
            Self::Follow(follow) => &follow.rel,
            Self::Extract(extract) => &extract.rel,
        }
    }

    /// Headers sent only with this step's request
    pub fn headers(&self) -> &HeaderMap {
        match self {
            Self::Follow(follow) => &follow.headers,
            Self::Extract(extract) => &extract.headers,
        }
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        match self {
            Self::Follow(follow) => &mut follow.headers,
            Self::Extract(extract) => &mut extract.headers,
        }
    }

    /// Replaces every value of `name` with `value`
    pub fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers_mut().insert(name, value);
    }

    /// Appends `value` to the values of `name`
    pub fn add_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers_mut().append(name, value);
    }

    /// Fetches the resource at `url` and returns the URL of the next hop
    ///
    /// The returned URL may be relative; the navigator makes it absolute.
    pub async fn fetch(&self, nav: &Navigator, url: &str) -> Result<String> {
        match self {
            Self::Follow(follow) => follow.fetch(nav, url).await,
            Self::Extract(extract) => extract.fetch(nav, url).await,
        }
    }
}

impl Follow {
    async fn fetch(&self, nav: &Navigator, url: &str) -> Result<String> {
        let links = nav.get_links(url, &self.headers).await?;

        if !links.contains(&self.rel) {
            return Err(HalError::LinkNotFound {
                rel: self.rel.clone(),
                url: url.to_string(),
                available: links.rels().map(String::from).collect(),
            });
        }

        let href = links.href_params(&self.rel, self.params.as_ref())?;
        if href.is_empty() {
            return Err(HalError::InvalidUrl { url: href });
        }

        Ok(href)
    }
}

impl Extract {
    async fn fetch(&self, nav: &Navigator, url: &str) -> Result<String> {
        let resource = nav.get_resource(url, &self.headers).await?;

        let embedded = resource
            .embedded(&self.rel)
            .ok_or_else(|| HalError::EmbeddedNotFound {
                rel: self.rel.clone(),
                url: url.to_string(),
            })?;

        let href = embedded.links.href("self")?;
        if href.is_empty() {
            return Err(HalError::InvalidUrl { url: href });
        }

        Ok(href)
    }
}
