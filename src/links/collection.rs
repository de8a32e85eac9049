use crate::links::{Link, LinkSet};
use crate::template::{Params, UriTemplate};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The `_links` section of a HAL resource: relation name to link set
///
/// Relations are kept sorted so serialized output is deterministic.
///
/// # Example
///
/// ```
/// use hal_navigator::{Link, Links};
///
/// let links = Links::new()
///     .self_link("/orders")
///     .next("/orders?page=2")
///     .link("ea:find", "/orders{?id}")
///     .add("ea:admin", [Link::new("/admins/2"), Link::new("/admins/5")]);
///
/// assert_eq!(links.href("self").unwrap(), "/orders");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Links {
    items: BTreeMap<String, LinkSet>,
}

impl Links {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends links under `rel`, creating the relation if needed
    ///
    /// Existing links are never replaced. Adding no links leaves the
    /// collection untouched.
    pub fn add<I>(mut self, rel: impl Into<String>, links: I) -> Self
    where
        I: IntoIterator<Item = Link>,
    {
        self.insert(rel, links);
        self
    }

    /// In-place form of [`Links::add`]
    pub fn insert<I>(&mut self, rel: impl Into<String>, links: I)
    where
        I: IntoIterator<Item = Link>,
    {
        let rel = rel.into();
        for link in links {
            match self.items.get_mut(&rel) {
                Some(set) => set.push(link),
                None => {
                    self.items.insert(rel.clone(), LinkSet::new(link));
                }
            }
        }
    }

    /// Adds a link to `href` under `rel`
    pub fn link(self, rel: impl Into<String>, href: impl Into<String>) -> Self {
        self.add(rel, [Link::new(href)])
    }

    /// Adds a `self` link
    pub fn self_link(self, href: impl Into<String>) -> Self {
        self.link("self", href)
    }

    /// Adds a `next` link
    pub fn next(self, href: impl Into<String>) -> Self {
        self.link("next", href)
    }

    pub fn get(&self, rel: &str) -> Option<&LinkSet> {
        self.items.get(rel)
    }

    pub fn contains(&self, rel: &str) -> bool {
        self.items.contains_key(rel)
    }

    /// Relation names in sorted order
    pub fn rels(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LinkSet)> {
        self.items.iter().map(|(rel, set)| (rel.as_str(), set))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Shorthand for [`Links::href_params`] without parameters
    pub fn href(&self, rel: &str) -> Result<String> {
        self.href_params(rel, None)
    }

    /// Resolves the href of `rel`, expanding its URI template with `params`
    ///
    /// Only the first link of a relation is considered. An absent relation
    /// yields an empty string rather than an error; use [`Links::contains`]
    /// when the difference matters.
    ///
    /// # Errors
    ///
    /// Returns [`crate::HalError::Template`] if the href is not a valid URI
    /// template.
    pub fn href_params(&self, rel: &str, params: Option<&Params>) -> Result<String> {
        let Some(set) = self.items.get(rel) else {
            return Ok(String::new());
        };

        let template = UriTemplate::parse(&set.first().href)?;
        let empty = Params::new();
        Ok(template.expand(params.unwrap_or(&empty)))
    }
}
