//! Links sharing one relation name
//!
//! HAL allows a relation to be written either as a single link object or as
//! an array of link objects. A [`LinkSet`] accepts both on input and writes
//! a bare object whenever it holds exactly one link.

use crate::links::Link;
use crate::{HalError, Result};
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Ordered, non-empty set of links for one relation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSet {
    links: Vec<Link>,
}

impl LinkSet {
    /// Creates a set holding a single link
    pub fn new(link: Link) -> Self {
        Self { links: vec![link] }
    }

    /// Creates a set from a list of links; returns `None` if it is empty
    pub fn from_links(links: Vec<Link>) -> Option<Self> {
        if links.is_empty() {
            None
        } else {
            Some(Self { links })
        }
    }

    /// Decodes a link set from raw JSON
    ///
    /// # Errors
    ///
    /// Returns [`HalError::Format`] carrying the offending body when the JSON
    /// is malformed or is neither a link object nor an array of them.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| HalError::format(body, e))
    }

    /// The first link of the set
    pub fn first(&self) -> &Link {
        &self.links[0]
    }

    pub fn push(&mut self, link: Link) {
        self.links.push(link);
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Link> {
        self.links.iter()
    }

    pub fn as_slice(&self) -> &[Link] {
        &self.links
    }
}

impl<'a> IntoIterator for &'a LinkSet {
    type Item = &'a Link;
    type IntoIter = std::slice::Iter<'a, Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter()
    }
}

impl Serialize for LinkSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.links.as_slice() {
            [single] => single.serialize(serializer),
            links => links.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for LinkSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(LinkSetVisitor)
    }
}

/// Dispatches on the JSON shape: an object is one link, an array is many.
/// Errors inside either shape are reported as-is.
struct LinkSetVisitor;

impl<'de> Visitor<'de> for LinkSetVisitor {
    type Value = LinkSet;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a link object or a non-empty array of link objects")
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> std::result::Result<LinkSet, A::Error> {
        let link = Link::deserialize(de::value::MapAccessDeserializer::new(map))?;
        Ok(LinkSet::new(link))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<LinkSet, A::Error> {
        let mut links = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(link) = seq.next_element::<Link>()? {
            links.push(link);
        }
        LinkSet::from_links(links).ok_or_else(|| de::Error::invalid_length(0, &self))
    }
}
