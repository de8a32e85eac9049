use crate::links::Links;
use crate::{HalError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A HAL document: links, embedded resources, and the remaining properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "_links", default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,

    #[serde(
        rename = "_embedded",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub embedded: BTreeMap<String, Embedded>,

    /// Every other member of the document
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

/// One embedded resource or a list of them under a single relation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Embedded {
    Single(Box<Resource>),
    Many(Vec<Resource>),
}

impl Embedded {
    /// The single resource, or the first of a list
    pub fn first(&self) -> Option<&Resource> {
        match self {
            Self::Single(resource) => Some(resource),
            Self::Many(resources) => resources.first(),
        }
    }
}

impl Resource {
    pub fn new(links: Links) -> Self {
        Self {
            links,
            ..Self::default()
        }
    }

    /// Decodes a resource from a response body
    ///
    /// # Errors
    ///
    /// Returns [`HalError::Format`] with the body attached when it is not a
    /// valid HAL document.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| HalError::format(body, e))
    }

    /// Looks up the embedded resource for `rel`, taking the first of a list
    pub fn embedded(&self, rel: &str) -> Option<&Resource> {
        self.embedded.get(rel).and_then(Embedded::first)
    }

    pub fn embed(mut self, rel: impl Into<String>, resource: Resource) -> Self {
        self.embedded
            .insert(rel.into(), Embedded::Single(Box::new(resource)));
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }
}
