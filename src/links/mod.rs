//! HAL link model
//!
//! This module contains the types that make up the hypermedia part of a HAL
//! document:
//! - `Link`: a single link object
//! - `LinkSet`: the one-or-many links stored under a relation
//! - `Links`: the `_links` collection with href resolution
//! - `Resource`: a whole document including `_embedded` resources

mod collection;
mod link;
mod link_set;
mod resource;

pub use collection::Links;
pub use link::Link;
pub use link_set::LinkSet;
pub use resource::{Embedded, Resource};
