//! Navigation of HAL APIs
//!
//! This module contains the navigator and its path steps:
//! - Chainable path building with copy-on-write headers
//! - Hop-by-hop resolution against live responses
//! - Terminal requests (GET, POST, PUT, PATCH, DELETE, OPTIONS, forms)
//! - Pivoting to a new root through a `Location` header

mod builder;
mod operation;
mod resolve;
mod terminal;

pub use builder::Navigator;
pub use operation::{Extract, Follow, Operation};
pub use resolve::HAL_ACCEPT;
