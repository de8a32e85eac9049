//! URI template support (RFC 6570)
//!
//! HAL links may carry templated hrefs such as `/orders{?id}`. This module
//! parses such templates and expands them against caller supplied
//! [`Params`]. All four levels of the RFC are supported:
//!
//! - Simple and reserved expansion: `{var}`, `{+var}`
//! - Fragment expansion: `{#var}`
//! - Label and path segments: `{.var}`, `{/var}`
//! - Path-style parameters: `{;var}`
//! - Query and query continuation: `{?var}`, `{&var}`
//! - Prefix (`{var:3}`) and explode (`{list*}`) modifiers
//!
//! # Example
//!
//! ```
//! use hal_navigator::template::{expand, Params};
//!
//! let params = Params::new().with("q", "test").with("page", 1);
//! let url = expand("/example{?q,page}", &params).unwrap();
//! assert_eq!(url, "/example?q=test&page=1");
//! ```

mod expand;
mod params;
mod parser;

pub use params::{ParamValue, Params};
pub use parser::UriTemplate;

use thiserror::Error;

/// Errors raised while parsing a URI template
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("Unclosed expression at offset {offset} in '{template}'")]
    Unclosed { template: String, offset: usize },

    #[error("Unexpected '}}' at offset {offset} in '{template}'")]
    UnexpectedClose { template: String, offset: usize },

    #[error("Empty expression at offset {offset} in '{template}'")]
    EmptyExpression { template: String, offset: usize },

    #[error("Reserved operator '{operator}' in '{template}'")]
    ReservedOperator { template: String, operator: char },

    #[error("Invalid variable name '{name}' in '{template}'")]
    InvalidVariable { template: String, name: String },

    #[error("Invalid prefix modifier '{modifier}' in '{template}'")]
    InvalidPrefix { template: String, modifier: String },
}

/// Result type alias for template operations
pub type TemplateResult<T> = std::result::Result<T, TemplateError>;

/// Parses `template` and expands it against `params` in one step
pub fn expand(template: &str, params: &Params) -> TemplateResult<String> {
    Ok(UriTemplate::parse(template)?.expand(params))
}
