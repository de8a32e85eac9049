//! hal-navigator: a client for HAL (Hypertext Application Language) APIs
//!
//! This crate models the `_links` section of HAL documents, expands the URI
//! templates found in link hrefs, and provides a [`Navigator`] that walks a
//! chain of link relations from a root URL before issuing a final request.
//!
//! ```no_run
//! use hal_navigator::{Navigator, Params};
//!
//! # async fn example() -> hal_navigator::Result<()> {
//! let response = Navigator::new("https://api.example.com/")
//!     .follow("orders")
//!     .follow_with_params("ea:find", Params::new().with("id", 123))
//!     .get(None)
//!     .await?;
//! println!("{}", response.status());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod links;
pub mod navigator;
pub mod template;

use thiserror::Error;

/// Main error type for navigation and link resolution
#[derive(Debug, Error)]
pub enum HalError {
    #[error("Response didn't contain link with relation: {rel} ({url})")]
    LinkNotFound {
        rel: String,
        url: String,
        available: Vec<String>,
    },

    #[error("Response didn't contain embedded resource: {rel} ({url})")]
    EmbeddedNotFound { rel: String, url: String },

    #[error("Invalid url: '{url}'")]
    InvalidUrl { url: String },

    #[error("Unable to decode '{body}'{}: {source}", from_url(.url))]
    Format {
        /// Set when the body came from a navigation request
        url: Option<String>,
        body: String,
        source: serde_json::Error,
    },

    #[error("URI template error: {0}")]
    Template(#[from] template::TemplateError),

    #[error("HTTP error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Response didn't contain a Location header")]
    MissingLocation,

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl HalError {
    /// Wraps a decode failure together with the body that caused it
    pub(crate) fn format(body: &[u8], source: serde_json::Error) -> Self {
        Self::Format {
            url: None,
            body: String::from_utf8_lossy(body).into_owned(),
            source,
        }
    }

    /// Records the URL a decode failure was fetched from
    pub(crate) fn at_url(self, url: &str) -> Self {
        match self {
            Self::Format { body, source, .. } => Self::Format {
                url: Some(url.to_string()),
                body,
                source,
            },
            other => other,
        }
    }

    pub(crate) fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.into(),
            source,
        }
    }
}

fn from_url(url: &Option<String>) -> String {
    url.as_ref()
        .map(|url| format!(" from {}", url))
        .unwrap_or_default()
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid header in config: {0}")]
    InvalidHeader(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Result type alias for navigation operations
pub type Result<T> = std::result::Result<T, HalError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use client::{HttpClient, LoggingHttpClient};
pub use config::Config;
pub use links::{Link, LinkSet, Links, Resource};
pub use navigator::{Navigator, Operation};
pub use template::{expand, ParamValue, Params, TemplateError, UriTemplate};
