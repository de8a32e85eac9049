//! Configuration module
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files that describe which API to navigate and how to reach it.
//!
//! # Example
//!
//! ```no_run
//! use hal_navigator::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("navigator.toml")).unwrap();
//! let nav = config.navigator().unwrap();
//! println!("Navigating from {}", nav.root_uri());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ClientConfig, Config};

// Re-export parser functions
pub use parser::{load_config, parse_config};

use crate::client::{build_http_client, HttpClient, LoggingHttpClient};
use crate::navigator::Navigator;
use crate::{ConfigError, ConfigResult};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::sync::Arc;

impl Config {
    /// Builds the configured session headers
    pub fn session_headers(&self) -> ConfigResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ConfigError::InvalidHeader(format!("{}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ConfigError::InvalidHeader(format!("{}: {}", name, e)))?;
            headers.append(name, value);
        }
        Ok(headers)
    }

    /// Builds the transport described by the `[client]` table
    pub fn http_client(&self) -> ConfigResult<Arc<dyn HttpClient>> {
        let client = build_http_client(&self.client)?;
        if self.client.log_requests {
            Ok(Arc::new(LoggingHttpClient::new(client)))
        } else {
            Ok(Arc::new(client))
        }
    }

    /// Creates a navigator rooted at `root` with the configured transport and
    /// session headers
    pub fn navigator(&self) -> ConfigResult<Navigator> {
        let mut nav = Navigator::with_client(self.root.clone(), self.http_client()?);
        for (name, value) in self.session_headers()?.iter() {
            nav = nav.add_session_header(name.clone(), value.clone());
        }
        Ok(nav)
    }
}
