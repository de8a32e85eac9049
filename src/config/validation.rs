use crate::config::types::{ClientConfig, Config};
use crate::ConfigError;
use reqwest::header::{HeaderName, HeaderValue};
use std::collections::BTreeMap;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_root(&config.root)?;
    validate_client_config(&config.client)?;
    validate_headers(&config.headers)?;
    Ok(())
}

/// The root must be an absolute HTTP(S) URL
fn validate_root(root: &str) -> Result<(), ConfigError> {
    let url = Url::parse(root)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid root '{}': {}", root, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Root '{}' must use the http or https scheme",
            root
        )));
    }

    Ok(())
}

/// Validates transport configuration
fn validate_client_config(config: &ClientConfig) -> Result<(), ConfigError> {
    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    HeaderValue::from_str(&config.user_agent).map_err(|_| {
        ConfigError::Validation(format!(
            "user_agent '{}' is not a valid header value",
            config.user_agent
        ))
    })?;

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "connect_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs > config.timeout_secs {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs ({}) cannot exceed timeout_secs ({})",
            config.connect_timeout_secs, config.timeout_secs
        )));
    }

    Ok(())
}

/// Every configured header must be a valid name/value pair
fn validate_headers(headers: &BTreeMap<String, String>) -> Result<(), ConfigError> {
    for (name, value) in headers {
        HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
            ConfigError::InvalidHeader(format!("'{}' is not a valid header name", name))
        })?;
        HeaderValue::from_str(value).map_err(|_| {
            ConfigError::InvalidHeader(format!("value of '{}' is not a valid header value", name))
        })?;
    }
    Ok(())
}
