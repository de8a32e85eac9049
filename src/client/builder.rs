use crate::config::ClientConfig;
use reqwest::Client;
use std::time::Duration;

/// Builds a `reqwest::Client` from the transport configuration
///
/// # Example
///
/// ```no_run
/// use hal_navigator::client::build_http_client;
/// use hal_navigator::config::ClientConfig;
///
/// let client = build_http_client(&ClientConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &ClientConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}
