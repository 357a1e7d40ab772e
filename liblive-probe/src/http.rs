use crate::types::HttpConfig;
use reqwest::{redirect, Client};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Failed to create HTTP client: {0}")]
pub struct HttpClientError(#[from] reqwest::Error);

/// Shared client for every subdomain probe. Certificates are not verified.
pub fn create_http_pool(config: &HttpConfig) -> Result<Client, HttpClientError> {
    let client = Client::builder()
        .timeout(config.timeout)
        .redirect(redirect::Policy::limited(config.max_redirects))
        .danger_accept_invalid_certs(true)
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(30))
        .tcp_nodelay(true)
        .use_rustls_tls()
        .build()?;
    Ok(client)
}
