use crate::{
    http::{create_http_pool, HttpClientError},
    prober::Probe,
    types::{HttpConfig, ProbeResult},
};
use reqwest::Client;
use std::time::Instant;

pub fn candidate_urls(subdomain: &str) -> [String; 2] {
    [format!("http://{subdomain}"), format!("https://{subdomain}")]
}

/// Tries `urls` in order. A response ends the search: the target is alive
/// iff its status is below 400. Only a request error moves on to the next URL.
pub async fn check_urls(client: &Client, target: &str, urls: &[String]) -> ProbeResult {
    let start = Instant::now();
    let mut reason = String::from("no URL to try");

    for url in urls {
        match client.get(url).send().await {
            Ok(response) => {
                let status = response.status();
                if status.as_u16() < 400 {
                    return ProbeResult::live(target, Some(url.clone()), start.elapsed());
                }
                return ProbeResult::dead(
                    target,
                    format!("{url} answered HTTP {}", status.as_u16()),
                    start.elapsed(),
                );
            }
            Err(e) => {
                reason = format!("{url}: {e}");
            }
        }
    }

    ProbeResult::dead(target, reason, start.elapsed())
}

/// HTTP first, then HTTPS, against the bare hostname.
#[derive(Debug, Clone)]
pub struct WebProber {
    client: Client,
}

impl WebProber {
    pub fn new(config: &HttpConfig) -> Result<Self, HttpClientError> {
        Ok(Self::with_client(create_http_pool(config)?))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Probe for WebProber {
    async fn probe(&self, target: &str) -> ProbeResult {
        check_urls(&self.client, target, &candidate_urls(target)).await
    }
}
