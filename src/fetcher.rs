use std::time::Duration;

use tracing::info;

use crate::config::FetcherConfig;
use crate::error::{Result, ScraperError};

/// Fetches directory search-results pages for the extractor. The parsing
/// core itself never does I/O; this is the seam where HTML enters.
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client })
    }

    pub async fn fetch(&self, url: &str) -> Result<String> {
        info!("Fetching page from {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::Fetch {
                message: format!("{} returned {}", url, status),
            });
        }
        let body = response.text().await?;
        info!("Fetched {} bytes", body.len());
        Ok(body)
    }
}
