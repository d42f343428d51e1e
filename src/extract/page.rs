use super::{html_to_text, ContentExtractor, MAX_TOKENS};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("credcheck/", env!("CARGO_PKG_VERSION"));

/// Fetches pages over HTTP and extracts their visible text.
pub struct PageExtractor {
    client: Client,
}

impl PageExtractor {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }

    async fn fetch(&self, url: &str) -> std::result::Result<String, reqwest::Error> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

#[async_trait]
impl ContentExtractor for PageExtractor {
    async fn extract(&self, url: &str) -> Result<String> {
        tracing::debug!("Fetching page {}", url);

        let html = self.fetch(url).await.map_err(|e| {
            tracing::warn!("Failed to fetch {}: {}", url, e);
            Error::Fetch(e)
        })?;

        let text = html_to_text(&html, MAX_TOKENS);
        if text.is_empty() {
            tracing::warn!("No readable content at {}", url);
            return Err(Error::EmptyContent);
        }

        tracing::info!(
            "Extracted {} tokens from {}",
            text.split(' ').count(),
            url
        );
        Ok(text)
    }
}
