use crate::scrapers::traits::PageFetcher;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Why a page could not be fetched
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connect failure, timeout or broken body
    #[error("transport error fetching {url}: {message}")]
    Transport { url: String, message: String },

    /// Server answered with a non-2xx status
    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: StatusCode },
}

impl FetchError {
    fn transport(url: &str, err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("timed out: {err}")
        } else {
            err.to_string()
        };
        FetchError::Transport {
            url: url.to_string(),
            message,
        }
    }
}

/// Plain reqwest GET with a fixed user agent and timeout
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!("Fetching URL: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::transport(url, e))?;

        debug!("Downloaded {} bytes of HTML", body.len());
        Ok(body)
    }
}
