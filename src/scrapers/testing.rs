use crate::scrapers::http::FetchError;
use crate::scrapers::traits::PageFetcher;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory fetcher: known URLs return their page, unknown URLs 404.
#[derive(Default)]
pub struct CannedPages {
    pages: HashMap<String, String>,
    broken: Vec<String>,
    requests: Mutex<Vec<String>>,
}

impl CannedPages {
    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    /// `url` fails as if the connection dropped
    pub fn with_broken(mut self, url: &str) -> Self {
        self.broken.push(url.to_string());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for CannedPages {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());

        if self.broken.iter().any(|b| b == url) {
            return Err(FetchError::Transport {
                url: url.to_string(),
                message: "connection reset".to_string(),
            });
        }

        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: StatusCode::NOT_FOUND,
            })
    }
}
