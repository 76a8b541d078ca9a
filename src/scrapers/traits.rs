use crate::scrapers::http::FetchError;
use async_trait::async_trait;

/// Source of raw page bodies.
/// The HTTP client implements this; tests swap in canned pages.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET `url` and return the body of a successful response
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
