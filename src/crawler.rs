use crate::models::ListingDetail;
use crate::scrapers::details::extract_details;
use crate::scrapers::links::discover_links;
use crate::scrapers::PageFetcher;
use crate::scrapers::types::{SearchParams, LISTING_PATH_PREFIX};
use anyhow::Result;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

/// Settings for one crawl run
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub search: SearchParams,
    /// Href prefix that marks a listing link
    pub listing_prefix: String,
    /// Pause before each detail request
    pub link_delay: Duration,
    /// Pause after finishing a results page
    pub page_delay: Duration,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            search: SearchParams::default(),
            listing_prefix: LISTING_PATH_PREFIX.to_string(),
            link_delay: Duration::from_millis(500),
            page_delay: Duration::from_secs(1),
        }
    }
}

/// Walks search result pages and collects listing details
pub struct Crawler<F> {
    fetcher: F,
    config: CrawlConfig,
}

impl<F: PageFetcher> Crawler<F> {
    pub fn new(fetcher: F, config: CrawlConfig) -> Self {
        Self { fetcher, config }
    }

    #[cfg(test)]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Crawl from page 1 until a page yields no listing links.
    ///
    /// A page that fails to load counts as empty, so it ends the crawl too.
    pub async fn run(&self) -> Result<Vec<ListingDetail>> {
        let mut details = Vec::new();
        let mut page: u32 = 1;

        info!("Starting crawl...");

        loop {
            let page_url = self.config.search.page_url(page)?;
            info!(page, url = %page_url, "Crawling search results page");

            let links = discover_links(&self.fetcher, &page_url, &self.config.listing_prefix).await;
            if links.is_empty() {
                info!(page, "No apartment links found, stopping crawl");
                break;
            }

            info!(page, count = links.len(), "Found links, extracting details");

            for link in &links {
                sleep(self.config.link_delay).await;
                details.push(extract_details(&self.fetcher, link.as_str()).await);
            }

            page += 1;
            sleep(self.config.page_delay).await;
        }

        info!(count = details.len(), "Crawling finished");
        Ok(details)
    }
}
