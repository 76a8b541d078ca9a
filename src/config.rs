use crate::crawler::CrawlConfig;
use crate::scrapers::http::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::scrapers::types::{SearchParams, LISTING_PATH_PREFIX};
use anyhow::{ensure, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Crawl furnished-apartment listings into a CSV file")]
pub struct Args {
    /// Path to output CSV file
    #[arg(short, long, default_value = "wunderflats_berlin.csv")]
    pub output: PathBuf,

    /// Site root
    #[arg(long, default_value = "https://wunderflats.com")]
    pub base_url: String,

    /// City slug in the search path
    #[arg(long, default_value = "berlin")]
    pub city: String,

    /// Move-in date (YYYY-MM-DD)
    #[arg(long, default_value = "2025-07-01")]
    pub from: NaiveDate,

    /// Move-out date (YYYY-MM-DD)
    #[arg(long, default_value = "2025-09-30")]
    pub to: NaiveDate,

    #[arg(long, default_value_t = 14)]
    pub flexible_days: u32,

    #[arg(long, default_value = "B")]
    pub score_variant: String,

    /// Minimum number of rooms
    #[arg(long, default_value_t = 3)]
    pub min_rooms: u32,

    #[arg(long, default_value = "ENTIRE_APARTMENT")]
    pub home_type: String,

    /// Minimum size in square meters
    #[arg(long, default_value_t = 60)]
    pub min_size: u32,

    /// Delay before each listing request (ms)
    #[arg(long, default_value_t = 500)]
    pub link_delay_ms: u64,

    /// Delay between result pages (ms)
    #[arg(long, default_value_t = 1000)]
    pub page_delay_ms: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl Args {
    pub fn crawl_config(&self) -> Result<CrawlConfig> {
        ensure!(
            self.from <= self.to,
            "--from ({}) must not be after --to ({})",
            self.from,
            self.to
        );

        Ok(CrawlConfig {
            search: SearchParams {
                base_url: self.base_url.clone(),
                city: self.city.clone(),
                from: self.from,
                to: self.to,
                flexible_days: self.flexible_days,
                score_variant: self.score_variant.clone(),
                min_rooms: self.min_rooms,
                home_type: self.home_type.clone(),
                min_size: self.min_size,
            },
            listing_prefix: LISTING_PATH_PREFIX.to_string(),
            link_delay: Duration::from_millis(self.link_delay_ms),
            page_delay: Duration::from_millis(self.page_delay_ms),
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
