mod config;
mod crawler;
mod models;
mod output;
mod scrapers;

use clap::Parser;
use config::Args;
use crawler::Crawler;
use scrapers::HttpFetcher;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = args.crawl_config()?;

    info!("🏠 Flat Scout - furnished apartment crawler");
    info!(city = %config.search.city, output = %args.output.display(), "Search configured");

    let fetcher = HttpFetcher::new(&args.user_agent, args.timeout())?;
    let crawler = Crawler::new(fetcher, config);

    let details = crawler.run().await?;
    info!("✅ Found details for {} apartments", details.len());

    match output::save_results(&args.output, &details) {
        Ok(Some(rows)) => info!("💾 Saved {} rows to {}", rows, args.output.display()),
        Ok(None) => {}
        Err(e) => error!("Error writing CSV file {}: {:#}", args.output.display(), e),
    }

    Ok(())
}
