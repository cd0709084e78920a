use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use futures::stream::{self, StreamExt};
use tokio::sync::Mutex;

use crate::cache::{ResultCache, SharedCache};
use crate::cli::Cli;
use crate::firecrawl::client::FirecrawlClient;
use crate::firecrawl::error::FetchError;
use crate::firecrawl::ValidateApiKey;
use crate::scrape_images::{scrape_images, ScrapeOutcome};
use crate::utilities::validate_url::is_valid_url;
use crate::utilities::write_urls::write_urls;

mod cache;
mod cli;
mod config;
mod extractors;
mod firecrawl;
mod logging;
mod scrape_images;
mod utilities;

enum PageResult {
    InvalidUrl,
    Failed(FetchError),
    Scraped(ScrapeOutcome),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;

    // Load configuration settings
    let config = config::load_config(&cli.config).context("Failed to load configuration")?;
    tracing::debug!(name = %config.base.name, version = %config.base.version, "configuration loaded");

    let api_key = cli
        .api_key
        .clone()
        .unwrap_or_else(|| config.firecrawl.api_key.clone());
    if api_key.is_empty() {
        eprintln!("{}", FetchError::MissingApiKey.user_message().red());
        return Ok(ExitCode::from(2));
    }

    let client = FirecrawlClient::new(api_key.clone(), config.firecrawl.api_url.clone())
        .with_timeouts(config.firecrawl.timeout(), config.firecrawl.validation_timeout());

    if !cli.skip_validation {
        let status = client.validate_api_key().await;
        if !status.is_usable() {
            eprintln!("{}", status.message().red());
            return Ok(ExitCode::from(2));
        }
        eprintln!("{}", format!("{} - Ready to begin scraping", status.message()).green());
    }

    let cache: SharedCache = Arc::new(Mutex::new(ResultCache::new(
        config.cache.max_entries,
        config.cache.ttl(),
    )));

    // Pages are scraped concurrently but reported in the order given
    let results: Vec<(&String, PageResult)> = stream::iter(&cli.urls)
        .map(|url| {
            let client = &client;
            let cache = &cache;
            let api_key = api_key.as_str();
            async move {
                if !is_valid_url(url) {
                    return (url, PageResult::InvalidUrl);
                }
                match scrape_images(client, cache, api_key, url).await {
                    Ok(outcome) => (url, PageResult::Scraped(outcome)),
                    Err(e) => {
                        tracing::warn!(url = %url, error = %e, "scrape failed");
                        (url, PageResult::Failed(e))
                    }
                }
            }
        })
        .buffered(config.base.max_concurrency.max(1))
        .collect()
        .await;

    let cached_entries = cache.lock().await.len();
    tracing::debug!(entries = cached_entries, "result cache populated");

    let mut all_urls = Vec::new();
    let mut succeeded = 0;

    for (url, result) in results {
        match result {
            PageResult::InvalidUrl => {
                eprintln!("{}", format!("Please enter a valid URL: {url}").red());
            }
            PageResult::Failed(e) => {
                eprintln!("{}", format!("{url}: {}", e.user_message()).red());
            }
            PageResult::Scraped(outcome) => {
                succeeded += 1;
                if outcome.urls.is_empty() {
                    eprintln!("{}", format!("{url}: No images found on this page").yellow());
                    continue;
                }
                if outcome.from_cache {
                    eprintln!("{}", format!("{url}: Results loaded from cache").green());
                } else {
                    eprintln!(
                        "{}",
                        format!("{url}: Found {} unique image(s)", outcome.urls.len()).green()
                    );
                }
                for image_url in &outcome.urls {
                    println!("{image_url}");
                }
                all_urls.extend(outcome.urls);
            }
        }
    }

    if let Some(path) = &cli.output {
        write_urls(path, &all_urls).await?;
        eprintln!("{}", format!("Image URLs written to {}", path.display()).green());
    }

    if succeeded == 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
