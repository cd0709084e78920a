use std::path::PathBuf;

use clap::Parser;

/// Extract every image URL from web pages rendered by Firecrawl.
#[derive(Debug, Parser)]
#[command(name = "image_link_scraper", version)]
#[command(about = "Extract absolute image URLs from web pages", long_about = None)]
pub struct Cli {
    /// Pages to scrape.
    #[arg(required = true, value_name = "URL")]
    pub urls: Vec<String>,

    /// Settings file; missing files are ignored.
    #[arg(short, long, default_value = "Settings.toml")]
    pub config: PathBuf,

    /// Firecrawl API key, overriding the configured one.
    #[arg(short = 'k', long)]
    pub api_key: Option<String>,

    /// Also write every extracted URL to this file, one per line.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Do not probe the API key before scraping.
    #[arg(long)]
    pub skip_validation: bool,

    /// Debug-level logging.
    #[arg(short, long)]
    pub verbose: bool,
}
