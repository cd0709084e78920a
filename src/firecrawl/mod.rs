pub mod client;
pub mod error;

use error::FetchError;

/// Outcome of probing the Firecrawl API with a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyStatus {
    Valid,
    /// The key was accepted but the account is currently throttled.
    RateLimited,
    Invalid(String),
    Unreachable(String),
}

impl KeyStatus {
    pub fn is_usable(&self) -> bool {
        matches!(self, KeyStatus::Valid | KeyStatus::RateLimited)
    }

    pub fn message(&self) -> &str {
        match self {
            KeyStatus::Valid => "Connection successful",
            KeyStatus::RateLimited => "API key valid (rate limited)",
            KeyStatus::Invalid(reason) | KeyStatus::Unreachable(reason) => reason,
        }
    }
}

pub trait ScrapeHtml {
    async fn scrape_html(&self, url: &str) -> Result<String, FetchError>;
}

pub trait ValidateApiKey {
    async fn validate_api_key(&self) -> KeyStatus;
}
