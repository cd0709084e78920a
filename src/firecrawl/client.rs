use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::firecrawl::error::FetchError;
use crate::firecrawl::{KeyStatus, ScrapeHtml, ValidateApiKey};

pub const DEFAULT_API_URL: &str = "https://api.firecrawl.dev/v2";

/// Page scraped when checking that a key is accepted.
const VALIDATION_PROBE_URL: &str = "https://example.com";

#[derive(Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
    formats: [&'a str; 1],
}

#[derive(Deserialize)]
struct ScrapeResponse {
    #[serde(default)]
    success: bool,
    error: Option<String>,
    data: Option<ScrapeData>,
}

#[derive(Deserialize)]
struct ScrapeData {
    html: Option<String>,
}

pub struct FirecrawlClient {
    api_key: String,
    base_url: String,
    timeout: Duration,
    validation_timeout: Duration,
    client: Client,
}

impl FirecrawlClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        FirecrawlClient {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(30),
            validation_timeout: Duration::from_secs(5),
            client: Client::new(),
        }
    }

    pub fn with_timeouts(mut self, timeout: Duration, validation_timeout: Duration) -> Self {
        self.timeout = timeout;
        self.validation_timeout = validation_timeout;
        self
    }

    /// Bearer auth and JSON content type for every call.
    fn create_headers(&self) -> Result<HeaderMap, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    async fn post_scrape(&self, url: &str, timeout: Duration) -> Result<reqwest::Response, FetchError> {
        let payload = ScrapeRequest {
            url,
            formats: ["html"],
        };

        let response = self
            .client
            .post(format!("{}/scrape", self.base_url))
            .headers(self.create_headers()?)
            .json(&payload)
            .timeout(timeout)
            .send()
            .await?;

        Ok(response)
    }
}

impl ScrapeHtml for FirecrawlClient {
    /// Rendered HTML of `url`, or an empty string when Firecrawl returned none.
    async fn scrape_html(&self, url: &str) -> Result<String, FetchError> {
        if self.api_key.is_empty() {
            return Err(FetchError::MissingApiKey);
        }

        tracing::info!(url, "scraping page through Firecrawl");
        let response = self.post_scrape(url, self.timeout).await?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::UNAUTHORIZED => return Err(FetchError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => return Err(FetchError::RateLimited),
            status => {
                let text = response.text().await.unwrap_or_default();
                return Err(FetchError::Http {
                    status: status.as_u16(),
                    body: text.chars().take(200).collect(),
                });
            }
        }

        let raw = response.text().await?;
        let payload: ScrapeResponse = serde_json::from_str(&raw)?;

        if !payload.success {
            return Err(FetchError::Api(
                payload.error.unwrap_or_else(|| "Unknown error".to_string()),
            ));
        }

        let html = payload.data.and_then(|data| data.html).unwrap_or_default();
        tracing::debug!(url, bytes = html.len(), "received rendered html");
        Ok(html)
    }
}

impl ValidateApiKey for FirecrawlClient {
    async fn validate_api_key(&self) -> KeyStatus {
        if self.api_key.is_empty() {
            return KeyStatus::Invalid("No API key provided".to_string());
        }

        let status = match self.post_scrape(VALIDATION_PROBE_URL, self.validation_timeout).await {
            Ok(response) => match response.status() {
                StatusCode::OK => KeyStatus::Valid,
                StatusCode::UNAUTHORIZED => KeyStatus::Invalid("Invalid API key".to_string()),
                StatusCode::TOO_MANY_REQUESTS => KeyStatus::RateLimited,
                other => KeyStatus::Invalid(format!("Error: {}", other.as_u16())),
            },
            Err(FetchError::Timeout) => KeyStatus::Unreachable("Connection timeout".to_string()),
            Err(FetchError::InvalidCredential(_)) => {
                KeyStatus::Invalid("Invalid API key".to_string())
            }
            Err(e) => {
                tracing::warn!(error = %e, "API key validation request failed");
                KeyStatus::Unreachable("Connection failed".to_string())
            }
        };

        tracing::info!(status = ?status, "validated Firecrawl API key");
        status
    }
}
