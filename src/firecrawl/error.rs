use reqwest::header::InvalidHeaderValue;

/// Failures of the Firecrawl scrape call.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("API key is required")]
    MissingApiKey,

    #[error("API key cannot be sent as a header: {0}")]
    InvalidCredential(#[from] InvalidHeaderValue),

    #[error("401 Unauthorized: Invalid API key")]
    Unauthorized,

    #[error("429 Too Many Requests: Rate limit exceeded")]
    RateLimited,

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("API error: {0}")]
    Api(String),

    #[error("Request timeout: Page took too long to respond")]
    Timeout,

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Failed to parse Firecrawl response as JSON: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Network(e)
        }
    }
}

impl FetchError {
    /// Text shown to the person running the scrape.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::MissingApiKey => {
                "Please provide your Firecrawl API key (--api-key or APP__FIRECRAWL__API_KEY)".to_string()
            }
            FetchError::Unauthorized | FetchError::InvalidCredential(_) => {
                "Invalid API key. Please check your credentials.".to_string()
            }
            FetchError::RateLimited => "Rate limit exceeded. Please try again later.".to_string(),
            FetchError::Timeout => {
                "Request timed out. The page may be too large or slow to load.".to_string()
            }
            other => format!("Error: {other}"),
        }
    }
}
