use crate::cache::SharedCache;
use crate::extractors::extract_image_urls::extract_image_urls;
use crate::firecrawl::error::FetchError;
use crate::firecrawl::ScrapeHtml;
use crate::utilities::build_cache_key::build_cache_key;

#[derive(Debug, PartialEq, Eq)]
pub struct ScrapeOutcome {
    pub urls: Vec<String>,
    pub from_cache: bool,
}

/// Image URLs of the page at `url`, served from cache when a fresh result exists.
///
/// Empty results are not cached so a page that failed to render is retried.
pub async fn scrape_images<F: ScrapeHtml>(
    fetcher: &F,
    cache: &SharedCache,
    api_key: &str,
    url: &str,
) -> Result<ScrapeOutcome, FetchError> {
    let cache_key = build_cache_key(api_key, url);

    let cached = cache.lock().await.get(&cache_key);
    if let Some(urls) = cached {
        tracing::info!(url, count = urls.len(), "results loaded from cache");
        return Ok(ScrapeOutcome {
            urls,
            from_cache: true,
        });
    }

    let html = fetcher.scrape_html(url).await?;
    let urls = extract_image_urls(&html, url);
    tracing::info!(url, count = urls.len(), "extracted image urls");

    if !urls.is_empty() {
        cache.lock().await.set(&cache_key, urls.clone());
    }

    Ok(ScrapeOutcome {
        urls,
        from_cache: false,
    })
}
