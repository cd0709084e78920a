pub mod build_cache_key;
pub mod validate_url;
pub mod write_urls;
