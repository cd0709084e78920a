use std::path::Path;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::firecrawl::client::DEFAULT_API_URL;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub base: BaseConfig,
    pub firecrawl: FirecrawlConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Deserialize)]
pub struct BaseConfig {
    pub name: String,
    pub version: String,
    pub max_concurrency: usize,
}

#[derive(Debug, Deserialize)]
pub struct FirecrawlConfig {
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
    pub timeout_secs: u64,
    pub validation_timeout_secs: u64,
}

impl FirecrawlConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validation_timeout(&self) -> Duration {
        Duration::from_secs(self.validation_timeout_secs)
    }
}

#[derive(Debug, Deserialize)]
pub struct CacheConfig {
    pub max_entries: usize,
    pub ttl_secs: u64,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Defaults, then the optional TOML file at `path`, then `APP__*` variables
/// (e.g. `APP__FIRECRAWL__API_KEY`).
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        .set_default("base.name", env!("CARGO_PKG_NAME"))?
        .set_default("base.version", env!("CARGO_PKG_VERSION"))?
        .set_default("base.max_concurrency", 4_i64)?
        .set_default("firecrawl.api_url", DEFAULT_API_URL)?
        .set_default("firecrawl.api_key", "")?
        .set_default("firecrawl.timeout_secs", 30_i64)?
        .set_default("firecrawl.validation_timeout_secs", 5_i64)?
        .set_default("cache.max_entries", 100_i64)?
        .set_default("cache.ttl_secs", 600_i64)?
        .add_source(File::new(&path.to_string_lossy(), FileFormat::Toml).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    settings.try_deserialize::<AppConfig>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = load_config(&dir.path().join("Settings.toml")).unwrap();

        assert_eq!(config.base.max_concurrency, 4);
        assert_eq!(config.firecrawl.api_url, DEFAULT_API_URL);
        assert_eq!(config.firecrawl.timeout(), Duration::from_secs(30));
        assert_eq!(config.firecrawl.validation_timeout(), Duration::from_secs(5));
        assert_eq!(config.cache.max_entries, 100);
        assert_eq!(config.cache.ttl(), Duration::from_secs(600));
    }

    #[test]
    fn settings_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Settings.toml");
        std::fs::write(
            &path,
            r#"
[base]
max_concurrency = 2

[firecrawl]
api_url = "http://localhost:3002/v2"
timeout_secs = 60

[cache]
ttl_secs = 120
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();

        assert_eq!(config.base.max_concurrency, 2);
        assert_eq!(config.firecrawl.api_url, "http://localhost:3002/v2");
        assert_eq!(config.firecrawl.timeout_secs, 60);
        assert_eq!(config.firecrawl.validation_timeout_secs, 5);
        assert_eq!(config.cache.ttl_secs, 120);
        assert_eq!(config.cache.max_entries, 100);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Settings.toml");
        std::fs::write(&path, "[base\nmax_concurrency = ").unwrap();

        assert!(load_config(&path).is_err());
    }
}
