use std::collections::HashMap;
use std::time::{Duration, Instant};

use sha2::{Digest, Sha256};

struct CacheEntry {
    urls: Vec<String>,
    expires_at: Instant,
    last_used: Instant,
}

/// Bounded, time-limited store of extraction results.
///
/// Keys are hashed before storage so credential prefixes embedded in them do
/// not sit in memory verbatim. Expired entries are never returned; when the
/// cache is full, expired entries go first, then the least recently used one.
pub struct ResultCache {
    entries: HashMap<String, CacheEntry>,
    max_entries: usize,
    ttl: Duration,
}

impl Default for ResultCache {
    fn default() -> Self {
        ResultCache::new(100, Duration::from_secs(600))
    }
}

impl ResultCache {
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        ResultCache {
            entries: HashMap::new(),
            max_entries: max_entries.max(1),
            ttl,
        }
    }

    pub fn get(&mut self, cache_key: &str) -> Option<Vec<String>> {
        self.get_at(cache_key, Instant::now())
    }

    pub fn set(&mut self, cache_key: &str, urls: Vec<String>) {
        self.set_at(cache_key, urls, Instant::now());
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    fn get_at(&mut self, cache_key: &str, now: Instant) -> Option<Vec<String>> {
        let hashed_key = hash_key(cache_key);

        match self.entries.get_mut(&hashed_key) {
            Some(entry) if entry.expires_at > now => {
                entry.last_used = now;
                return Some(entry.urls.clone());
            }
            Some(_) => {}
            None => return None,
        }

        self.entries.remove(&hashed_key);
        None
    }

    fn set_at(&mut self, cache_key: &str, urls: Vec<String>, now: Instant) {
        let hashed_key = hash_key(cache_key);

        if !self.entries.contains_key(&hashed_key) && self.entries.len() >= self.max_entries {
            self.entries.retain(|_, entry| entry.expires_at > now);
        }

        if !self.entries.contains_key(&hashed_key) && self.entries.len() >= self.max_entries {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                tracing::debug!("evicting least recently used cache entry");
                self.entries.remove(&oldest);
            }
        }

        self.entries.insert(
            hashed_key,
            CacheEntry {
                urls,
                expires_at: now + self.ttl,
                last_used: now,
            },
        );
    }
}

fn hash_key(cache_key: &str) -> String {
    hex::encode(Sha256::digest(cache_key.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn returns_stored_result() {
        let mut cache = ResultCache::default();
        cache.set("fc-12345:https://example.com", urls(&["https://example.com/a.jpg"]));

        assert_eq!(
            cache.get("fc-12345:https://example.com"),
            Some(urls(&["https://example.com/a.jpg"]))
        );
        assert_eq!(cache.get("fc-12345:https://other.com"), None);
    }

    #[test]
    fn entries_expire_after_ttl() {
        let mut cache = ResultCache::new(10, Duration::from_secs(600));
        let start = Instant::now();
        cache.set_at("key", urls(&["https://example.com/a.jpg"]), start);

        assert!(cache.get_at("key", start + Duration::from_secs(599)).is_some());
        assert!(cache.get_at("key", start + Duration::from_secs(600)).is_none());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn full_cache_drops_expired_entries_first() {
        let mut cache = ResultCache::new(2, Duration::from_secs(10));
        let start = Instant::now();
        cache.set_at("old", urls(&["o"]), start);
        cache.set_at("fresh", urls(&["f"]), start + Duration::from_secs(8));

        let later = start + Duration::from_secs(12);
        cache.set_at("new", urls(&["n"]), later);

        assert_eq!(cache.len(), 2);
        assert!(cache.get_at("old", later).is_none());
        assert_eq!(cache.get_at("fresh", later), Some(urls(&["f"])));
        assert_eq!(cache.get_at("new", later), Some(urls(&["n"])));
    }

    #[test]
    fn full_cache_evicts_least_recently_used() {
        let mut cache = ResultCache::new(2, Duration::from_secs(600));
        let start = Instant::now();
        cache.set_at("a", urls(&["a"]), start);
        cache.set_at("b", urls(&["b"]), start + Duration::from_secs(1));
        cache.get_at("a", start + Duration::from_secs(2));

        cache.set_at("c", urls(&["c"]), start + Duration::from_secs(3));

        let now = start + Duration::from_secs(4);
        assert!(cache.get_at("b", now).is_none());
        assert!(cache.get_at("a", now).is_some());
        assert!(cache.get_at("c", now).is_some());
    }

    #[test]
    fn overwriting_a_key_does_not_evict() {
        let mut cache = ResultCache::new(1, Duration::from_secs(600));
        cache.set("a", urls(&["1"]));
        cache.set("a", urls(&["2"]));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("a"), Some(urls(&["2"])));
    }

    #[test]
    fn keys_are_hashed() {
        let mut cache = ResultCache::default();
        cache.set("fc-secret:https://example.com", urls(&["x"]));
        assert!(cache.entries.keys().all(|key| key.len() == 64 && !key.contains("secret")));
    }
}
