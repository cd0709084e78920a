/// Number of leading API key characters folded into a cache key.
const KEY_PREFIX_CHARS: usize = 8;

/// Cache key scoping a page's results to the credential that fetched them.
pub fn build_cache_key(api_key: &str, url: &str) -> String {
    let prefix: String = api_key.chars().take(KEY_PREFIX_CHARS).collect();
    format!("{prefix}:{url}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_key_prefix_and_url() {
        assert_eq!(
            build_cache_key("fc-1234567890abcdef", "https://example.com"),
            "fc-12345:https://example.com"
        );
    }

    #[test]
    fn short_keys_are_used_whole() {
        assert_eq!(build_cache_key("abc", "https://x.org"), "abc:https://x.org");
    }
}
