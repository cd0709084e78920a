use url::{Host, Url};

const ALLOWED_SCHEMES: &[&str] = &["http", "https", "ftp", "ftps"];

/// Whether `input` is an absolute web URL worth sending to the scraper.
///
/// The host must be an IP address, `localhost`, or a dotted domain name.
pub fn is_valid_url(input: &str) -> bool {
    let input = input.trim();
    if input.is_empty() || input.contains(char::is_whitespace) {
        return false;
    }

    let Ok(url) = Url::parse(input) else {
        return false;
    };

    if !ALLOWED_SCHEMES.contains(&url.scheme()) {
        return false;
    }

    match url.host() {
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
        Some(Host::Domain(domain)) => {
            domain == "localhost"
                || domain
                    .split('.')
                    .filter(|label| !label.is_empty())
                    .count()
                    >= 2
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_web_urls() {
        for url in [
            "https://example.com",
            "http://example.com/path?q=1#frag",
            "https://sub.domain.co.uk:8443/a/b",
            "http://192.168.1.10/gallery",
            "http://[::1]:8080/",
            "http://localhost:3000",
            "ftp://files.example.org/pub",
        ] {
            assert!(is_valid_url(url), "{url} should be valid");
        }
    }

    #[test]
    fn rejects_non_web_input() {
        for url in [
            "",
            "example.com",
            "not a url",
            "https://",
            "https://example",
            "mailto:someone@example.com",
            "javascript:alert(1)",
            "file:///etc/passwd",
            "https://exa mple.com",
        ] {
            assert!(!is_valid_url(url), "{url} should be rejected");
        }
    }
}
