use std::collections::HashSet;
use std::sync::LazyLock;

use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Matches CSS `url(...)` references, optionally single or double quoted.
static STYLE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)url\(["']?([^)"']+)["']?\)"#).expect("STYLE_URL regex")
});

/// `url(...)` also points at fonts and cursors, so inline styles only count
/// when the reference looks like an image file. This is a substring check on
/// the lowercased value: `bg.jpg?v=2` passes, an extension-less URL does not.
const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg", ".bmp"];

/// Extract every image URL referenced by `html` and resolve it against `base_url`.
///
/// Candidates come from `img` attributes (`src`, `data-src`, `data-lazy-src`,
/// the first `srcset` entry), the first `srcset` entry of `source` elements,
/// image `url(...)` references in inline `style` attributes, and the
/// `data-bg` / `data-background-image` lazy-load markers on any element.
///
/// The result is absolute, fragment-free, unique and in order of first
/// discovery. Malformed markup and unresolvable candidates are skipped, so
/// this never fails; an empty document yields an empty list.
pub fn extract_image_urls(html_content: &str, base_url: &str) -> Vec<String> {
    if html_content.is_empty() {
        return Vec::new();
    }

    let document = parse_without_scripting(html_content);
    let mut candidates = Candidates::default();

    for img in select(&document, "img") {
        for attr in ["src", "data-src", "data-lazy-src"] {
            if let Some(value) = non_empty_attr(&img, attr) {
                candidates.push(value);
            }
        }
        if let Some(first) = non_empty_attr(&img, "srcset").and_then(first_srcset_url) {
            candidates.push(first);
        }
    }

    for source in select(&document, "source") {
        if let Some(first) = non_empty_attr(&source, "srcset").and_then(first_srcset_url) {
            candidates.push(first);
        }
    }

    for element in select(&document, "[style]") {
        let style = element.value().attr("style").unwrap_or_default();
        for found in style_image_urls(style) {
            candidates.push(found);
        }
    }

    for attr in ["data-bg", "data-background-image"] {
        for element in select(&document, &format!("[{attr}]")) {
            if let Some(value) = non_empty_attr(&element, attr) {
                candidates.push(value);
            }
        }
    }

    tracing::debug!(
        candidates = candidates.ordered.len(),
        base_url,
        "collected image url candidates"
    );

    resolve_all(&candidates.ordered, base_url)
}

/// Parse as a browser with scripting disabled would, so `<noscript>`
/// fallbacks become elements instead of raw text.
fn parse_without_scripting(html_content: &str) -> Html {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            scripting_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };
    html5ever::parse_document(Html::new_document(), opts).one(html_content)
}

/// Raw candidate strings in discovery order, unique as found.
#[derive(Default)]
struct Candidates {
    ordered: Vec<String>,
    seen: HashSet<String>,
}

impl Candidates {
    fn push(&mut self, value: &str) {
        if self.seen.insert(value.to_string()) {
            self.ordered.push(value.to_string());
        }
    }
}

fn select<'a>(document: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => document.select(&selector).collect(),
        Err(e) => {
            tracing::warn!(css, error = %e, "invalid selector");
            Vec::new()
        }
    }
}

fn non_empty_attr<'a>(element: &ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name).filter(|value| !value.is_empty())
}

/// URL token of the first entry of a `srcset` descriptor list.
fn first_srcset_url(srcset: &str) -> Option<&str> {
    srcset
        .split(',')
        .next()
        .and_then(|entry| entry.split_whitespace().next())
}

fn style_image_urls(style: &str) -> impl Iterator<Item = &str> {
    STYLE_URL
        .captures_iter(style)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .filter(|found| {
            let lower = found.to_lowercase();
            IMAGE_EXTENSIONS.iter().any(|ext| lower.contains(ext))
        })
}

const PSEUDO_SCHEMES: &[&str] = &["data", "javascript"];

fn is_fetchable(candidate: &str) -> bool {
    !candidate.is_empty() && !candidate.starts_with("data:") && !candidate.starts_with("javascript:")
}

fn resolve_all(candidates: &[String], base_url: &str) -> Vec<String> {
    let base = Url::parse(base_url).ok();
    let mut absolute_urls = Vec::new();
    let mut seen = HashSet::new();

    for candidate in candidates {
        let candidate = candidate.trim();
        if !is_fetchable(candidate) {
            continue;
        }

        let Some(normalized) = resolve(base.as_ref(), candidate) else {
            tracing::debug!(candidate, "skipping unresolvable image url");
            continue;
        };

        if seen.insert(normalized.clone()) {
            absolute_urls.push(normalized);
        }
    }

    absolute_urls
}

/// Join `candidate` onto `base` and drop the fragment.
///
/// The parser lowercases schemes, so `DATA:` or `JavaScript:` values that
/// slipped past the prefix filter are rejected here.
fn resolve(base: Option<&Url>, candidate: &str) -> Option<String> {
    let mut url = match base {
        Some(base) => base.join(candidate).ok()?,
        None => Url::parse(candidate).ok()?,
    };
    if PSEUDO_SCHEMES.contains(&url.scheme()) {
        return None;
    }
    url.set_fragment(None);
    Some(url.to_string())
}
