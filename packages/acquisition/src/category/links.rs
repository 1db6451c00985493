use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::error::{AcquisitionError, Result};

/// Markdown inline links `[text](target "title")`. The text may contain one
/// level of nested brackets so card links like `[![photo](img.jpg)](/car-1/)`
/// yield the outer target. A leading `!` marks an image, not a link.
static MARKDOWN_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(!?)\[(?:[^\[\]]|\[[^\]]*\])*\]\(\s*([^()\s]+)(?:\s+"[^"]*")?\s*\)"#)
        .expect("valid regex")
});

/// Trim the input and default to `https://` when no scheme is given.
pub fn normalize_url(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AcquisitionError::validation("URL is required"));
    }

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("https://{}", trimmed))
    }
}

/// Resolve a markdown link target to an absolute http(s) URL.
///
/// Absolute targets are kept verbatim so they compare equal to the same link
/// reported by the provider; relative ones are joined onto the page URL.
fn resolve_target(raw: &str, base: Option<&url::Url>) -> Option<String> {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        return Some(raw.to_string());
    }

    let joined = base?.join(raw).ok()?;
    match joined.scheme() {
        "http" | "https" => Some(joined.to_string()),
        _ => None,
    }
}

/// Pull link targets out of markdown link syntax, in document order, deduplicated.
pub fn extract_markdown_links(markdown: &str, page_url: &str) -> Vec<String> {
    let base = url::Url::parse(page_url).ok();
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for cap in MARKDOWN_LINK_RE.captures_iter(markdown) {
        if !cap[1].is_empty() {
            continue;
        }
        if let Some(resolved) = resolve_target(&cap[2], base.as_ref()) {
            if seen.insert(resolved.clone()) {
                links.push(resolved);
            }
        }
    }

    links
}

/// Provider links first, then markdown links the provider missed.
pub fn merge_links(structured: Vec<String>, from_markdown: Vec<String>) -> Vec<String> {
    let known: HashSet<String> = structured.iter().cloned().collect();
    let mut merged = structured;
    merged.extend(
        from_markdown
            .into_iter()
            .filter(|link| !known.contains(link)),
    );
    merged
}
