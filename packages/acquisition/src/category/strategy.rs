//! Per-site pagination and link filtering.
//!
//! A strategy is picked once per scrape from the category URL. The scrape
//! loop only asks it two things: which pages to visit, and whether a link
//! is a candidate.

use regex::Regex;
use std::sync::LazyLock;

/// Domain fragment identifying the recognized listing site.
const ARIELCAR_DOMAIN: &str = "arielcar";

/// `/offerte-auto/<slug>-<digits>` with optional trailing slash.
static ARIELCAR_DETAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/offerte-auto/[^/?#]+-\d+/?$").expect("valid regex"));

/// Trailing `/page/N` (with or without final slash) on a paginated listing URL.
static PAGE_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/page/\d+/?$").expect("valid regex"));

/// Path fragments that never lead to a listing detail page on an unknown site.
const GENERIC_EXCLUDED_FRAGMENTS: &[&str] = &[
    "/cart",
    "/carrello",
    "/checkout",
    "/my-account",
    "/wp-admin",
    "/admin",
    "/login",
    "/tag/",
    "/page/",
    "?page=",
    "&page=",
    "/category/",
    "/categoria/",
    "#",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteStrategy {
    /// arielcar.it: synthesized `/page/N/` pagination, strict detail-URL shape
    ArielCar,
    /// Anything else: single page, denylist filtering
    Generic,
}

impl SiteStrategy {
    pub fn for_url(url: &str) -> Self {
        let host = url::Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_lowercase));

        match host {
            Some(h) if h.contains(ARIELCAR_DOMAIN) => Self::ArielCar,
            Some(_) => Self::Generic,
            None if url.to_lowercase().contains(ARIELCAR_DOMAIN) => Self::ArielCar,
            None => Self::Generic,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ArielCar => "arielcar",
            Self::Generic => "generic",
        }
    }

    /// Pages to visit, in order. The first entry is always `url` itself.
    pub fn page_urls(&self, url: &str, pages_to_visit: usize) -> Vec<String> {
        match self {
            Self::ArielCar => {
                let base = listing_base(url);
                let mut pages = vec![url.to_string()];
                pages.extend((2..=pages_to_visit).map(|n| format!("{}/page/{}/", base, n)));
                pages
            }
            Self::Generic => vec![url.to_string()],
        }
    }

    /// Whether `link`, found on `page_url`, is a candidate detail page.
    pub fn accepts(&self, link: &str, page_url: &str) -> bool {
        match self {
            Self::ArielCar => ARIELCAR_DETAIL_RE.is_match(link),
            Self::Generic => {
                !is_same_page(link, page_url)
                    && !GENERIC_EXCLUDED_FRAGMENTS
                        .iter()
                        .any(|fragment| link.contains(fragment))
            }
        }
    }
}

/// Pages to visit for `limit` items: enough pages at `items_per_page` plus
/// one spare, never more than `max_pages`.
pub fn page_budget(limit: usize, items_per_page: usize, max_pages: usize) -> usize {
    let needed = limit.div_ceil(items_per_page.max(1)) + 1;
    needed.min(max_pages)
}

/// Strip `/page/N/` and the trailing slash from a listing URL.
fn listing_base(url: &str) -> String {
    let without_page = PAGE_SUFFIX_RE.replace(url, "");
    without_page.trim_end_matches('/').to_string()
}

fn is_same_page(link: &str, page_url: &str) -> bool {
    link.trim_end_matches('/') == page_url.trim_end_matches('/')
}
