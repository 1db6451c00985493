use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the scraping provider returned for one visited page.
///
/// Lives for a single scrape call; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageFetchResult {
    /// URL that was requested
    pub url: String,

    /// Rendered page body as markdown
    pub markdown: String,

    /// Absolute outbound links found by the provider's link extractor, in page order
    pub links: Vec<String>,

    pub fetched_at: DateTime<Utc>,
}

impl PageFetchResult {
    pub fn new(url: impl Into<String>, markdown: impl Into<String>, links: Vec<String>) -> Self {
        Self {
            url: url.into(),
            markdown: markdown.into(),
            links,
            fetched_at: Utc::now(),
        }
    }

    /// A page the provider rendered with no content at all.
    pub fn empty(url: impl Into<String>) -> Self {
        Self::new(url, String::new(), Vec::new())
    }
}
