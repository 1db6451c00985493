use async_trait::async_trait;
use std::time::Duration;

use crate::error::Result;
use crate::types::page::PageFetchResult;

/// Options for a single page scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeOptions {
    /// How long the provider waits for client-side rendering before capturing
    pub settle_delay: Duration,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(3000),
        }
    }
}

/// A third-party page-scraping provider.
///
/// One call renders one page and returns both its markdown body and the
/// provider's structured link list. Implementations make a single attempt;
/// retry policy belongs to the caller.
#[async_trait]
pub trait PageScraper: Send + Sync {
    async fn scrape_page(&self, url: &str, options: ScrapeOptions) -> Result<PageFetchResult>;

    /// Provider name (for logging).
    fn name(&self) -> &str {
        "unknown"
    }
}
