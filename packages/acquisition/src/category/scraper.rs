use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::links::{extract_markdown_links, merge_links, normalize_url};
use super::strategy::{page_budget, SiteStrategy};
use crate::error::{AcquisitionError, Result};
use crate::traits::scraper::{PageScraper, ScrapeOptions};
use crate::types::candidates::CandidateUrlSet;
use crate::types::report::CategoryScrape;

/// Hard ceiling on pages visited per scrape, whatever the limit.
pub const MAX_PAGES: usize = 15;

/// Default number of URLs returned when the caller gives no limit.
pub const DEFAULT_LIMIT: usize = 50;

/// Tuning for category scrapes.
#[derive(Debug, Clone)]
pub struct CategoryScraperConfig {
    /// Listings a category page is assumed to hold, for the page budget
    pub items_per_page: usize,

    /// Page cap, at most [`MAX_PAGES`]
    pub max_pages: usize,

    /// Render wait passed to the provider
    pub settle_delay: Duration,
}

impl Default for CategoryScraperConfig {
    fn default() -> Self {
        Self {
            items_per_page: 10,
            max_pages: MAX_PAGES,
            settle_delay: ScrapeOptions::default().settle_delay,
        }
    }
}

impl CategoryScraperConfig {
    pub fn with_items_per_page(mut self, items: usize) -> Self {
        self.items_per_page = items.max(1);
        self
    }

    /// Lower the page cap. Values above [`MAX_PAGES`] are clamped.
    pub fn with_max_pages(mut self, pages: usize) -> Self {
        self.max_pages = pages.clamp(1, MAX_PAGES);
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }
}

/// Discovers candidate listing URLs from a category page and its successors.
pub struct CategoryScraper {
    scraper: Arc<dyn PageScraper>,
    config: CategoryScraperConfig,
}

impl CategoryScraper {
    pub fn new(scraper: Arc<dyn PageScraper>) -> Self {
        Self {
            scraper,
            config: CategoryScraperConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CategoryScraperConfig) -> Self {
        self.config = config;
        self
    }

    /// Collect up to `limit` candidate detail-page URLs starting at `url`.
    ///
    /// Pages are fetched one after another. Only a failure on the first page
    /// fails the call; later pages that fail are skipped.
    pub async fn scrape_category(&self, url: &str, limit: usize) -> Result<CategoryScrape> {
        let url = normalize_url(url)?;
        if limit == 0 {
            return Err(AcquisitionError::validation("limit must be at least 1"));
        }

        let strategy = SiteStrategy::for_url(&url);
        let budget = page_budget(limit, self.config.items_per_page, self.config.max_pages);
        let pages = strategy.page_urls(&url, budget);
        let options = ScrapeOptions {
            settle_delay: self.config.settle_delay,
        };

        info!(
            url = %url,
            limit,
            strategy = strategy.name(),
            pages = pages.len(),
            provider = self.scraper.name(),
            "Starting category scrape"
        );

        let mut candidates = CandidateUrlSet::new();

        for (index, page_url) in pages.iter().enumerate() {
            let page = match self.scraper.scrape_page(page_url, options).await {
                Ok(page) => page,
                Err(e) if index == 0 => {
                    warn!(url = %page_url, error = %e, "First category page failed");
                    return Err(e);
                }
                Err(e) => {
                    warn!(url = %page_url, page = index + 1, error = %e, "Skipping category page");
                    continue;
                }
            };

            let from_markdown = extract_markdown_links(&page.markdown, page_url);
            let links = merge_links(page.links, from_markdown);
            let link_count = links.len();

            let before = candidates.len();
            for link in links {
                if strategy.accepts(&link, page_url) {
                    candidates.insert(link);
                }
            }

            debug!(
                url = %page_url,
                page = index + 1,
                links = link_count,
                new_candidates = candidates.len() - before,
                total_candidates = candidates.len(),
                "Category page processed"
            );

            if candidates.len() >= limit {
                break;
            }
        }

        let result = CategoryScrape::new(candidates.into_truncated(limit));

        info!(url = %url, total = result.total, "Category scrape completed");

        Ok(result)
    }
}
