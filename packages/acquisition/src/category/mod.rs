//! Category scraping: discover candidate detail-page URLs from a listing page.

pub mod links;
mod scraper;
pub mod strategy;

pub use links::{extract_markdown_links, merge_links, normalize_url};
pub use scraper::{CategoryScraper, CategoryScraperConfig, DEFAULT_LIMIT, MAX_PAGES};
pub use strategy::{page_budget, SiteStrategy};
