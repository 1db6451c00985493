//! Vehicle Content Acquisition
//!
//! Two on-demand batch jobs feeding the vehicle catalogue:
//!
//! - [`CategoryScraper`] walks a listing category (and, for recognized sites,
//!   its paginated successors) and returns candidate detail-page URLs.
//! - [`ImageRehoster`] finds image records still served through a third-party
//!   image proxy, copies the original bytes into owned storage and points the
//!   records at the new location.
//!
//! Both jobs are written against the traits in [`traits`]; concrete adapters
//! live in [`providers`] and in-memory doubles in [`testing`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use acquisition::{CategoryScraper, providers::FirecrawlScraper};
//!
//! let provider = FirecrawlScraper::from_key(std::env::var("FIRECRAWL_API_KEY").ok())?;
//! let scraper = CategoryScraper::new(Arc::new(provider));
//! let found = scraper.scrape_category("arielcar.it/marca/fiat", 25).await?;
//! ```

pub mod category;
pub mod credentials;
pub mod error;
pub mod providers;
pub mod rehost;
pub mod testing;
pub mod traits;
pub mod types;

pub use category::{CategoryScraper, CategoryScraperConfig, SiteStrategy, DEFAULT_LIMIT, MAX_PAGES};
pub use credentials::Credential;
pub use error::{AcquisitionError, Result};
pub use rehost::{ImageRehoster, RehostDeps};
pub use traits::{
    fetcher::OriginFetcher,
    scraper::{PageScraper, ScrapeOptions},
    storage::ObjectStorage,
    store::ImageRecordStore,
};
pub use types::{
    candidates::CandidateUrlSet,
    image::{FetchedImage, ImageRecord},
    page::PageFetchResult,
    report::{CategoryScrape, RehostReport},
};
