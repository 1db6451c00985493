//! Concrete adapters for the infrastructure traits.
//!
//! - `FirecrawlScraper` - Firecrawl `/scrape` (requires `firecrawl` feature)
//! - `HttpOriginFetcher` - direct image download with a browser user agent
//! - `SupabaseImageStore`, `SupabaseObjectStorage` - requires `supabase` feature

mod http;

#[cfg(feature = "firecrawl")]
mod firecrawl;

#[cfg(feature = "supabase")]
pub mod supabase;

pub use http::{HttpOriginFetcher, BROWSER_USER_AGENT};

#[cfg(feature = "firecrawl")]
pub use firecrawl::{FirecrawlScraper, FIRECRAWL_API_KEY};

#[cfg(feature = "supabase")]
pub use supabase::{SupabaseImageStore, SupabaseObjectStorage};
