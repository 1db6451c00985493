use async_trait::async_trait;

use crate::error::Result;
use crate::types::image::FetchedImage;

/// Downloads image bytes from their origin server.
#[async_trait]
pub trait OriginFetcher: Send + Sync {
    /// Fetch `url` into memory. A non-2xx response is an `Upstream` error
    /// carrying the status code.
    async fn fetch(&self, url: &str) -> Result<FetchedImage>;
}
