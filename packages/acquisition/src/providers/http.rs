use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;

use crate::error::{AcquisitionError, Result};
use crate::traits::fetcher::OriginFetcher;
use crate::types::image::FetchedImage;

/// Some image hosts refuse requests that don't look like a browser.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Plain HTTP download of origin images.
pub struct HttpOriginFetcher {
    client: Client,
}

impl HttpOriginFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .map_err(|e| AcquisitionError::upstream("http client", e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl OriginFetcher for HttpOriginFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedImage> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "image/avif,image/webp,image/*,*/*;q=0.8")
            .send()
            .await
            .map_err(|e| AcquisitionError::upstream("origin", format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AcquisitionError::upstream_status(
                "origin",
                status.as_u16(),
                format!("failed to download {url}"),
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AcquisitionError::upstream("origin", format!("{url}: {e}")))?;

        tracing::debug!(url, size = bytes.len(), content_type = ?content_type, "Downloaded origin image");

        Ok(FetchedImage {
            bytes,
            content_type,
        })
    }
}
