//! Firecrawl scraping provider.
//!
//! Renders JavaScript-heavy listing pages and returns both markdown and the
//! page's outbound links in one `/scrape` call.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::credentials::Credential;
use crate::error::{AcquisitionError, Result};
use crate::traits::scraper::{PageScraper, ScrapeOptions};
use crate::types::page::PageFetchResult;

const FIRECRAWL_API_URL: &str = "https://api.firecrawl.dev/v1";

/// Env var holding the Firecrawl API key.
pub const FIRECRAWL_API_KEY: &str = "FIRECRAWL_API_KEY";

pub struct FirecrawlScraper {
    client: Client,
    api_key: Credential,
    base_url: String,
}

// Request/Response types for Firecrawl API

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScrapeRequest<'a> {
    url: &'a str,
    formats: [&'static str; 2],
    wait_for: u64,
}

#[derive(Deserialize)]
struct ScrapeResponse {
    success: bool,
    data: Option<ScrapeData>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct ScrapeData {
    markdown: Option<String>,
    #[serde(default)]
    links: Vec<String>,
}

impl FirecrawlScraper {
    pub fn new(api_key: Credential) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: FIRECRAWL_API_URL.to_string(),
        }
    }

    /// Build from a raw (possibly absent) key, failing with a
    /// `Configuration` error when there is none.
    pub fn from_key(api_key: Option<String>) -> Result<Self> {
        Credential::require(FIRECRAWL_API_KEY, api_key).map(Self::new)
    }

    fn into_page(url: &str, response: ScrapeResponse) -> Result<PageFetchResult> {
        if !response.success {
            return Err(AcquisitionError::upstream(
                "firecrawl",
                response
                    .error
                    .unwrap_or_else(|| "scrape reported failure".to_string()),
            ));
        }

        let data = response
            .data
            .ok_or_else(|| AcquisitionError::upstream("firecrawl", "no data returned"))?;

        let links = data
            .links
            .into_iter()
            .filter(|link| !link.trim().is_empty())
            .collect();

        Ok(PageFetchResult::new(
            url,
            data.markdown.unwrap_or_default(),
            links,
        ))
    }
}

#[async_trait]
impl PageScraper for FirecrawlScraper {
    async fn scrape_page(&self, url: &str, options: ScrapeOptions) -> Result<PageFetchResult> {
        let request = ScrapeRequest {
            url,
            formats: ["links", "markdown"],
            wait_for: options.settle_delay.as_millis() as u64,
        };

        let response = self
            .client
            .post(format!("{}/scrape", self.base_url))
            .bearer_auth(self.api_key.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| AcquisitionError::upstream("firecrawl", e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AcquisitionError::upstream_status(
                "firecrawl",
                status.as_u16(),
                text,
            ));
        }

        let body: ScrapeResponse = response
            .json()
            .await
            .map_err(|e| AcquisitionError::upstream("firecrawl", e.to_string()))?;

        Self::into_page(url, body)
    }

    fn name(&self) -> &str {
        "firecrawl"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ScrapeResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn request_asks_for_links_and_markdown_with_settle_delay() {
        let request = ScrapeRequest {
            url: "https://arielcar.it/marca/fiat",
            formats: ["links", "markdown"],
            wait_for: 3000,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["formats"], serde_json::json!(["links", "markdown"]));
        assert_eq!(json["waitFor"], 3000);
    }

    #[test]
    fn successful_response_becomes_page() {
        let response = parse(
            r##"{"success": true, "data": {
                "markdown": "# Fiat",
                "links": ["https://arielcar.it/offerte-auto/fiat-panda-12/", ""]
            }}"##,
        );

        let page = FirecrawlScraper::into_page("https://arielcar.it/marca/fiat", response).unwrap();
        assert_eq!(page.markdown, "# Fiat");
        assert_eq!(page.links, vec!["https://arielcar.it/offerte-auto/fiat-panda-12/"]);
    }

    #[test]
    fn missing_markdown_is_empty_body() {
        let response = parse(r#"{"success": true, "data": {"links": []}}"#);
        let page = FirecrawlScraper::into_page("https://a.it", response).unwrap();
        assert!(page.markdown.is_empty());
        assert!(page.links.is_empty());
    }

    #[test]
    fn unsuccessful_response_is_upstream_error() {
        let response = parse(r#"{"success": false, "error": "blocked"}"#);
        let err = FirecrawlScraper::into_page("https://a.it", response).unwrap_err();
        assert!(matches!(err, AcquisitionError::Upstream { .. }));
        assert!(err.to_string().contains("blocked"));
    }

    #[test]
    fn missing_key_is_configuration_error() {
        let err = FirecrawlScraper::from_key(None).err().unwrap();
        assert!(matches!(err, AcquisitionError::Configuration(_)));
    }
}
