//! Testing utilities including mock implementations.
//!
//! These let applications exercise both jobs without network calls. All
//! mocks share state through `Arc`, so a clone handed to a job can be
//! inspected afterwards from the original.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::error::{AcquisitionError, Result};
use crate::traits::{
    fetcher::OriginFetcher,
    scraper::{PageScraper, ScrapeOptions},
    storage::ObjectStorage,
    store::ImageRecordStore,
};
use crate::types::{
    image::{FetchedImage, ImageRecord},
    page::PageFetchResult,
};

// =============================================================================
// Mock page scraper
// =============================================================================

/// Canned pages by URL. Unknown URLs render as empty pages; URLs registered
/// with [`MockPageScraper::with_failure`] return an upstream error.
#[derive(Clone, Default)]
pub struct MockPageScraper {
    pages: Arc<RwLock<HashMap<String, PageFetchResult>>>,
    failures: Arc<RwLock<HashSet<String>>>,
    calls: Arc<RwLock<Vec<(String, ScrapeOptions)>>>,
}

impl MockPageScraper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `links` and `markdown` for `url`.
    pub fn with_page<I>(self, url: &str, links: I, markdown: &str) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let page = PageFetchResult::new(url, markdown, links.into_iter().map(Into::into).collect());
        self.pages.write().unwrap().insert(url.to_string(), page);
        self
    }

    /// Make `url` fail like a provider outage.
    pub fn with_failure(self, url: &str) -> Self {
        self.failures.write().unwrap().insert(url.to_string());
        self
    }

    /// URLs requested, in order.
    pub fn scraped_urls(&self) -> Vec<String> {
        self.calls
            .read()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    pub fn last_options(&self) -> Option<ScrapeOptions> {
        self.calls.read().unwrap().last().map(|(_, options)| *options)
    }
}

#[async_trait]
impl PageScraper for MockPageScraper {
    async fn scrape_page(&self, url: &str, options: ScrapeOptions) -> Result<PageFetchResult> {
        self.calls
            .write()
            .unwrap()
            .push((url.to_string(), options));

        if self.failures.read().unwrap().contains(url) {
            return Err(AcquisitionError::upstream_status(
                "mock",
                503,
                format!("scrape failed for {url}"),
            ));
        }

        Ok(self
            .pages
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_else(|| PageFetchResult::empty(url)))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

// =============================================================================
// In-memory record store
// =============================================================================

/// Image records held in memory, with optional injected failures.
#[derive(Clone, Default)]
pub struct MemoryImageStore {
    records: Arc<RwLock<Vec<ImageRecord>>>,
    fail_queries: Arc<RwLock<bool>>,
    failing_updates: Arc<RwLock<HashSet<String>>>,
    updates: Arc<RwLock<Vec<(String, String)>>>,
}

impl MemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(self, records: Vec<ImageRecord>) -> Self {
        self.records.write().unwrap().extend(records);
        self
    }

    /// Make the selection query fail.
    pub fn failing_queries(self) -> Self {
        *self.fail_queries.write().unwrap() = true;
        self
    }

    /// Make updates of record `id` fail.
    pub fn failing_update_for(self, id: &str) -> Self {
        self.failing_updates.write().unwrap().insert(id.to_string());
        self
    }

    pub fn get(&self, id: &str) -> Option<ImageRecord> {
        self.records
            .read()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    pub fn records(&self) -> Vec<ImageRecord> {
        self.records.read().unwrap().clone()
    }

    /// `(id, new_url)` pairs written, in order.
    pub fn updates(&self) -> Vec<(String, String)> {
        self.updates.read().unwrap().clone()
    }
}

#[async_trait]
impl ImageRecordStore for MemoryImageStore {
    async fn find_images_with_url_containing(&self, signature: &str) -> Result<Vec<ImageRecord>> {
        if *self.fail_queries.read().unwrap() {
            return Err(AcquisitionError::upstream_status(
                "memory store",
                500,
                "query failed",
            ));
        }

        Ok(self
            .records
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.image_url.contains(signature))
            .cloned()
            .collect())
    }

    async fn update_image_url(&self, id: &str, image_url: &str) -> Result<()> {
        if self.failing_updates.read().unwrap().contains(id) {
            return Err(AcquisitionError::upstream("memory store", format!("update of {id} rejected")));
        }

        let mut records = self.records.write().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AcquisitionError::upstream("memory store", format!("no record {id}")))?;
        record.image_url = image_url.to_string();

        self.updates
            .write()
            .unwrap()
            .push((id.to_string(), image_url.to_string()));
        Ok(())
    }
}

// =============================================================================
// In-memory object storage
// =============================================================================

/// A stored object.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub bytes: Bytes,
    pub content_type: String,
}

/// Object storage held in memory. Public URLs live under `base_url`.
#[derive(Clone)]
pub struct MemoryObjectStorage {
    base_url: String,
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
    failing_paths: Arc<RwLock<HashSet<String>>>,
}

impl Default for MemoryObjectStorage {
    fn default() -> Self {
        Self::new("https://storage.test/vehicle-images")
    }
}

impl MemoryObjectStorage {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            objects: Arc::new(RwLock::new(HashMap::new())),
            failing_paths: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    /// Make uploads to `path` fail.
    pub fn failing_upload_for(self, path: &str) -> Self {
        self.failing_paths.write().unwrap().insert(path.to_string());
        self
    }

    pub fn get(&self, path: &str) -> Option<StoredObject> {
        self.objects.read().unwrap().get(path).cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ObjectStorage for MemoryObjectStorage {
    async fn upsert(&self, path: &str, bytes: Bytes, content_type: &str) -> Result<()> {
        if self.failing_paths.read().unwrap().contains(path) {
            return Err(AcquisitionError::upstream_status(
                "memory storage",
                413,
                format!("upload of {path} rejected"),
            ));
        }

        self.objects.write().unwrap().insert(
            path.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

// =============================================================================
// Mock origin fetcher
// =============================================================================

/// Canned origin responses by URL. Unknown URLs answer 404.
#[derive(Clone, Default)]
pub struct MockOriginFetcher {
    responses: Arc<RwLock<HashMap<String, std::result::Result<FetchedImage, u16>>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockOriginFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(self, url: &str, bytes: &'static [u8], content_type: Option<&str>) -> Self {
        self.responses
            .write()
            .unwrap()
            .insert(url.to_string(), Ok(FetchedImage::new(bytes, content_type)));
        self
    }

    /// Answer `url` with a non-success status.
    pub fn with_status(self, url: &str, status: u16) -> Self {
        self.responses
            .write()
            .unwrap()
            .insert(url.to_string(), Err(status));
        self
    }

    pub fn fetched_urls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl OriginFetcher for MockOriginFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedImage> {
        self.calls.write().unwrap().push(url.to_string());

        match self.responses.read().unwrap().get(url) {
            Some(Ok(image)) => Ok(image.clone()),
            Some(Err(status)) => Err(AcquisitionError::upstream_status(
                "origin",
                *status,
                format!("failed to download {url}"),
            )),
            None => Err(AcquisitionError::upstream_status(
                "origin",
                404,
                format!("failed to download {url}"),
            )),
        }
    }
}
