use std::sync::Arc;

use tracing::{debug, info};

use super::isolate::process_isolated;
use super::proxy::{is_proxy_url, origin_url, storage_path, DEFAULT_CONTENT_TYPE, PROXY_SIGNATURE};
use crate::error::{AcquisitionError, Result};
use crate::traits::{fetcher::OriginFetcher, storage::ObjectStorage, store::ImageRecordStore};
use crate::types::image::ImageRecord;
use crate::types::report::RehostReport;

/// Services the rehoster talks to, handed over at construction.
#[derive(Clone)]
pub struct RehostDeps {
    pub store: Arc<dyn ImageRecordStore>,
    pub storage: Arc<dyn ObjectStorage>,
    pub fetcher: Arc<dyn OriginFetcher>,
}

/// Moves proxied vehicle images into owned storage and rewrites their records.
pub struct ImageRehoster {
    deps: RehostDeps,
}

impl ImageRehoster {
    pub fn new(deps: RehostDeps) -> Self {
        Self { deps }
    }

    /// Rehost every image record that still points at the image proxy.
    ///
    /// Only the initial record query can fail the call. Per-image failures
    /// are counted and described in the report.
    pub async fn rehost_proxied_images(&self) -> Result<RehostReport> {
        let records = self
            .deps
            .store
            .find_images_with_url_containing(PROXY_SIGNATURE)
            .await?;

        let candidates: Vec<ImageRecord> = records
            .into_iter()
            .filter(|record| is_proxy_url(&record.image_url))
            .collect();

        if candidates.is_empty() {
            info!("No proxied images found");
            return Ok(RehostReport::default());
        }

        info!(count = candidates.len(), "Rehosting proxied images");

        let report = process_isolated(candidates, |record| async move {
            let id = record.id.clone();
            self.rehost_one(record)
                .await
                .map(|_| ())
                .map_err(|e| format!("Image {}: {}", id, e))
        })
        .await;

        info!(
            total = report.total,
            success = report.success,
            failures = report.failures,
            "Image rehosting completed"
        );

        Ok(report)
    }

    /// Download, upload, rewrite. Returns the new public URL.
    async fn rehost_one(&self, record: ImageRecord) -> Result<String> {
        let origin = origin_url(&record.image_url)?;

        let image = self.deps.fetcher.fetch(&origin).await?;
        let content_type = image
            .content_type
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

        let path = storage_path(&record, &content_type);
        self.deps
            .storage
            .upsert(&path, image.bytes, &content_type)
            .await?;

        let public_url = self.deps.storage.public_url(&path);
        if is_proxy_url(&public_url) {
            return Err(AcquisitionError::Extraction(format!(
                "storage returned a proxy URL for {}",
                path
            )));
        }

        self.deps
            .store
            .update_image_url(&record.id, &public_url)
            .await?;

        debug!(id = %record.id, origin = %origin, new_url = %public_url, "Image rehosted");

        Ok(public_url)
    }
}
