//! Record store and object storage backed by a Supabase project.

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;
use supabase_client::SupabaseClient;

use crate::credentials::Credential;
use crate::error::Result;
use crate::traits::{storage::ObjectStorage, store::ImageRecordStore};
use crate::types::image::ImageRecord;

pub const SUPABASE_URL: &str = "SUPABASE_URL";
pub const SUPABASE_SERVICE_ROLE_KEY: &str = "SUPABASE_SERVICE_ROLE_KEY";

pub const VEHICLE_IMAGES_TABLE: &str = "vehicle_images";
pub const DEFAULT_BUCKET: &str = "vehicle-images";

const IMAGE_COLUMNS: &str = "id,vehicle_id,image_url,position";

/// Build a service-role client, failing with a `Configuration` error if the
/// project URL or key is missing.
pub fn connect(url: Option<String>, service_key: Option<String>) -> Result<Arc<SupabaseClient>> {
    let url = Credential::require(SUPABASE_URL, url)?;
    let key = Credential::require(SUPABASE_SERVICE_ROLE_KEY, service_key)?;
    Ok(Arc::new(SupabaseClient::new(url.expose(), key.expose())))
}

/// `vehicle_images` rows via PostgREST.
pub struct SupabaseImageStore {
    client: Arc<SupabaseClient>,
    table: String,
}

impl SupabaseImageStore {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self {
            client,
            table: VEHICLE_IMAGES_TABLE.to_string(),
        }
    }
}

/// PostgREST `like` pattern (`*` is the wildcard) matching any value containing `needle`.
fn contains_pattern(needle: &str) -> String {
    format!("like.*{}*", needle)
}

#[async_trait]
impl ImageRecordStore for SupabaseImageStore {
    async fn find_images_with_url_containing(&self, signature: &str) -> Result<Vec<ImageRecord>> {
        let pattern = contains_pattern(signature);
        let rows = self
            .client
            .select::<ImageRecord>(&self.table, IMAGE_COLUMNS, &[("image_url", pattern.as_str())])
            .await?;
        Ok(rows)
    }

    async fn update_image_url(&self, id: &str, image_url: &str) -> Result<()> {
        let filter = format!("eq.{}", id);
        self.client
            .update(
                &self.table,
                &[("id", filter.as_str())],
                &serde_json::json!({ "image_url": image_url }),
            )
            .await?;
        Ok(())
    }
}

/// A Supabase storage bucket.
pub struct SupabaseObjectStorage {
    client: Arc<SupabaseClient>,
    bucket: String,
}

impl SupabaseObjectStorage {
    pub fn new(client: Arc<SupabaseClient>, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl ObjectStorage for SupabaseObjectStorage {
    async fn upsert(&self, path: &str, bytes: Bytes, content_type: &str) -> Result<()> {
        self.client
            .upload_object(&self.bucket, path, bytes, content_type, true)
            .await?;
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        self.client.public_object_url(&self.bucket, path)
    }
}
