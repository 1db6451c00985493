use async_trait::async_trait;

use crate::error::Result;
use crate::types::image::ImageRecord;

/// The external record store holding vehicle image rows.
#[async_trait]
pub trait ImageRecordStore: Send + Sync {
    /// All image records whose `image_url` contains `signature`.
    async fn find_images_with_url_containing(&self, signature: &str) -> Result<Vec<ImageRecord>>;

    /// Point one record at a new image URL. Nothing else on the row changes.
    async fn update_image_url(&self, id: &str, image_url: &str) -> Result<()>;
}
