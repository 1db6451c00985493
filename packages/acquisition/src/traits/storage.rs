use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

/// Owned object storage for rehosted image bytes.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` at `path`, overwriting whatever is already there.
    async fn upsert(&self, path: &str, bytes: Bytes, content_type: &str) -> Result<()>;

    /// Publicly reachable URL for the object at `path`.
    fn public_url(&self, path: &str) -> String;
}
