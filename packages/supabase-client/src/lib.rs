pub mod error;

pub use error::{Result, SupabaseError};

use bytes::Bytes;
use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Client for a Supabase project: PostgREST tables under `/rest/v1` and
/// object storage under `/storage/v1`.
///
/// Authenticates every request with the service-role key, so it must only be
/// used server-side.
pub struct SupabaseClient {
    client: reqwest::Client,
    base_url: String,
    service_key: SecretString,
}

impl SupabaseClient {
    pub fn new(base_url: &str, service_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: SecretString::from(service_key.into()),
        }
    }

    /// Select rows from `table`. `filters` are raw PostgREST query pairs,
    /// e.g. `("image_url", "like.*proxy*")`.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        columns: &str,
        filters: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let resp = self
            .authorized(self.client.get(self.rest_url(table)))
            .query(&[("select", columns)])
            .query(filters)
            .send()
            .await?;

        let resp = ensure_success(resp).await?;
        let body = resp.text().await?;
        let rows: Vec<T> = serde_json::from_str(&body)?;

        tracing::debug!(table, rows = rows.len(), "Supabase select");
        Ok(rows)
    }

    /// Patch every row of `table` matching `filters` with the fields in `body`.
    pub async fn update<B: Serialize + ?Sized>(
        &self,
        table: &str,
        filters: &[(&str, &str)],
        body: &B,
    ) -> Result<()> {
        let resp = self
            .authorized(self.client.patch(self.rest_url(table)))
            .query(filters)
            .header("Prefer", "return=minimal")
            .json(body)
            .send()
            .await?;

        ensure_success(resp).await?;
        Ok(())
    }

    /// Upload an object to `bucket` at `path`. With `upsert` an existing
    /// object at the same path is overwritten.
    pub async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        bytes: Bytes,
        content_type: &str,
        upsert: bool,
    ) -> Result<()> {
        let size = bytes.len();
        let resp = self
            .authorized(self.client.post(self.object_url(bucket, path)))
            .header("Content-Type", content_type)
            .header("x-upsert", if upsert { "true" } else { "false" })
            .body(bytes)
            .send()
            .await?;

        ensure_success(resp).await?;

        tracing::debug!(bucket, path, size, "Supabase object uploaded");
        Ok(())
    }

    /// Public URL of an object in a public bucket. Pure string building, no request.
    pub fn public_object_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            bucket,
            encode_path(path)
        )
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn object_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            bucket,
            encode_path(path)
        )
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        let key = self.service_key.expose_secret();
        builder.header("apikey", key).bearer_auth(key)
    }
}

impl std::fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("base_url", &self.base_url)
            .field("service_key", &"[REDACTED]")
            .finish()
    }
}

async fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let message = resp.text().await.unwrap_or_default();
    Err(SupabaseError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Percent-encode each segment of an object path, keeping the separators.
fn encode_path(path: &str) -> String {
    path.trim_start_matches('/')
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_url_keeps_folders() {
        let client = SupabaseClient::new("https://proj.supabase.co/", "service-key");
        assert_eq!(
            client.public_object_url("vehicle-images", "abc/image-1.jpg"),
            "https://proj.supabase.co/storage/v1/object/public/vehicle-images/abc/image-1.jpg"
        );
    }

    #[test]
    fn object_path_segments_are_encoded() {
        let client = SupabaseClient::new("https://proj.supabase.co", "service-key");
        assert_eq!(
            client.object_url("vehicle-images", "/a b/image 2.png"),
            "https://proj.supabase.co/storage/v1/object/vehicle-images/a%20b/image%202.png"
        );
    }

    #[test]
    fn rest_url_targets_table() {
        let client = SupabaseClient::new("https://proj.supabase.co", "service-key");
        assert_eq!(
            client.rest_url("vehicle_images"),
            "https://proj.supabase.co/rest/v1/vehicle_images"
        );
    }

    #[test]
    fn debug_redacts_key() {
        let client = SupabaseClient::new("https://proj.supabase.co", "sk-very-secret");
        let debug = format!("{:?}", client);
        assert!(!debug.contains("sk-very-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn api_error_exposes_status() {
        let err = SupabaseError::Api {
            status: 409,
            message: "conflict".into(),
        };
        assert_eq!(err.status(), Some(409));
        assert_eq!(SupabaseError::Network("down".into()).status(), None);
    }
}
