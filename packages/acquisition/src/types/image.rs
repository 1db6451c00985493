use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize};

/// A vehicle image row as stored in the record store.
///
/// Only `image_url` is ever written back; `position` is read to name the
/// rehosted file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub vehicle_id: String,
    pub image_url: String,
    #[serde(default)]
    pub position: Option<i32>,
}

impl ImageRecord {
    pub fn new(
        id: impl Into<String>,
        vehicle_id: impl Into<String>,
        image_url: impl Into<String>,
        position: Option<i32>,
    ) -> Self {
        Self {
            id: id.into(),
            vehicle_id: vehicle_id.into(),
            image_url: image_url.into(),
            position,
        }
    }
}

/// Identifiers are opaque: accept uuid strings and integer keys alike.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// Image bytes downloaded from an origin server.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub bytes: Bytes,
    /// Declared `Content-Type`, if the origin sent one
    pub content_type: Option<String>,
}

impl FetchedImage {
    pub fn new(bytes: impl Into<Bytes>, content_type: Option<&str>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: content_type.map(str::to_string),
        }
    }
}
