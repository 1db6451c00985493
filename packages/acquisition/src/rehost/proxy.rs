//! Image-proxy URL handling.
//!
//! Proxied images look like `https://site/_next/image?url=<encoded origin>&w=800`.
//! The origin is recovered from the `url` query parameter.

use std::sync::LazyLock;
use url::Url;

use crate::error::{AcquisitionError, Result};
use crate::types::image::ImageRecord;

/// Path + query signature shared by every proxy URL.
pub const PROXY_SIGNATURE: &str = "/_next/image?url=";

/// Used when the origin server omits `Content-Type`.
pub const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

/// Anchor for proxy URLs stored without scheme and host.
static RELATIVE_BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse("http://localhost/").expect("valid base URL"));

pub fn is_proxy_url(url: &str) -> bool {
    url.contains(PROXY_SIGNATURE)
}

/// Extract and decode the origin image URL from a proxy URL.
///
/// Fails with `Extraction` when the URL can't be parsed or carries no `url`
/// parameter. A host-relative origin is resolved against the proxy's host.
pub fn origin_url(proxy_url: &str) -> Result<String> {
    let absolute = Url::parse(proxy_url).ok();
    let parsed = match &absolute {
        Some(url) => url.clone(),
        None => RELATIVE_BASE.join(proxy_url).map_err(|_| {
            AcquisitionError::Extraction(format!("invalid proxy URL: {}", proxy_url))
        })?,
    };

    let raw = parsed
        .query_pairs()
        .find(|(key, _)| key == "url")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            AcquisitionError::Extraction(format!("no url parameter in {}", proxy_url))
        })?;

    let decoded = match urlencoding::decode(&raw) {
        Ok(value) => value.into_owned(),
        Err(_) => raw.clone(),
    };

    match Url::parse(&decoded) {
        Ok(origin) if matches!(origin.scheme(), "http" | "https") => Ok(decoded),
        Ok(origin) => Err(AcquisitionError::Extraction(format!(
            "unsupported origin scheme '{}' in {}",
            origin.scheme(),
            proxy_url
        ))),
        Err(_) => absolute
            .and_then(|proxy| proxy.join(&decoded).ok())
            .map(|origin| origin.to_string())
            .ok_or_else(|| {
                AcquisitionError::Extraction(format!(
                    "origin '{}' is not an absolute URL",
                    decoded
                ))
            }),
    }
}

/// `png` when the declared type says so, `jpg` for everything else.
pub fn extension_for(content_type: &str) -> &'static str {
    if content_type.to_lowercase().contains("png") {
        "png"
    } else {
        "jpg"
    }
}

/// `<vehicle_id>/image-<position>.<ext>`, position defaulting to 1.
pub fn storage_path(record: &ImageRecord, content_type: &str) -> String {
    format!(
        "{}/image-{}.{}",
        record.vehicle_id,
        record.position.unwrap_or(1),
        extension_for(content_type)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_origin_from_proxy_url() {
        let proxy = "https://www.arielcar.it/_next/image?url=https%3A%2F%2Fexample.com%2Fphoto.jpg&w=800&q=75";
        assert_eq!(origin_url(proxy).unwrap(), "https://example.com/photo.jpg");
    }

    #[test]
    fn relative_proxy_url_is_accepted() {
        let proxy = "/_next/image?url=https%3A%2F%2Fcdn.example.com%2Fa.png&w=640";
        assert_eq!(origin_url(proxy).unwrap(), "https://cdn.example.com/a.png");
    }

    #[test]
    fn host_relative_origin_resolves_against_proxy_host() {
        let proxy = "https://www.arielcar.it/_next/image?url=%2Fuploads%2Fcar.jpg&w=800";
        assert_eq!(origin_url(proxy).unwrap(), "https://www.arielcar.it/uploads/car.jpg");
    }

    #[test]
    fn missing_url_parameter_is_extraction_error() {
        let err = origin_url("https://www.arielcar.it/_next/image?w=800").unwrap_err();
        assert!(matches!(err, AcquisitionError::Extraction(_)));
        assert!(err.to_string().contains("no url parameter"));
    }

    #[test]
    fn empty_url_parameter_is_extraction_error() {
        assert!(origin_url("https://a.it/_next/image?url=&w=800").is_err());
    }

    #[test]
    fn non_http_origin_is_rejected() {
        let err = origin_url("https://a.it/_next/image?url=file%3A%2F%2F%2Fetc%2Fpasswd").unwrap_err();
        assert!(err.to_string().contains("unsupported origin scheme"));
    }

    #[test]
    fn detects_proxy_signature() {
        assert!(is_proxy_url("https://a.it/_next/image?url=x"));
        assert!(!is_proxy_url("https://p.supabase.co/storage/v1/object/public/vehicle-images/v/image-1.jpg"));
    }

    #[test]
    fn storage_path_uses_position_and_content_type() {
        let record = ImageRecord::new("img-1", "veh-9", "https://a.it/_next/image?url=x", Some(3));
        assert_eq!(storage_path(&record, "image/png"), "veh-9/image-3.png");
        assert_eq!(storage_path(&record, "image/webp"), "veh-9/image-3.jpg");
    }

    #[test]
    fn storage_path_defaults_position_to_one() {
        let record = ImageRecord::new("img-1", "veh-9", "https://a.it/_next/image?url=x", None);
        assert_eq!(storage_path(&record, DEFAULT_CONTENT_TYPE), "veh-9/image-1.jpg");
    }
}
