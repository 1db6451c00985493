//! Integration tests for image rehosting against in-memory services.

use std::sync::Arc;

use acquisition::rehost::is_proxy_url;
use acquisition::testing::{MemoryImageStore, MemoryObjectStorage, MockOriginFetcher};
use acquisition::{AcquisitionError, ImageRecord, ImageRehoster, RehostDeps};

const PHOTO: &str = "https://example.com/photo.jpg";
const PROXIED_PHOTO: &str =
    "https://www.arielcar.it/_next/image?url=https%3A%2F%2Fexample.com%2Fphoto.jpg&w=800";

struct Fixture {
    store: MemoryImageStore,
    storage: MemoryObjectStorage,
    fetcher: MockOriginFetcher,
}

impl Fixture {
    fn new(records: Vec<ImageRecord>, fetcher: MockOriginFetcher) -> Self {
        Self {
            store: MemoryImageStore::new().with_records(records),
            storage: MemoryObjectStorage::default(),
            fetcher,
        }
    }

    fn rehoster(&self) -> ImageRehoster {
        ImageRehoster::new(RehostDeps {
            store: Arc::new(self.store.clone()),
            storage: Arc::new(self.storage.clone()),
            fetcher: Arc::new(self.fetcher.clone()),
        })
    }
}

fn proxied(origin: &str) -> String {
    format!(
        "https://www.arielcar.it/_next/image?url={}&w=800",
        urlencoding::encode(origin)
    )
}

#[tokio::test]
async fn test_scenario_b_rehosts_and_second_run_is_noop() {
    let fixture = Fixture::new(
        vec![ImageRecord::new("img-1", "veh-1", PROXIED_PHOTO, Some(2))],
        MockOriginFetcher::new().with_image(PHOTO, b"jpeg-bytes", Some("image/jpeg")),
    );

    let first = fixture.rehoster().rehost_proxied_images().await.unwrap();

    assert_eq!(first.total, 1);
    assert_eq!(first.success, 1);
    assert_eq!(first.failures, 0);
    assert!(first.errors.is_empty());

    let record = fixture.store.get("img-1").unwrap();
    assert_eq!(
        record.image_url,
        "https://storage.test/vehicle-images/veh-1/image-2.jpg"
    );
    assert!(!is_proxy_url(&record.image_url));
    assert_eq!(record.position, Some(2));

    let stored = fixture.storage.get("veh-1/image-2.jpg").unwrap();
    assert_eq!(&stored.bytes[..], b"jpeg-bytes");
    assert_eq!(stored.content_type, "image/jpeg");

    let second = fixture.rehoster().rehost_proxied_images().await.unwrap();

    assert!(second.is_empty());
    assert_eq!(second.total, 0);
    assert_eq!(fixture.fetcher.fetched_urls(), vec![PHOTO.to_string()]);
}

#[tokio::test]
async fn test_missing_url_parameter_fails_only_that_record() {
    let fixture = Fixture::new(
        vec![
            ImageRecord::new("bad", "veh-1", "https://www.arielcar.it/_next/image?url=", Some(1)),
            ImageRecord::new("good", "veh-2", PROXIED_PHOTO, Some(1)),
        ],
        MockOriginFetcher::new().with_image(PHOTO, b"bytes", Some("image/jpeg")),
    );

    let report = fixture.rehoster().rehost_proxied_images().await.unwrap();

    assert_eq!(report.total, 2);
    assert_eq!(report.success, 1);
    assert_eq!(report.failures, 1);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].starts_with("Image bad:"));
    assert!(report.errors[0].contains("no url parameter"));

    assert!(is_proxy_url(&fixture.store.get("bad").unwrap().image_url));
    assert!(!is_proxy_url(&fixture.store.get("good").unwrap().image_url));
}

#[tokio::test]
async fn test_origin_error_status_is_reported() {
    let missing = "https://example.com/gone.jpg";
    let fixture = Fixture::new(
        vec![ImageRecord::new("img-1", "veh-1", proxied(missing), None)],
        MockOriginFetcher::new().with_status(missing, 403),
    );

    let report = fixture.rehoster().rehost_proxied_images().await.unwrap();

    assert_eq!(report.failures, 1);
    assert!(report.errors[0].contains("403"));
    assert!(report.errors[0].contains(missing));
    assert!(fixture.storage.is_empty());
}

#[tokio::test]
async fn test_upload_failure_leaves_record_untouched() {
    let fixture = Fixture {
        store: MemoryImageStore::new().with_records(vec![ImageRecord::new(
            "img-1",
            "veh-1",
            PROXIED_PHOTO,
            Some(1),
        )]),
        storage: MemoryObjectStorage::default().failing_upload_for("veh-1/image-1.jpg"),
        fetcher: MockOriginFetcher::new().with_image(PHOTO, b"bytes", None),
    };

    let report = fixture.rehoster().rehost_proxied_images().await.unwrap();

    assert_eq!(report.failures, 1);
    assert_eq!(fixture.store.get("img-1").unwrap().image_url, PROXIED_PHOTO);
    assert!(fixture.store.updates().is_empty());
}

#[tokio::test]
async fn test_update_failure_is_counted() {
    let fixture = Fixture {
        store: MemoryImageStore::new()
            .with_records(vec![ImageRecord::new("img-1", "veh-1", PROXIED_PHOTO, Some(1))])
            .failing_update_for("img-1"),
        storage: MemoryObjectStorage::default(),
        fetcher: MockOriginFetcher::new().with_image(PHOTO, b"bytes", Some("image/jpeg")),
    };

    let report = fixture.rehoster().rehost_proxied_images().await.unwrap();

    assert_eq!(report.success, 0);
    assert_eq!(report.failures, 1);
    assert!(report.errors[0].contains("rejected"));
}

#[tokio::test]
async fn test_png_content_type_picks_png_extension() {
    let origin = "https://cdn.example.com/render";
    let fixture = Fixture::new(
        vec![ImageRecord::new("img-1", "veh-7", proxied(origin), None)],
        MockOriginFetcher::new().with_image(origin, b"png-bytes", Some("image/png")),
    );

    fixture.rehoster().rehost_proxied_images().await.unwrap();

    let stored = fixture.storage.get("veh-7/image-1.png").unwrap();
    assert_eq!(stored.content_type, "image/png");
    assert_eq!(
        fixture.store.get("img-1").unwrap().image_url,
        "https://storage.test/vehicle-images/veh-7/image-1.png"
    );
}

#[tokio::test]
async fn test_missing_content_type_defaults_to_jpeg() {
    let fixture = Fixture::new(
        vec![ImageRecord::new("img-1", "veh-1", PROXIED_PHOTO, Some(4))],
        MockOriginFetcher::new().with_image(PHOTO, b"bytes", None),
    );

    fixture.rehoster().rehost_proxied_images().await.unwrap();

    let stored = fixture.storage.get("veh-1/image-4.jpg").unwrap();
    assert_eq!(stored.content_type, "image/jpeg");
}

#[tokio::test]
async fn test_direct_storage_urls_are_not_candidates() {
    let fixture = Fixture::new(
        vec![ImageRecord::new(
            "img-1",
            "veh-1",
            "https://storage.test/vehicle-images/veh-1/image-1.jpg",
            Some(1),
        )],
        MockOriginFetcher::new(),
    );

    let report = fixture.rehoster().rehost_proxied_images().await.unwrap();

    assert!(report.is_empty());
    assert!(fixture.fetcher.fetched_urls().is_empty());
}

#[tokio::test]
async fn test_store_query_error_is_fatal() {
    let fixture = Fixture {
        store: MemoryImageStore::new()
            .with_records(vec![ImageRecord::new("img-1", "veh-1", PROXIED_PHOTO, Some(1))])
            .failing_queries(),
        storage: MemoryObjectStorage::default(),
        fetcher: MockOriginFetcher::new().with_image(PHOTO, b"bytes", None),
    };

    let err = fixture.rehoster().rehost_proxied_images().await.unwrap_err();

    assert!(matches!(err, AcquisitionError::Upstream { .. }));
    assert!(fixture.fetcher.fetched_urls().is_empty());
}

#[tokio::test]
async fn test_records_are_processed_in_order() {
    let origins = ["https://e.com/1.jpg", "https://e.com/2.jpg", "https://e.com/3.jpg"];
    let records = origins
        .iter()
        .enumerate()
        .map(|(i, o)| ImageRecord::new(format!("img-{i}"), "veh-1", proxied(o), Some(i as i32)))
        .collect();
    let fetcher = origins
        .iter()
        .fold(MockOriginFetcher::new(), |f, o| f.with_image(o, b"x", None));
    let fixture = Fixture::new(records, fetcher);

    let report = fixture.rehoster().rehost_proxied_images().await.unwrap();

    assert_eq!(report.success, 3);
    assert_eq!(fixture.fetcher.fetched_urls(), origins.to_vec());
    assert_eq!(fixture.storage.len(), 3);
}
