//! Infrastructure seams. No business logic lives behind these traits; the
//! jobs in `category` and `rehost` are written against them so tests can
//! swap in the mocks from `crate::testing`.

pub mod fetcher;
pub mod scraper;
pub mod storage;
pub mod store;
