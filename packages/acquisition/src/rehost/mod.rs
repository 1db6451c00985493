//! Image rehosting: move proxied images into owned storage.

mod isolate;
pub mod proxy;
mod rehoster;

pub use isolate::process_isolated;
pub use proxy::{extension_for, is_proxy_url, origin_url, storage_path, PROXY_SIGNATURE};
pub use rehoster::{ImageRehoster, RehostDeps};
