// HTTP routes
pub mod health;
pub mod rehost_images;
pub mod scrape_category;

pub use health::*;
pub use rehost_images::*;
pub use scrape_category::*;
