// Vehicle Content Acquisition - API Core
//
// HTTP surface and CLI wiring for the category scraper and the image
// rehoster. The jobs themselves live in the `acquisition` crate.

pub mod config;
pub mod kernel;
pub mod server;

pub use config::*;
