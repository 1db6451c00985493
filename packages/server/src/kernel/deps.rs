//! Server dependencies for the acquisition jobs (using traits for testability)
//!
//! Both the HTTP routes and the CLI build their jobs from a `ServerDeps`.
//! A job whose services could not be wired stays unavailable and reports
//! why each time it is requested, so one missing credential never takes
//! the other job down with it.

use std::sync::Arc;

use acquisition::providers::supabase::{self, SupabaseImageStore, SupabaseObjectStorage};
use acquisition::providers::{FirecrawlScraper, HttpOriginFetcher, FIRECRAWL_API_KEY};
use acquisition::{AcquisitionError, CategoryScraper, ImageRehoster, PageScraper, RehostDeps};
use secrecy::{ExposeSecret, SecretString};

use crate::config::Config;

/// Why a job can't run.
#[derive(Debug, Clone)]
enum Unavailable {
    /// Named setting is absent
    Missing(String),
    /// Setting present but the client could not be built
    Broken(String),
}

impl Unavailable {
    fn from_error(error: AcquisitionError) -> Self {
        match error {
            AcquisitionError::Configuration(name) => Self::Missing(name),
            other => Self::Broken(other.to_string()),
        }
    }

    fn to_error(&self) -> AcquisitionError {
        match self {
            Self::Missing(name) => AcquisitionError::Configuration(name.clone()),
            Self::Broken(message) => AcquisitionError::upstream("setup", message.clone()),
        }
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Services each job needs, wired once at startup.
#[derive(Clone)]
pub struct ServerDeps {
    scraper: Result<Arc<dyn PageScraper>, Unavailable>,
    rehost: Result<RehostDeps, Unavailable>,
}

impl ServerDeps {
    /// Create ServerDeps from already-built services. `None` marks a job as
    /// not configured.
    pub fn new(scraper: Option<Arc<dyn PageScraper>>, rehost: Option<RehostDeps>) -> Self {
        Self {
            scraper: scraper.ok_or_else(|| Unavailable::Missing(FIRECRAWL_API_KEY.to_string())),
            rehost: rehost.ok_or_else(|| Unavailable::Missing(supabase::SUPABASE_URL.to_string())),
        }
    }

    /// Wire the production adapters from configuration.
    pub fn from_config(config: &Config) -> Self {
        let scraper = FirecrawlScraper::from_key(exposed(&config.firecrawl_api_key))
            .map(|scraper| Arc::new(scraper) as Arc<dyn PageScraper>)
            .map_err(Unavailable::from_error);

        let rehost = build_rehost_deps(config).map_err(Unavailable::from_error);

        if let Err(reason) = &scraper {
            tracing::warn!(?reason, "Category scraping unavailable");
        }
        if let Err(reason) = &rehost {
            tracing::warn!(?reason, "Image rehosting unavailable");
        }

        Self { scraper, rehost }
    }

    pub fn scraper_configured(&self) -> bool {
        self.scraper.is_ok()
    }

    pub fn rehoster_configured(&self) -> bool {
        self.rehost.is_ok()
    }

    /// A category scraper, or the configuration error explaining its absence.
    pub fn category_scraper(&self) -> Result<CategoryScraper, AcquisitionError> {
        match &self.scraper {
            Ok(scraper) => Ok(CategoryScraper::new(scraper.clone())),
            Err(reason) => Err(reason.to_error()),
        }
    }

    /// An image rehoster, or the configuration error explaining its absence.
    pub fn image_rehoster(&self) -> Result<ImageRehoster, AcquisitionError> {
        match &self.rehost {
            Ok(deps) => Ok(ImageRehoster::new(deps.clone())),
            Err(reason) => Err(reason.to_error()),
        }
    }
}

/// Hand a key to a client constructor, which wraps it again.
fn exposed(secret: &Option<SecretString>) -> Option<String> {
    secret.as_ref().map(|s| s.expose_secret().to_string())
}

fn build_rehost_deps(config: &Config) -> acquisition::Result<RehostDeps> {
    let client = supabase::connect(
        config.supabase_url.clone(),
        exposed(&config.supabase_service_role_key),
    )?;

    Ok(RehostDeps {
        store: Arc::new(SupabaseImageStore::new(client.clone())),
        storage: Arc::new(SupabaseObjectStorage::new(client, config.storage_bucket.clone())),
        fetcher: Arc::new(HttpOriginFetcher::new()?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_leave_jobs_unavailable() {
        let deps = ServerDeps::from_config(&Config::default());

        assert!(!deps.scraper_configured());
        assert!(!deps.rehoster_configured());

        let err = deps.category_scraper().err().unwrap();
        assert_eq!(err.to_string(), "FIRECRAWL_API_KEY is not configured");

        let err = deps.image_rehoster().err().unwrap();
        assert!(matches!(err, AcquisitionError::Configuration(_)));
    }

    #[test]
    fn missing_service_key_is_named() {
        let config = Config {
            supabase_url: Some("https://project.supabase.co".to_string()),
            ..Config::default()
        };

        let err = ServerDeps::from_config(&config).image_rehoster().err().unwrap();
        assert_eq!(err.to_string(), "SUPABASE_SERVICE_ROLE_KEY is not configured");
    }

    #[test]
    fn configured_keys_wire_both_jobs() {
        let config = Config {
            firecrawl_api_key: Some(SecretString::from("fc-test")),
            supabase_url: Some("https://project.supabase.co".to_string()),
            supabase_service_role_key: Some(SecretString::from("service-test")),
            ..Config::default()
        };

        let deps = ServerDeps::from_config(&config);

        assert!(deps.scraper_configured());
        assert!(deps.rehoster_configured());
    }
}
