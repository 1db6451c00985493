use anyhow::{Context, Result};
use dotenvy::dotenv;
use secrecy::SecretString;
use std::env;

use acquisition::providers::supabase::DEFAULT_BUCKET;

/// Application configuration loaded from environment variables.
///
/// Job credentials are optional here. A job whose credentials are missing
/// reports a configuration error when invoked; the server still starts.
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub firecrawl_api_key: Option<SecretString>,
    pub supabase_url: Option<String>,
    pub supabase_service_role_key: Option<SecretString>,
    pub storage_bucket: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            firecrawl_api_key: secret(env::var("FIRECRAWL_API_KEY").ok()),
            supabase_url: non_empty(env::var("SUPABASE_URL").ok()),
            supabase_service_role_key: secret(env::var("SUPABASE_SERVICE_ROLE_KEY").ok()),
            storage_bucket: non_empty(env::var("STORAGE_BUCKET").ok())
                .unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            firecrawl_api_key: None,
            supabase_url: None,
            supabase_service_role_key: None,
            storage_bucket: DEFAULT_BUCKET.to_string(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn secret(value: Option<String>) -> Option<SecretString> {
    non_empty(value).map(SecretString::from)
}
