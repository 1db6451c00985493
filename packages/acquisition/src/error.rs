//! Typed errors for the acquisition jobs.
//!
//! Four kinds, matching who can fix them: the caller (`Validation`), the
//! operator (`Configuration`), nobody right now (`Upstream`), or the data
//! itself (`Extraction`).

use thiserror::Error;

/// Errors raised by the category scraper, the image rehoster and their adapters.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    /// Bad or missing required input
    #[error("{reason}")]
    Validation { reason: String },

    /// Required credential or setting is absent
    #[error("{0} is not configured")]
    Configuration(String),

    /// A third-party service failed or answered with a non-success status
    #[error("{service} error{}: {message}", fmt_status(.status))]
    Upstream {
        service: String,
        status: Option<u16>,
        message: String,
    },

    /// Expected structure is missing from otherwise valid data
    #[error("{0}")]
    Extraction(String),
}

impl AcquisitionError {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    pub fn upstream(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            service: service.into(),
            status: None,
            message: message.into(),
        }
    }

    pub fn upstream_status(
        service: impl Into<String>,
        status: u16,
        message: impl Into<String>,
    ) -> Self {
        Self::Upstream {
            service: service.into(),
            status: Some(status),
            message: message.into(),
        }
    }

    /// True for errors the caller can correct by changing the request.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

#[cfg(feature = "supabase")]
impl From<supabase_client::SupabaseError> for AcquisitionError {
    fn from(err: supabase_client::SupabaseError) -> Self {
        match err {
            supabase_client::SupabaseError::Api { status, message } => {
                Self::upstream_status("supabase", status, message)
            }
            other => Self::upstream("supabase", other.to_string()),
        }
    }
}

fn fmt_status(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {s})")).unwrap_or_default()
}

/// Result type alias for acquisition operations.
pub type Result<T> = std::result::Result<T, AcquisitionError>;
