//! Credential handling.
//!
//! Credentials come from the environment as `Option<String>`; a job that
//! needs one turns absence into a `Configuration` error at construction time
//! rather than failing halfway through a batch.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

use crate::error::{AcquisitionError, Result};

/// A named secret that never shows up in logs or debug output.
pub struct Credential {
    name: &'static str,
    value: SecretString,
}

impl Credential {
    /// Require a credential to be present and non-blank.
    ///
    /// `name` is the setting's public name (e.g. the env var), used in the
    /// error message.
    pub fn require(name: &'static str, value: Option<String>) -> Result<Self> {
        match value {
            Some(v) if !v.trim().is_empty() => Ok(Self {
                name,
                value: SecretString::from(v.trim().to_string()),
            }),
            _ => Err(AcquisitionError::Configuration(name.to_string())),
        }
    }

    /// Only call this at the point of use (request header, client constructor).
    pub fn expose(&self) -> &str {
        self.value.expose_secret()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=[REDACTED]", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credential_is_configuration_error() {
        let err = Credential::require("FIRECRAWL_API_KEY", None).unwrap_err();
        assert!(matches!(err, AcquisitionError::Configuration(ref n) if n == "FIRECRAWL_API_KEY"));
    }

    #[test]
    fn blank_credential_is_configuration_error() {
        assert!(Credential::require("FIRECRAWL_API_KEY", Some("  ".into())).is_err());
    }

    #[test]
    fn debug_hides_value() {
        let cred = Credential::require("FIRECRAWL_API_KEY", Some("fc-secret".into())).unwrap();
        let debug = format!("{:?}", cred);
        assert!(!debug.contains("fc-secret"));
        assert_eq!(debug, "FIRECRAWL_API_KEY=[REDACTED]");
        assert_eq!(cred.expose(), "fc-secret");
    }
}
