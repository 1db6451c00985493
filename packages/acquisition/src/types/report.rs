use serde::{Deserialize, Serialize};

/// Result of a category scrape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScrape {
    pub urls: Vec<String>,
    pub total: usize,
}

impl CategoryScrape {
    pub fn new(urls: Vec<String>) -> Self {
        let total = urls.len();
        Self { urls, total }
    }
}

/// Summary of one rehosting batch.
///
/// Failures never abort a batch; they show up here instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RehostReport {
    pub total: usize,
    pub success: usize,
    pub failures: usize,
    pub errors: Vec<String>,
}

impl RehostReport {
    pub fn record_success(&mut self) {
        self.total += 1;
        self.success += 1;
    }

    pub fn record_failure(&mut self, error: impl Into<String>) {
        self.total += 1;
        self.failures += 1;
        self.errors.push(error.into());
    }

    /// No candidates were found, so nothing ran.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn summary_message(&self) -> String {
        if self.is_empty() {
            "No proxied images found".to_string()
        } else {
            format!(
                "Processed {} images: {} rehosted, {} failed",
                self.total, self.success, self.failures
            )
        }
    }
}
