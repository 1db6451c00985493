use indexmap::IndexSet;

/// Candidate detail-page URLs collected during one scrape call.
///
/// Keeps first-seen order (page order, then link order within a page) and
/// rejects duplicates in O(1).
#[derive(Debug, Clone, Default)]
pub struct CandidateUrlSet {
    urls: IndexSet<String>,
}

impl CandidateUrlSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a URL. Returns `false` if it was already collected.
    pub fn insert(&mut self, url: impl Into<String>) -> bool {
        self.urls.insert(url.into())
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }

    /// Consume the set, keeping at most `limit` URLs in insertion order.
    pub fn into_truncated(self, limit: usize) -> Vec<String> {
        self.urls.into_iter().take(limit).collect()
    }
}

impl Extend<String> for CandidateUrlSet {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.urls.extend(iter);
    }
}
