//! Domain blacklist applied before any provider call.

/// A configured set of blocked domain fragments.
///
/// Matching is plain substring containment against the whole URL string,
/// not a strict host comparison. That is intentionally permissive: it also
/// catches subdomains (`login.spam.com`) and path tricks
/// (`https://ok.com/spam.com/..`).
#[derive(Debug, Clone, Default)]
pub struct Blacklist {
    domains: Vec<String>,
}

impl Blacklist {
    pub fn new(domains: Vec<String>) -> Self {
        Self { domains }
    }

    /// Parses a comma-separated config value, skipping empty entries.
    pub fn from_csv(value: &str) -> Self {
        Self {
            domains: value
                .split(',')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(String::from)
                .collect(),
        }
    }

    /// Returns false when any configured fragment occurs anywhere in the URL.
    pub fn is_allowed(&self, url: &str) -> bool {
        !self.domains.iter().any(|d| url.contains(d.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }
}
