// src/offers/mod.rs

pub mod accommodation;
pub mod types;

pub use accommodation::{filter_and_format, format_offer, mentions_accommodation};
pub use types::{FormattedOffer, JobsPayload, JobsStats, QueryEcho, RawOffer, SearchResults};

pub const DEFAULT_KEYWORDS: &str = "saisonnier logé";
pub const NATIONWIDE_LABEL: &str = "Toute la France";

/// Caller-supplied search filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Commune filter; `None` searches nationwide.
    pub location: Option<String>,
    pub keywords: String,
}

impl SearchQuery {
    pub fn new(location: Option<String>, keywords: Option<String>) -> Self {
        Self {
            location: location.filter(|l| !l.is_empty()),
            keywords: keywords.unwrap_or_else(|| DEFAULT_KEYWORDS.to_string()),
        }
    }

    pub fn display_location(&self) -> &str {
        self.location.as_deref().unwrap_or(NATIONWIDE_LABEL)
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self::new(None, None)
    }
}
