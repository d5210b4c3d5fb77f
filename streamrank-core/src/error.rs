/// Failures of the ranking-page scraping collaborator.
///
/// A scrape failure downgrades a single source to "unavailable".
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("ranking source unreachable: {0}")]
    Unreachable(String),

    #[error("ranking page could not be parsed: {0}")]
    Unparsable(String),

    #[error("ranking page contained no items")]
    Empty,

    #[error("ranking fetch timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScrapeError {
    pub fn unreachable(msg: impl Into<String>) -> Self {
        Self::Unreachable(msg.into())
    }

    pub fn unparsable(msg: impl Into<String>) -> Self {
        Self::Unparsable(msg.into())
    }
}

/// Failures of the metadata catalog.
///
/// A catalog failure degrades one item's match to "no match" and never
/// fails the surrounding source.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("metadata catalog is not configured (missing API key)")]
    NotConfigured,

    #[error("metadata catalog unreachable: {0}")]
    Unreachable(String),

    #[error("rate limited by metadata catalog")]
    RateLimited,

    #[error("catalog error (HTTP {status}): {message}")]
    Status { status: u16, message: String },

    #[error("malformed catalog response: {0}")]
    Malformed(String),

    #[error("catalog query timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

impl CatalogError {
    pub fn unreachable(msg: impl Into<String>) -> Self {
        Self::Unreachable(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}
