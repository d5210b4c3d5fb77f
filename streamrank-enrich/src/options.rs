use chrono::Datelike;
use streamrank_cache::CACHE_TTL;
use tokio::time::Duration;

pub const DEFAULT_REGION: &str = "india";

/// Options controlling an orchestration run.
#[derive(Debug, Clone)]
pub struct EnrichOptions {
    /// Region prefix for cache keys.
    pub region: String,
    /// Simultaneous catalog queries across all sources.
    pub max_catalog_requests: usize,
    /// Simultaneous ranking fetches.
    pub max_concurrent_scrapes: usize,
    /// Items matched concurrently within one source.
    pub item_workers: usize,
    pub catalog_timeout: Duration,
    pub scrape_timeout: Duration,
    pub cache_timeout: Duration,
    pub cache_ttl: Duration,
    /// Year that release-year distances are measured from.
    pub reference_year: i32,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            max_catalog_requests: 8,
            max_concurrent_scrapes: 2,
            item_workers: 10,
            catalog_timeout: Duration::from_secs(10),
            scrape_timeout: Duration::from_secs(30),
            cache_timeout: Duration::from_secs(2),
            cache_ttl: CACHE_TTL,
            reference_year: chrono::Utc::now().year(),
        }
    }
}
