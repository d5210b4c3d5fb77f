use async_trait::async_trait;
use streamrank_core::{Category, Platform};
use tokio::time::Duration;

use crate::error::CacheError;

/// Time-to-live for every cached result (4 hours).
pub const CACHE_TTL: Duration = Duration::from_secs(14_400);

/// Narrow get/set interface over a byte-oriented key-value store.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Return the stored bytes, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store `value` under `key`, replacing any previous entry.
    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError>;
}

/// Key for one (platform, category) source, e.g. `india:amazon-prime:tv-shows`.
pub fn source_key(region: &str, platform: Platform, category: Category) -> String {
    format!("{}:{}:{}", region, platform.slug(), category.slug())
}

/// Key for the aggregate of every source, e.g. `india:fetchall`.
pub fn fetch_all_key(region: &str) -> String {
    format!("{}:fetchall", region)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_format() {
        assert_eq!(
            source_key("india", Platform::AmazonPrime, Category::TvShows),
            "india:amazon-prime:tv-shows"
        );
        assert_eq!(fetch_all_key("india"), "india:fetchall");
    }

    #[test]
    fn ttl_is_four_hours() {
        assert_eq!(CACHE_TTL.as_secs(), 4 * 60 * 60);
    }
}
