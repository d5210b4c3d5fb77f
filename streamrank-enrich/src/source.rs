use std::path::PathBuf;

use async_trait::async_trait;
use streamrank_core::{Category, Platform, ScrapeError, ScrapedItem};

/// The scraping collaborator: produces one platform's ranked items.
#[async_trait]
pub trait RankingSource: Send + Sync {
    async fn fetch_ranking(
        &self,
        platform: Platform,
        category: Category,
    ) -> Result<Vec<ScrapedItem>, ScrapeError>;
}

/// Every (platform, category) pair with a published ranking, in platform
/// registration order.
pub fn configured_sources() -> Vec<(Platform, Category)> {
    Platform::all()
        .iter()
        .flat_map(|&p| p.categories().iter().map(move |&c| (p, c)))
        .collect()
}

/// Reads pre-scraped rankings from a directory of JSON snapshots.
///
/// Layout is one file per source:
/// ```text
/// <root>/netflix/movies.json
/// <root>/amazon-prime/tv-shows.json
/// ```
/// Each file holds an array of `{"rank", "title", "days_in_top_10"}` objects.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    root: PathBuf,
}

impl SnapshotSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn snapshot_path(&self, platform: Platform, category: Category) -> PathBuf {
        self.root
            .join(platform.slug())
            .join(format!("{}.json", category.slug()))
    }
}

#[async_trait]
impl RankingSource for SnapshotSource {
    async fn fetch_ranking(
        &self,
        platform: Platform,
        category: Category,
    ) -> Result<Vec<ScrapedItem>, ScrapeError> {
        let path = self.snapshot_path(platform, category);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ScrapeError::unreachable(format!(
                    "no snapshot at {}",
                    path.display()
                )));
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&bytes)
            .map_err(|e| ScrapeError::unparsable(format!("{}: {}", path.display(), e)))
    }
}
