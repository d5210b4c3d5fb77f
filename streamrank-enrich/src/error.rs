use streamrank_core::{Category, Platform};

/// Errors surfaced to callers of the orchestrator.
///
/// Service failures (scrape, catalog, cache) never appear here; they degrade
/// the affected source or item instead.
#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    #[error("{platform} has no {category} ranking (supported: {supported})")]
    UnsupportedSource {
        platform: Platform,
        category: Category,
        supported: String,
    },

    #[error("failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl EnrichError {
    pub fn unsupported(platform: Platform, category: Category) -> Self {
        let supported = platform
            .categories()
            .iter()
            .map(|c| c.slug())
            .collect::<Vec<_>>()
            .join(", ");
        Self::UnsupportedSource {
            platform,
            category,
            supported,
        }
    }
}
