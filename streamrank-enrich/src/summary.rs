use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use streamrank_core::{Category, EnrichedItem, Platform};

use crate::error::EnrichError;

/// Availability of one source after a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SourceStatus {
    Available,
    Unavailable { reason: String },
}

impl SourceStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }

    /// Status string reported in the aggregate summary.
    pub fn label(&self) -> String {
        match self {
            Self::Available => "success".to_string(),
            Self::Unavailable { reason } => format!("unavailable: {}", reason),
        }
    }
}

/// Outcome of one (platform, category) source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceResult {
    pub platform: Platform,
    pub category: Category,
    pub status: SourceStatus,
    /// Whether the items were served from cache rather than recomputed.
    pub from_cache: bool,
    /// Items in scraped rank order; empty when unavailable.
    pub items: Vec<EnrichedItem>,
}

impl SourceResult {
    pub fn available(
        platform: Platform,
        category: Category,
        items: Vec<EnrichedItem>,
        from_cache: bool,
    ) -> Self {
        Self {
            platform,
            category,
            status: SourceStatus::Available,
            from_cache,
            items,
        }
    }

    pub fn unavailable(platform: Platform, category: Category, reason: impl Into<String>) -> Self {
        Self {
            platform,
            category,
            status: SourceStatus::Unavailable {
                reason: reason.into(),
            },
            from_cache: false,
            items: Vec::new(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.status.is_available()
    }

    pub fn matched_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_matched()).count()
    }
}

/// Per-source entry of the summary's availability map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformStatus {
    pub available: bool,
    pub count: usize,
    pub status: String,
}

/// Counts and availability for a fetch-all run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateSummary {
    /// RFC 3339 UTC timestamp of the run.
    pub generated_at: String,
    pub total_platforms: usize,
    /// Platforms none of whose sources is unavailable.
    pub successful_platforms: usize,
    pub total_requests: usize,
    pub successful_requests: usize,
    pub cache_hits: usize,
    pub cache_hit_ratio: f64,
    /// platform slug -> category slug -> status
    pub platforms: BTreeMap<String, BTreeMap<String, PlatformStatus>>,
}

impl AggregateSummary {
    pub fn from_results(results: &[SourceResult], generated_at: DateTime<Utc>) -> Self {
        let total_requests = results.len();
        let successful_requests = results.iter().filter(|r| r.is_available()).count();
        let cache_hits = results.iter().filter(|r| r.from_cache).count();

        let all_platforms: BTreeSet<Platform> = results.iter().map(|r| r.platform).collect();
        let failed_platforms: BTreeSet<Platform> = results
            .iter()
            .filter(|r| !r.is_available())
            .map(|r| r.platform)
            .collect();

        let mut platforms: BTreeMap<String, BTreeMap<String, PlatformStatus>> = BTreeMap::new();
        for r in results {
            platforms
                .entry(r.platform.slug().to_string())
                .or_default()
                .insert(
                    r.category.slug().to_string(),
                    PlatformStatus {
                        available: r.is_available(),
                        count: r.items.len(),
                        status: r.status.label(),
                    },
                );
        }

        let cache_hit_ratio = if total_requests == 0 {
            0.0
        } else {
            cache_hits as f64 / total_requests as f64
        };

        Self {
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            total_platforms: all_platforms.len(),
            successful_platforms: all_platforms.difference(&failed_platforms).count(),
            total_requests,
            successful_requests,
            cache_hits,
            cache_hit_ratio,
            platforms,
        }
    }
}

/// Aggregate of every source: the summary plus
/// `platform field -> category field -> items`, flattened alongside it.
///
/// ```text
/// {"summary": {...}, "netflix": {"movies": [...], "tv_shows": [...]}, ...}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchAllResponse {
    pub summary: AggregateSummary,
    #[serde(flatten)]
    pub data: BTreeMap<String, BTreeMap<String, Vec<EnrichedItem>>>,
}

impl FetchAllResponse {
    pub fn from_results(results: Vec<SourceResult>, generated_at: DateTime<Utc>) -> Self {
        let summary = AggregateSummary::from_results(&results, generated_at);

        let mut data: BTreeMap<String, BTreeMap<String, Vec<EnrichedItem>>> = BTreeMap::new();
        for r in results {
            data.entry(r.platform.field_name().to_string())
                .or_default()
                .insert(r.category.field_name().to_string(), r.items);
        }

        Self { summary, data }
    }

    pub fn items(&self, platform: Platform, category: Category) -> Option<&[EnrichedItem]> {
        self.data
            .get(platform.field_name())
            .and_then(|cats| cats.get(category.field_name()))
            .map(Vec::as_slice)
    }

    pub fn to_json_bytes(&self) -> Result<Vec<u8>, EnrichError> {
        Ok(serde_json::to_vec(self)?)
    }
}
