use std::sync::Arc;

use futures::StreamExt;
use futures::future::join_all;
use futures::stream;
use serde::de::DeserializeOwned;
use streamrank_cache::{CacheError, CacheStore, fetch_all_key, source_key};
use streamrank_core::{Category, EnrichedItem, MetadataCatalog, Platform, ScrapeError, ScrapedItem};
use streamrank_match::MatchEngine;
use tokio::sync::Semaphore;

use crate::error::EnrichError;
use crate::options::EnrichOptions;
use crate::source::{RankingSource, configured_sources};
use crate::summary::{FetchAllResponse, SourceResult};

/// Lifecycle of one source request.
///
/// ```text
/// Pending -> CacheCheck -> CacheHit -> Done
///                       -> CacheMiss -> Scrape -> ScrapeFailed -> Done (unavailable)
///                                              -> Match -> CacheWrite -> Done
/// ```
#[derive(Debug)]
pub enum SourceState {
    Pending,
    CacheCheck,
    CacheHit(Vec<EnrichedItem>),
    CacheMiss,
    Scrape,
    ScrapeFailed(ScrapeError),
    Match(Vec<ScrapedItem>),
    CacheWrite(Vec<EnrichedItem>),
    Done(SourceResult),
}

impl SourceState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::CacheCheck => "cache-check",
            Self::CacheHit(_) => "cache-hit",
            Self::CacheMiss => "cache-miss",
            Self::Scrape => "scrape",
            Self::ScrapeFailed(_) => "scrape-failed",
            Self::Match(_) => "match",
            Self::CacheWrite(_) => "cache-write",
            Self::Done(_) => "done",
        }
    }
}

/// Drives sources through cache, scrape, match, and cache write-back.
///
/// Holds no mutable state between runs; every call builds its result
/// locally and publishes it with a single cache write.
pub struct Orchestrator {
    source: Arc<dyn RankingSource>,
    cache: Arc<dyn CacheStore>,
    engine: MatchEngine,
    options: EnrichOptions,
    scrape_permits: Arc<Semaphore>,
}

impl Orchestrator {
    pub fn new(
        source: Arc<dyn RankingSource>,
        catalog: Arc<dyn MetadataCatalog>,
        cache: Arc<dyn CacheStore>,
        options: EnrichOptions,
    ) -> Self {
        let engine = MatchEngine::new(catalog, options.reference_year)
            .with_max_concurrent_queries(options.max_catalog_requests)
            .with_query_timeout(options.catalog_timeout);
        let scrape_permits = Arc::new(Semaphore::new(options.max_concurrent_scrapes.max(1)));

        Self {
            source,
            cache,
            engine,
            options,
            scrape_permits,
        }
    }

    /// Enriched ranking for one source.
    ///
    /// Only an unsupported (platform, category) pair is an error; service
    /// failures come back as an unavailable [`SourceResult`].
    pub async fn get_enriched(
        &self,
        platform: Platform,
        category: Category,
    ) -> Result<SourceResult, EnrichError> {
        if !platform.supports(category) {
            return Err(EnrichError::unsupported(platform, category));
        }
        Ok(self.run_source(platform, category).await)
    }

    /// Every configured source plus the aggregate summary.
    ///
    /// Served from the aggregate cache entry when present; otherwise all
    /// sources run concurrently and the combined payload is cached.
    pub async fn get_all(&self) -> FetchAllResponse {
        let key = fetch_all_key(&self.options.region);
        if let Some(cached) = self.cache_read::<FetchAllResponse>(&key).await {
            log::info!("Serving all rankings from cache ({})", key);
            return cached;
        }

        let sources = configured_sources();
        let results = join_all(
            sources
                .iter()
                .map(|&(platform, category)| self.run_source(platform, category)),
        )
        .await;

        let response = FetchAllResponse::from_results(results, chrono::Utc::now());
        let summary = &response.summary;
        log::info!(
            "Fetched {}/{} sources ({} from cache), {}/{} platforms fully available",
            summary.successful_requests,
            summary.total_requests,
            summary.cache_hits,
            summary.successful_platforms,
            summary.total_platforms,
        );

        if summary.successful_requests == 0 {
            log::warn!("No source available; not caching aggregate");
            return response;
        }
        match response.to_json_bytes() {
            Ok(bytes) => self.cache_write(&key, &bytes).await,
            Err(e) => log::warn!("Failed to encode aggregate for cache: {}", e),
        }
        response
    }

    async fn run_source(&self, platform: Platform, category: Category) -> SourceResult {
        let key = source_key(&self.options.region, platform, category);
        let mut state = SourceState::Pending;

        loop {
            log::debug!("{}: {}", key, state.name());
            state = match state {
                SourceState::Pending => SourceState::CacheCheck,
                SourceState::CacheCheck => match self.cache_read::<Vec<EnrichedItem>>(&key).await {
                    Some(items) => SourceState::CacheHit(items),
                    None => SourceState::CacheMiss,
                },
                SourceState::CacheHit(items) => {
                    SourceState::Done(SourceResult::available(platform, category, items, true))
                }
                SourceState::CacheMiss => SourceState::Scrape,
                SourceState::Scrape => match self.scrape(platform, category).await {
                    Ok(items) => SourceState::Match(items),
                    Err(e) => SourceState::ScrapeFailed(e),
                },
                SourceState::ScrapeFailed(e) => {
                    log::error!("{} unavailable: {}", key, e);
                    SourceState::Done(SourceResult::unavailable(platform, category, e.to_string()))
                }
                SourceState::Match(items) => {
                    SourceState::CacheWrite(self.match_items(items, category).await)
                }
                SourceState::CacheWrite(items) => {
                    match serde_json::to_vec(&items) {
                        Ok(bytes) => self.cache_write(&key, &bytes).await,
                        Err(e) => log::warn!("Failed to encode {} for cache: {}", key, e),
                    }
                    SourceState::Done(SourceResult::available(platform, category, items, false))
                }
                SourceState::Done(result) => {
                    log::info!(
                        "{}: {} items, {} matched{}",
                        key,
                        result.items.len(),
                        result.matched_count(),
                        if result.from_cache { " (cached)" } else { "" },
                    );
                    return result;
                }
            };
        }
    }

    /// Fetch and validate one ranking. Rows with a zero rank or blank title
    /// are dropped; a ranking with nothing left is a failure.
    async fn scrape(
        &self,
        platform: Platform,
        category: Category,
    ) -> Result<Vec<ScrapedItem>, ScrapeError> {
        let _permit = self
            .scrape_permits
            .acquire()
            .await
            .map_err(|_| ScrapeError::unreachable("scrape limiter closed"))?;

        let timeout = self.options.scrape_timeout;
        let raw = tokio::time::timeout(timeout, self.source.fetch_ranking(platform, category))
            .await
            .map_err(|_| ScrapeError::Timeout {
                secs: timeout.as_secs(),
            })??;

        let total = raw.len();
        let items: Vec<ScrapedItem> = raw
            .into_iter()
            .filter(|item| {
                let valid = item.is_valid();
                if !valid {
                    log::debug!("Dropping invalid row {:?} from {} {}", item, platform, category);
                }
                valid
            })
            .collect();

        if items.is_empty() {
            return Err(ScrapeError::Empty);
        }
        if items.len() < total {
            log::debug!("Kept {}/{} rows from {} {}", items.len(), total, platform, category);
        }
        Ok(items)
    }

    /// Match every item concurrently, returning them in input order.
    async fn match_items(&self, items: Vec<ScrapedItem>, category: Category) -> Vec<EnrichedItem> {
        let mut slots: Vec<Option<EnrichedItem>> = vec![None; items.len()];
        let engine = &self.engine;

        let finished: Vec<(usize, EnrichedItem)> = stream::iter(items.into_iter().enumerate())
            .map(|(index, item)| async move { (index, engine.enrich(item, category).await) })
            .buffer_unordered(self.options.item_workers.max(1))
            .collect()
            .await;

        for (index, enriched) in finished {
            slots[index] = Some(enriched);
        }
        slots.into_iter().flatten().collect()
    }

    /// Read and decode a cached payload. Any failure is a miss.
    async fn cache_read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let result = match tokio::time::timeout(self.options.cache_timeout, self.cache.get(key)).await
        {
            Ok(result) => result,
            Err(_) => Err(CacheError::Timeout {
                secs: self.options.cache_timeout.as_secs(),
            }),
        };

        match result {
            Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(value) => Some(value),
                Err(e) => {
                    log::warn!("Discarding undecodable cache entry {}: {}", key, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("Cache read error for {}: {}", key, e);
                None
            }
        }
    }

    /// Write a payload; failures are logged and otherwise ignored.
    async fn cache_write(&self, key: &str, bytes: &[u8]) {
        let write = self.cache.set(key, bytes, self.options.cache_ttl);
        let result = match tokio::time::timeout(self.options.cache_timeout, write).await {
            Ok(result) => result,
            Err(_) => Err(CacheError::Timeout {
                secs: self.options.cache_timeout.as_secs(),
            }),
        };
        if let Err(e) = result {
            log::warn!("Cache write error for {}: {}", key, e);
        }
    }
}
