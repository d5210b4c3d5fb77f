use std::cmp::Ordering;
use std::sync::Arc;

use futures::future::join_all;
use streamrank_core::{
    ACCEPTANCE_THRESHOLD, Candidate, CatalogError, Category, EnrichedItem, Enrichment,
    MatchResult, MediaType, MetadataCatalog, ScrapedItem,
};
use tokio::sync::Semaphore;
use tokio::time::Duration;

use crate::normalize::{NormalizedTitle, normalize};
use crate::relevance::relevance;
use crate::similarity::title_similarity;

const TITLE_WEIGHT: f64 = 0.7;
const YEAR_WEIGHT: f64 = 0.3;
const EXACT_TITLE_BONUS: f64 = 0.1;
const POPULARITY_BONUS: f64 = 0.05;
/// Vote count above which a candidate earns the popularity bonus.
const POPULARITY_FLOOR: u64 = 1000;
/// Only the head of each catalog result list is scored.
const MAX_CANDIDATES_PER_QUERY: usize = 10;

const DEFAULT_MAX_CONCURRENT_QUERIES: usize = 8;
const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Whether a score clears the acceptance threshold (inclusive).
pub fn is_accepted(score: f64) -> bool {
    score >= ACCEPTANCE_THRESHOLD
}

/// Combined confidence of one candidate for a normalized query, in `[0, 1]`.
pub fn score_candidate(query: &NormalizedTitle, candidate: &Candidate, reference_year: i32) -> f64 {
    let title_score = title_similarity(&query.canonical, candidate);
    let year_score = relevance(reference_year, candidate.release_year, query.extracted_year);

    let mut score = title_score * TITLE_WEIGHT + year_score * YEAR_WEIGHT;
    if title_score == 1.0 {
        score += EXACT_TITLE_BONUS;
    }
    if candidate.popularity_count > POPULARITY_FLOOR {
        score += POPULARITY_BONUS;
    }
    score.min(1.0)
}

/// Ranking between two scored candidates: higher score, then more votes,
/// then the lower catalog id so the choice is deterministic.
fn compare_scored(a: (&Candidate, f64), b: (&Candidate, f64)) -> Ordering {
    a.1.total_cmp(&b.1)
        .then_with(|| a.0.popularity_count.cmp(&b.0.popularity_count))
        .then_with(|| b.0.catalog_id.cmp(&a.0.catalog_id))
}

/// Best candidate of one pool with its unrounded score.
fn best_in_pool<'a>(
    query: &NormalizedTitle,
    candidates: &'a [Candidate],
    reference_year: i32,
) -> Option<(&'a Candidate, f64)> {
    candidates
        .iter()
        .map(|c| (c, score_candidate(query, c, reference_year)))
        .max_by(|a, b| compare_scored(*a, *b))
}

/// Score a single candidate pool and apply the acceptance threshold.
///
/// Pure: no catalog access. The accepted confidence is rounded to three
/// decimals; the threshold is applied to the unrounded score.
pub fn match_candidates(
    query: &NormalizedTitle,
    candidates: &[Candidate],
    reference_year: i32,
) -> MatchResult {
    match best_in_pool(query, candidates, reference_year) {
        Some((candidate, score)) if is_accepted(score) => {
            MatchResult::accepted(candidate.clone(), round_confidence(score))
        }
        Some((_, score)) => MatchResult::rejected(score),
        None => MatchResult::none(),
    }
}

fn round_confidence(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}

/// Matches scraped titles against the metadata catalog.
///
/// Catalog access is bounded by a semaphore shared by every clone of the
/// engine, and each query carries its own timeout. Any catalog failure is
/// logged and treated as an empty candidate pool.
#[derive(Clone)]
pub struct MatchEngine {
    catalog: Arc<dyn MetadataCatalog>,
    reference_year: i32,
    permits: Arc<Semaphore>,
    query_timeout: Duration,
}

impl MatchEngine {
    pub fn new(catalog: Arc<dyn MetadataCatalog>, reference_year: i32) -> Self {
        Self {
            catalog,
            reference_year,
            permits: Arc::new(Semaphore::new(DEFAULT_MAX_CONCURRENT_QUERIES)),
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    /// Cap the number of catalog queries in flight at once (minimum 1).
    pub fn with_max_concurrent_queries(mut self, max: usize) -> Self {
        self.permits = Arc::new(Semaphore::new(max.max(1)));
        self
    }

    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    /// Match one scraped item for the media types its category implies.
    pub async fn match_item(&self, item: &ScrapedItem, category: Category) -> MatchResult {
        let normalized = normalize(&item.title);
        self.match_title(&item.title, &normalized, category.media_types())
            .await
    }

    /// Match and attach the enrichment, leaving the scraped fields untouched.
    pub async fn enrich(&self, item: ScrapedItem, category: Category) -> EnrichedItem {
        let result = self.match_item(&item, category).await;
        EnrichedItem::new(item, Enrichment::from_match(&result))
    }

    /// Match an already-normalized title across one or more media-type pools.
    ///
    /// Each pool is searched and scored independently; the best accepted
    /// result across pools wins.
    pub async fn match_title(
        &self,
        raw_title: &str,
        normalized: &NormalizedTitle,
        media_types: &[MediaType],
    ) -> MatchResult {
        if normalized.canonical.is_empty() {
            log::debug!("Skipping catalog lookup for blank title '{}'", raw_title);
            return MatchResult::none();
        }

        log::debug!(
            "Matching '{}' -> normalized '{}', year: {:?}",
            raw_title,
            normalized.canonical,
            normalized.extracted_year,
        );

        let searches = media_types
            .iter()
            .map(|&media_type| self.search_pool(&normalized.canonical, media_type));
        let pools = join_all(searches).await;

        // Pool winners are compared on raw scores; only the final pick is rounded.
        let mut best_accepted: Option<(Candidate, f64)> = None;
        let mut best_rejected = 0.0f64;

        for (media_type, pool) in media_types.iter().zip(pools) {
            let candidates = match pool {
                Ok(candidates) => candidates,
                Err(e) => {
                    log::warn!(
                        "Catalog search failed for '{}' ({}): {}",
                        normalized.canonical,
                        media_type,
                        e,
                    );
                    continue;
                }
            };

            let Some((candidate, score)) =
                best_in_pool(normalized, &candidates, self.reference_year)
            else {
                continue;
            };
            if !is_accepted(score) {
                best_rejected = best_rejected.max(score);
                continue;
            }
            if best_accepted.as_ref().is_none_or(|(best, best_score)| {
                compare_scored((candidate, score), (best, *best_score)) == Ordering::Greater
            }) {
                best_accepted = Some((candidate.clone(), score));
            }
        }

        match best_accepted {
            Some((candidate, score)) => {
                let result = MatchResult::accepted(candidate, round_confidence(score));
                if let Some(ref c) = result.candidate {
                    log::info!(
                        "Matched '{}' -> '{}' (id: {}, {}, confidence: {:.3})",
                        raw_title,
                        c.primary_title,
                        c.catalog_id,
                        c.media_type,
                        result.confidence,
                    );
                }
                result
            }
            None => {
                log::warn!(
                    "No confident match for '{}' (best score: {:.3})",
                    raw_title,
                    best_rejected,
                );
                MatchResult::rejected(best_rejected)
            }
        }
    }

    async fn search_pool(
        &self,
        query: &str,
        media_type: MediaType,
    ) -> Result<Vec<Candidate>, CatalogError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| CatalogError::Unavailable("query limiter closed".to_string()))?;

        let mut candidates =
            tokio::time::timeout(self.query_timeout, self.catalog.search(query, media_type))
                .await
                .map_err(|_| CatalogError::Timeout {
                    secs: self.query_timeout.as_secs(),
                })??;
        candidates.truncate(MAX_CANDIDATES_PER_QUERY);
        Ok(candidates)
    }
}
