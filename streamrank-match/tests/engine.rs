use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use streamrank_core::{
    Candidate, CatalogError, Category, MediaType, MetadataCatalog, ScrapedItem,
};
use streamrank_match::MatchEngine;
use tokio::time::Duration;

const NOW: i32 = 2025;

#[derive(Default)]
struct FakeCatalog {
    pools: HashMap<(String, MediaType), Vec<Candidate>>,
    fail_on: Vec<MediaType>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl FakeCatalog {
    fn with(mut self, query: &str, media_type: MediaType, candidates: Vec<Candidate>) -> Self {
        self.pools.insert((query.to_string(), media_type), candidates);
        self
    }

    fn failing(mut self, media_type: MediaType) -> Self {
        self.fail_on.push(media_type);
        self
    }

    fn slow(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl MetadataCatalog for FakeCatalog {
    async fn search(
        &self,
        query: &str,
        media_type: MediaType,
    ) -> Result<Vec<Candidate>, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        if self.fail_on.contains(&media_type) {
            return Err(CatalogError::Unavailable("down".to_string()));
        }
        Ok(self
            .pools
            .get(&(query.to_string(), media_type))
            .cloned()
            .unwrap_or_default())
    }
}

fn candidate(
    id: u64,
    media_type: MediaType,
    title: &str,
    year: Option<i32>,
    votes: u64,
) -> Candidate {
    Candidate {
        catalog_id: id,
        media_type,
        primary_title: title.to_string(),
        original_title: title.to_string(),
        release_year: year,
        popularity_count: votes,
        poster_ref: Some(format!("/{id}.jpg")),
    }
}

fn engine(catalog: FakeCatalog) -> MatchEngine {
    MatchEngine::new(Arc::new(catalog), NOW)
}

#[tokio::test]
async fn exact_title_with_explicit_year_scores_one() {
    let catalog = FakeCatalog::default().with(
        "the shawshank redemption",
        MediaType::Movie,
        vec![candidate(
            278,
            MediaType::Movie,
            "The Shawshank Redemption",
            Some(1994),
            25000,
        )],
    );
    let item = ScrapedItem::new(1, "The Shawshank Redemption (1994)", "3 d");
    let result = engine(catalog).match_item(&item, Category::Movies).await;

    let c = result.candidate.expect("should match");
    assert_eq!(c.catalog_id, 278);
    assert_eq!(c.media_type, MediaType::Movie);
    assert_eq!(result.confidence, 1.0);
}

#[tokio::test]
async fn unrelated_candidates_leave_item_unmatched() {
    let catalog = FakeCatalog::default().with(
        "unknown movie",
        MediaType::Movie,
        vec![candidate(9, MediaType::Movie, "Zzyzx Road", Some(1960), 3)],
    );
    let item = ScrapedItem::new(4, "Unknown Movie", "1 d");
    let enriched = engine(catalog).enrich(item.clone(), Category::Movies).await;

    assert!(!enriched.is_matched());
    assert_eq!(enriched.item, item);
}

#[tokio::test]
async fn catalog_failure_degrades_to_no_match() {
    let catalog = FakeCatalog::default().failing(MediaType::Movie);
    let item = ScrapedItem::new(1, "Jawan", "12 d");
    let result = engine(catalog).match_item(&item, Category::Movies).await;
    assert!(!result.is_match());
}

#[tokio::test]
async fn tv_category_only_searches_tv_pool() {
    let catalog = FakeCatalog::default()
        .with(
            "panchayat",
            MediaType::Movie,
            vec![candidate(1, MediaType::Movie, "Panchayat", Some(NOW), 5000)],
        )
        .with(
            "panchayat",
            MediaType::Tv,
            vec![candidate(2, MediaType::Tv, "Panchayat", Some(2020), 800)],
        );
    let item = ScrapedItem::new(1, "Panchayat: Season 4", "5 d");
    let result = engine(catalog).match_item(&item, Category::TvShows).await;
    assert_eq!(result.candidate.map(|c| c.catalog_id), Some(2));
}

#[tokio::test]
async fn overall_picks_best_across_pools() {
    let catalog = FakeCatalog::default()
        .with(
            "mirzapur",
            MediaType::Movie,
            vec![candidate(10, MediaType::Movie, "Mirzapur", Some(1999), 0)],
        )
        .with(
            "mirzapur",
            MediaType::Tv,
            vec![candidate(20, MediaType::Tv, "Mirzapur", Some(NOW - 1), 2000)],
        );
    let item = ScrapedItem::new(2, "Mirzapur Season 3", "8 d");
    let result = engine(catalog).match_item(&item, Category::Overall).await;

    let c = result.candidate.expect("should match");
    assert_eq!(c.catalog_id, 20);
    assert_eq!(c.media_type, MediaType::Tv);
}

#[tokio::test]
async fn overall_near_tie_goes_to_higher_raw_score() {
    // movie: 14/23 * 0.7 + 0.58 * 0.3 = 0.60009
    // tv:    14/35 * 0.7 + 0.9 * 0.3 + 0.05 = 0.6
    // Both round to 0.600; the more popular tv candidate must not win on votes.
    let catalog = FakeCatalog::default()
        .with(
            "abcdefghij",
            MediaType::Movie,
            vec![candidate(1, MediaType::Movie, "abcdefgxyzuvw", Some(2009), 10)],
        )
        .with(
            "abcdefghij",
            MediaType::Tv,
            vec![candidate(
                2,
                MediaType::Tv,
                "abcdefgxyzuvwxyzuvwxyzuvw",
                Some(2022),
                5000,
            )],
        );
    let item = ScrapedItem::new(1, "abcdefghij", "1 d");
    let result = engine(catalog).match_item(&item, Category::Overall).await;

    let c = result.candidate.expect("should match");
    assert_eq!(c.media_type, MediaType::Movie);
    assert_eq!(c.catalog_id, 1);
    assert_eq!(result.confidence, 0.6);
}

#[tokio::test(start_paused = true)]
async fn concurrent_queries_respect_limit() {
    let catalog = Arc::new(FakeCatalog::default().slow(Duration::from_millis(50)));
    let engine = MatchEngine::new(catalog.clone(), NOW).with_max_concurrent_queries(3);

    let items: Vec<ScrapedItem> = (1..=8)
        .map(|rank| ScrapedItem::new(rank, format!("Show {rank}"), "1 d"))
        .collect();
    let matches = items
        .iter()
        .map(|item| engine.match_item(item, Category::Overall));
    futures::future::join_all(matches).await;

    assert_eq!(catalog.calls.load(Ordering::SeqCst), 16);
    assert_eq!(catalog.peak.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn overall_survives_one_failing_pool() {
    let catalog = FakeCatalog::default()
        .failing(MediaType::Tv)
        .with(
            "stree 2",
            MediaType::Movie,
            vec![candidate(5, MediaType::Movie, "Stree 2", Some(NOW - 1), 1500)],
        );
    let item = ScrapedItem::new(1, "Stree 2", "20 d");
    let result = engine(catalog).match_item(&item, Category::Overall).await;
    assert_eq!(result.candidate.map(|c| c.catalog_id), Some(5));
}

#[tokio::test]
async fn only_top_ten_results_are_scored() {
    let mut pool: Vec<Candidate> = (1..=10)
        .map(|i| candidate(i, MediaType::Movie, "Something Else Entirely", None, 0))
        .collect();
    pool.push(candidate(99, MediaType::Movie, "Devara", Some(NOW), 5000));

    let catalog = FakeCatalog::default().with("devara", MediaType::Movie, pool);
    let item = ScrapedItem::new(1, "Devara", "4 d");
    let result = engine(catalog).match_item(&item, Category::Movies).await;
    assert!(!result.is_match());
}

#[tokio::test]
async fn blank_title_skips_catalog() {
    let catalog = Arc::new(FakeCatalog::default());
    let engine = MatchEngine::new(catalog.clone(), NOW);
    let item = ScrapedItem::new(1, "(2024) !!", "1 d");
    let result = engine.match_item(&item, Category::Overall).await;

    assert!(!result.is_match());
    assert_eq!(catalog.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn enrichment_copies_candidate_metadata() {
    let catalog = FakeCatalog::default().with(
        "jawan",
        MediaType::Movie,
        vec![candidate(872906, MediaType::Movie, "Jawan", Some(2023), 1200)],
    );
    let item = ScrapedItem::new(1, "Jawan (2023)", "12 d");
    let enriched = engine(catalog).enrich(item, Category::Movies).await;

    let e = enriched.enrichment.expect("should be enriched");
    assert_eq!(e.catalog_id, 872906);
    assert_eq!(e.year, Some(2023));
    assert_eq!(e.poster_ref.as_deref(), Some("/872906.jpg"));
    assert!(e.match_confidence >= 0.6 && e.match_confidence <= 1.0);
}

#[tokio::test(start_paused = true)]
async fn slow_catalog_times_out_to_no_match() {
    let catalog = FakeCatalog::default()
        .slow(Duration::from_secs(60))
        .with(
            "jawan",
            MediaType::Movie,
            vec![candidate(1, MediaType::Movie, "Jawan", Some(2023), 1200)],
        );
    let engine = engine(catalog).with_query_timeout(Duration::from_secs(1));
    let item = ScrapedItem::new(1, "Jawan", "12 d");
    let result = engine.match_item(&item, Category::Movies).await;
    assert!(!result.is_match());
}
