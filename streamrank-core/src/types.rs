use serde::{Deserialize, Serialize};

/// Minimum confidence required to attach catalog metadata to a scraped item.
pub const ACCEPTANCE_THRESHOLD: f64 = 0.6;

/// One row of a platform's top-10 table as scraped from the ranking site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedItem {
    /// Ranking position (1-based).
    pub rank: u32,
    /// Title exactly as displayed on the ranking page.
    pub title: String,
    /// Days-in-top-10 cell, kept verbatim (e.g. "12 d").
    pub days_in_top_10: String,
}

impl ScrapedItem {
    pub fn new(rank: u32, title: impl Into<String>, days_in_top_10: impl Into<String>) -> Self {
        Self {
            rank,
            title: title.into(),
            days_in_top_10: days_in_top_10.into(),
        }
    }

    /// Rows with a zero rank or a blank title are scrape artifacts.
    pub fn is_valid(&self) -> bool {
        self.rank > 0 && !self.title.trim().is_empty()
    }
}

/// Catalog media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    /// Path segment used by the catalog search endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog search hit, already validated at the adapter boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub catalog_id: u64,
    pub media_type: MediaType,
    pub primary_title: String,
    /// Title in the original language; equals `primary_title` for most
    /// English-language releases.
    pub original_title: String,
    pub release_year: Option<i32>,
    /// Vote count, used as a popularity signal.
    pub popularity_count: u64,
    pub poster_ref: Option<String>,
}

/// Outcome of matching one scraped title against a candidate pool.
///
/// `candidate` is only present when `confidence >= ACCEPTANCE_THRESHOLD`.
/// For a rejected match, `confidence` holds the best score seen and is only
/// meant for logging.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub candidate: Option<Candidate>,
    pub confidence: f64,
}

impl MatchResult {
    pub fn accepted(candidate: Candidate, confidence: f64) -> Self {
        Self {
            candidate: Some(candidate),
            confidence,
        }
    }

    pub fn rejected(best_score: f64) -> Self {
        Self {
            candidate: None,
            confidence: best_score,
        }
    }

    pub fn none() -> Self {
        Self::rejected(0.0)
    }

    pub fn is_match(&self) -> bool {
        self.candidate.is_some()
    }
}

/// Metadata attached to a scraped item after a confident match.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment {
    pub catalog_id: u64,
    pub media_type: MediaType,
    pub year: Option<i32>,
    pub match_confidence: f64,
    pub poster_ref: Option<String>,
}

impl Enrichment {
    /// Build the enrichment for an accepted match; `None` for a rejected one.
    pub fn from_match(result: &MatchResult) -> Option<Self> {
        let candidate = result.candidate.as_ref()?;
        Some(Self {
            catalog_id: candidate.catalog_id,
            media_type: candidate.media_type,
            year: candidate.release_year,
            match_confidence: result.confidence,
            poster_ref: candidate.poster_ref.clone(),
        })
    }
}

/// A scraped item plus its (optional) catalog enrichment.
///
/// Serializes flat, always emitting every key with `null` for missing
/// values so downstream consumers see a stable shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "EnrichedItemWire", try_from = "EnrichedItemWire")]
pub struct EnrichedItem {
    pub item: ScrapedItem,
    pub enrichment: Option<Enrichment>,
}

impl EnrichedItem {
    pub fn new(item: ScrapedItem, enrichment: Option<Enrichment>) -> Self {
        Self { item, enrichment }
    }

    pub fn unmatched(item: ScrapedItem) -> Self {
        Self::new(item, None)
    }

    pub fn rank(&self) -> u32 {
        self.item.rank
    }

    pub fn is_matched(&self) -> bool {
        self.enrichment.is_some()
    }
}

#[derive(Serialize, Deserialize)]
struct EnrichedItemWire {
    rank: u32,
    title: String,
    days_in_top_10: String,
    catalog_id: Option<u64>,
    media_type: Option<MediaType>,
    year: Option<i32>,
    match_confidence: Option<f64>,
    poster_ref: Option<String>,
}

/// A serialized item whose enrichment fields are only partly populated.
#[derive(Debug, thiserror::Error)]
#[error("item ranked {rank} has partially populated enrichment fields")]
pub struct PartialEnrichment {
    pub rank: u32,
}

impl From<EnrichedItem> for EnrichedItemWire {
    fn from(value: EnrichedItem) -> Self {
        let ScrapedItem {
            rank,
            title,
            days_in_top_10,
        } = value.item;
        match value.enrichment {
            Some(e) => Self {
                rank,
                title,
                days_in_top_10,
                catalog_id: Some(e.catalog_id),
                media_type: Some(e.media_type),
                year: e.year,
                match_confidence: Some(e.match_confidence),
                poster_ref: e.poster_ref,
            },
            None => Self {
                rank,
                title,
                days_in_top_10,
                catalog_id: None,
                media_type: None,
                year: None,
                match_confidence: None,
                poster_ref: None,
            },
        }
    }
}

impl TryFrom<EnrichedItemWire> for EnrichedItem {
    type Error = PartialEnrichment;

    fn try_from(wire: EnrichedItemWire) -> Result<Self, Self::Error> {
        let item = ScrapedItem {
            rank: wire.rank,
            title: wire.title,
            days_in_top_10: wire.days_in_top_10,
        };
        let enrichment = match (wire.catalog_id, wire.media_type, wire.match_confidence) {
            (Some(catalog_id), Some(media_type), Some(match_confidence))
                if match_confidence >= ACCEPTANCE_THRESHOLD =>
            {
                Some(Enrichment {
                    catalog_id,
                    media_type,
                    year: wire.year,
                    match_confidence,
                    poster_ref: wire.poster_ref,
                })
            }
            (None, None, None) if wire.year.is_none() && wire.poster_ref.is_none() => None,
            _ => return Err(PartialEnrichment { rank: item.rank }),
        };
        Ok(Self { item, enrichment })
    }
}
