use serde::Deserialize;
use streamrank_core::{Candidate, MediaType};

/// Body of `GET /search/{movie|tv}`.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<SearchResult>,
    #[serde(default)]
    pub total_results: u64,
}

/// One search hit. Movie and TV results share this shape: movies carry
/// `title`/`original_title`/`release_date`, shows carry
/// `name`/`original_name`/`first_air_date`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResult {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub original_title: Option<String>,
    pub original_name: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub vote_count: Option<u64>,
    pub poster_path: Option<String>,
}

impl SearchResult {
    /// Convert into a validated [`Candidate`].
    ///
    /// Returns `None` for results without an id or without any title.
    pub fn into_candidate(self, media_type: MediaType) -> Option<Candidate> {
        let catalog_id = self.id?;
        let primary_title = non_empty(self.title).or_else(|| non_empty(self.name));
        let original_title =
            non_empty(self.original_title).or_else(|| non_empty(self.original_name));

        let (primary_title, original_title) = match (primary_title, original_title) {
            (Some(p), Some(o)) => (p, o),
            (Some(p), None) => (p.clone(), p),
            (None, Some(o)) => (o.clone(), o),
            (None, None) => return None,
        };

        let date = self.release_date.or(self.first_air_date);

        Some(Candidate {
            catalog_id,
            media_type,
            primary_title,
            original_title,
            release_year: date.as_deref().and_then(parse_year),
            popularity_count: self.vote_count.unwrap_or(0),
            poster_ref: non_empty(self.poster_path),
        })
    }
}

/// Year from an ISO-like date string (`"2023-09-07"`, `"2023"`).
///
/// The first four characters must all be ASCII digits.
pub fn parse_year(date: &str) -> Option<i32> {
    let head = date.get(..4)?;
    if !head.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    head.parse().ok()
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}
