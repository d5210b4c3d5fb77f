use std::sync::Arc;

use async_trait::async_trait;
use streamrank_core::{Candidate, CatalogError, MediaType, MetadataCatalog};
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

use crate::config::TmdbConfig;
use crate::error::TmdbError;
use crate::types::SearchResponse;

pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the TMDB search API with request spacing.
///
/// Cheap to clone; clones share the HTTP connection pool and the
/// rate-limit clock.
#[derive(Clone)]
pub struct TmdbClient {
    http: reqwest::Client,
    config: TmdbConfig,
    last_request: Arc<Mutex<Instant>>,
}

impl TmdbClient {
    pub fn new(config: TmdbConfig) -> Result<Self, TmdbError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("streamrank/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let last_request = Instant::now()
            .checked_sub(config.min_request_interval)
            .unwrap_or_else(Instant::now);

        Ok(Self {
            http,
            config,
            last_request: Arc::new(Mutex::new(last_request)),
        })
    }

    pub fn config(&self) -> &TmdbConfig {
        &self.config
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Search one media type.
    ///
    /// Results keep TMDB's relevance order; hits without an id or title are
    /// dropped.
    pub async fn search_titles(
        &self,
        query: &str,
        media_type: MediaType,
    ) -> Result<Vec<Candidate>, TmdbError> {
        let api_key = self.config.api_key.as_deref().ok_or(TmdbError::NotConfigured)?;

        self.rate_limit().await;

        let resp = self
            .http
            .get(format!("{}/search/{}", self.config.base_url, media_type.as_str()))
            .query(&[
                ("api_key", api_key),
                ("query", query),
                ("language", self.config.language.as_str()),
                ("page", "1"),
                ("include_adult", "false"),
            ])
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(TmdbError::InvalidApiKey {
                status: status.as_u16(),
            });
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TmdbError::RateLimit);
        }

        let text = resp.text().await?;
        if !status.is_success() {
            return Err(TmdbError::ServerError {
                status: status.as_u16(),
                message: truncate(&text, 200).to_string(),
            });
        }

        let response: SearchResponse = serde_json::from_str(&text)?;
        let total = response.results.len();
        let candidates: Vec<Candidate> = response
            .results
            .into_iter()
            .filter_map(|r| r.into_candidate(media_type))
            .collect();

        if candidates.len() < total {
            log::debug!(
                "Dropped {} incomplete TMDB results for '{}'",
                total - candidates.len(),
                query,
            );
        }
        log::debug!(
            "TMDB {} search '{}': {} candidates",
            media_type,
            query,
            candidates.len(),
        );
        Ok(candidates)
    }

    /// Wait until at least the configured interval has passed since the
    /// last API request.
    async fn rate_limit(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();
        if elapsed < self.config.min_request_interval {
            tokio::time::sleep(self.config.min_request_interval - elapsed).await;
        }
        *last = Instant::now();
    }
}

#[async_trait]
impl MetadataCatalog for TmdbClient {
    async fn search(
        &self,
        query: &str,
        media_type: MediaType,
    ) -> Result<Vec<Candidate>, CatalogError> {
        self.search_titles(query, media_type).await.map_err(|e| {
            if matches!(e, TmdbError::NotConfigured) {
                log::warn!("TMDB API key not configured");
            } else {
                log::error!("TMDB search failed for '{}': {}", query, e);
            }
            CatalogError::from(e)
        })
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn requests_are_spaced_by_min_interval() {
        let config = TmdbConfig {
            min_request_interval: Duration::from_millis(250),
            ..TmdbConfig::default()
        };
        let client = TmdbClient::new(config).unwrap();

        let start = Instant::now();
        client.rate_limit().await;
        client.rate_limit().await;
        client.rate_limit().await;
        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("abc", 10), "abc");
    }
}
