use std::sync::Arc;

use owo_colors::OwoColorize;

use streamrank_core::Category;
use streamrank_enrich::EnrichOptions;
use streamrank_match::{MatchEngine, normalize};
use streamrank_tmdb::TmdbConfig;

use super::{print_json, tmdb_client};
use crate::error::CliError;
use crate::logging::LOG_STREAM;
use crate::spinner::Spinner;

/// Match one title and explain what happened.
pub(crate) async fn run_match(
    tmdb: TmdbConfig,
    options: &EnrichOptions,
    title: &str,
    category: Category,
    quiet: bool,
) -> Result<(), CliError> {
    let normalized = normalize(title);
    log::info!(
        "  {} {}",
        "Normalized:".if_supports_color(LOG_STREAM, |t| t.cyan()),
        normalized.canonical,
    );
    match normalized.extracted_year {
        Some(year) => log::info!(
            "  {} {}",
            "Year:".if_supports_color(LOG_STREAM, |t| t.cyan()),
            year
        ),
        None => log::info!(
            "  {} {}",
            "Year:".if_supports_color(LOG_STREAM, |t| t.cyan()),
            "none".if_supports_color(LOG_STREAM, |t| t.dimmed()),
        ),
    }

    let client = tmdb_client(tmdb)?;
    let engine = MatchEngine::new(Arc::new(client), options.reference_year)
        .with_max_concurrent_queries(options.max_catalog_requests)
        .with_query_timeout(options.catalog_timeout);

    let spinner = Spinner::start(format!("Searching TMDB for '{}'...", title), quiet);
    let result = engine
        .match_title(title, &normalized, category.media_types())
        .await;
    spinner.finish();

    match &result.candidate {
        Some(candidate) => {
            log::info!(
                "{} {} [{} {}] {} (confidence {:.3})",
                "\u{2714}".if_supports_color(LOG_STREAM, |t| t.green()),
                candidate.primary_title.if_supports_color(LOG_STREAM, |t| t.bold()),
                candidate.media_type.as_str(),
                candidate.catalog_id,
                candidate
                    .release_year
                    .map(|y| y.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                result.confidence,
            );
        }
        None => {
            log::warn!(
                "{} No match for '{}' (best score {:.3})",
                "\u{2718}".if_supports_color(LOG_STREAM, |t| t.red()),
                title,
                result.confidence,
            );
        }
    }

    let candidate = result.candidate.as_ref();
    print_json(&serde_json::json!({
        "title": title,
        "normalized": normalized.canonical,
        "extracted_year": normalized.extracted_year,
        "matched": result.is_match(),
        "confidence": result.confidence,
        "tmdb_id": candidate.map(|c| c.catalog_id),
        "media_type": candidate.map(|c| c.media_type.as_str()),
        "year": candidate.and_then(|c| c.release_year),
        "poster_path": candidate.and_then(|c| c.poster_ref.as_deref()),
    }))
}
