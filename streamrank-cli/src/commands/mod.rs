pub(crate) mod all;
pub(crate) mod cache;
pub(crate) mod config;
pub(crate) mod match_title;
pub(crate) mod platforms;
pub(crate) mod top;

use std::sync::Arc;

use owo_colors::OwoColorize;

use streamrank_cache::{CacheStore, DiskCache, MemoryCache};
use streamrank_enrich::{Orchestrator, SnapshotSource};
use streamrank_tmdb::TmdbClient;

use crate::error::CliError;
use crate::logging::LOG_STREAM;
use crate::settings::{ENV_SNAPSHOT_DIR, Settings};

/// Wire the snapshot source, TMDB client, and cache into an orchestrator.
pub(crate) fn build_orchestrator(
    settings: Settings,
    memory_cache: bool,
) -> Result<Orchestrator, CliError> {
    let Some(snapshot_dir) = settings.snapshot_dir else {
        return Err(CliError::config(format!(
            "no snapshot directory; pass --snapshots, set {}, or add [sources] snapshot_dir to the config file",
            ENV_SNAPSHOT_DIR
        )));
    };
    log::debug!("Reading rankings from {}", snapshot_dir.display());

    let client = tmdb_client(settings.tmdb)?;

    let cache: Arc<dyn CacheStore> = if memory_cache {
        Arc::new(MemoryCache::new())
    } else {
        let disk = DiskCache::open_default()?;
        log::debug!("Caching results in {}", disk.root().display());
        Arc::new(disk)
    };

    Ok(Orchestrator::new(
        Arc::new(SnapshotSource::new(snapshot_dir)),
        Arc::new(client),
        cache,
        settings.enrich,
    ))
}

/// Build the TMDB client, warning when no API key is set.
pub(crate) fn tmdb_client(config: streamrank_tmdb::TmdbConfig) -> Result<TmdbClient, CliError> {
    let client = TmdbClient::new(config)?;
    if !client.is_configured() {
        log::warn!(
            "{} No TMDB API key configured; items will be returned unmatched",
            "\u{26A0}".if_supports_color(LOG_STREAM, |t| t.yellow()),
        );
        log::warn!("  Set TMDB_API_KEY or add [tmdb] api_key to the config file.");
    }
    Ok(client)
}

/// Print a JSON payload to stdout.
pub(crate) fn print_json(value: &impl serde::Serialize) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
