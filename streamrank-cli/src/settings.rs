//! Runtime settings resolved from env vars, the config file, and defaults.

use std::path::PathBuf;

use streamrank_enrich::EnrichOptions;
use streamrank_enrich::options::DEFAULT_REGION;
use streamrank_tmdb::config::{process_env, resolve_string, resolve_value};
use streamrank_tmdb::{ConfigEntry, ConfigFile, TmdbConfig, ValueSource};
use tokio::time::Duration;

use crate::error::CliError;

pub(crate) const ENV_REGION: &str = "STREAMRANK_REGION";
pub(crate) const ENV_SNAPSHOT_DIR: &str = "STREAMRANK_SNAPSHOT_DIR";

pub(crate) struct Settings {
    pub tmdb: TmdbConfig,
    pub enrich: EnrichOptions,
    pub snapshot_dir: Option<PathBuf>,
}

/// Load the config file at the default path, if there is one.
pub(crate) fn load_file() -> Result<Option<ConfigFile>, CliError> {
    match streamrank_tmdb::config_path() {
        Some(path) => Ok(streamrank_tmdb::load_config_file(&path)?),
        None => Ok(None),
    }
}

impl Settings {
    /// Load from the process environment and default config file, then
    /// apply command-line overrides.
    pub(crate) fn load(
        region: Option<String>,
        snapshots: Option<PathBuf>,
    ) -> Result<Self, CliError> {
        let file = load_file()?;
        let mut settings = Self::resolve(file.as_ref(), &process_env);
        if let Some(region) = region {
            settings.enrich.region = region;
        }
        if snapshots.is_some() {
            settings.snapshot_dir = snapshots;
        }
        if settings.enrich.region.trim().is_empty() {
            return Err(CliError::config("region must not be empty"));
        }
        Ok(settings)
    }

    pub(crate) fn resolve(
        file: Option<&ConfigFile>,
        env: &dyn Fn(&str) -> Option<String>,
    ) -> Self {
        let enrich = file.and_then(|f| f.enrich.as_ref());
        let sources = file.and_then(|f| f.sources.as_ref());
        let defaults = EnrichOptions::default();

        let (region, _) = resolve_string(
            Some(ENV_REGION),
            enrich.and_then(|e| e.region.as_ref()),
            Some(DEFAULT_REGION),
            env,
        );
        let snapshot_dir = env(ENV_SNAPSHOT_DIR)
            .map(PathBuf::from)
            .or_else(|| sources.and_then(|s| s.snapshot_dir.clone()));

        let secs = |v: Option<u64>, d: Duration| {
            v.map(Duration::from_secs).unwrap_or(d)
        };

        let options = EnrichOptions {
            region: region.unwrap_or_else(|| DEFAULT_REGION.to_string()),
            max_catalog_requests: enrich
                .and_then(|e| e.max_catalog_requests)
                .unwrap_or(defaults.max_catalog_requests),
            max_concurrent_scrapes: enrich
                .and_then(|e| e.max_concurrent_scrapes)
                .unwrap_or(defaults.max_concurrent_scrapes),
            item_workers: enrich
                .and_then(|e| e.item_workers)
                .unwrap_or(defaults.item_workers),
            catalog_timeout: secs(
                enrich.and_then(|e| e.catalog_timeout_secs),
                defaults.catalog_timeout,
            ),
            scrape_timeout: secs(
                enrich.and_then(|e| e.scrape_timeout_secs),
                defaults.scrape_timeout,
            ),
            cache_timeout: secs(
                enrich.and_then(|e| e.cache_timeout_secs),
                defaults.cache_timeout,
            ),
            ..defaults
        };

        Self {
            tmdb: TmdbConfig::resolve(file, env),
            enrich: options,
            snapshot_dir,
        }
    }

    /// Every setting with its source, for `config show`.
    pub(crate) fn entries(
        file: Option<&ConfigFile>,
        env: &dyn Fn(&str) -> Option<String>,
    ) -> Vec<ConfigEntry> {
        let enrich = file.and_then(|f| f.enrich.as_ref());
        let sources = file.and_then(|f| f.sources.as_ref());
        let defaults = EnrichOptions::default();

        let mut entries = TmdbConfig::entries(file, env);

        let (region, region_source) = resolve_string(
            Some(ENV_REGION),
            enrich.and_then(|e| e.region.as_ref()),
            Some(DEFAULT_REGION),
            env,
        );
        entries.push(ConfigEntry {
            key: "enrich.region",
            value: region,
            source: region_source,
            secret: false,
        });

        let numeric: [(&'static str, Option<u64>, u64); 6] = [
            (
                "enrich.max_catalog_requests",
                enrich.and_then(|e| e.max_catalog_requests).map(|v| v as u64),
                defaults.max_catalog_requests as u64,
            ),
            (
                "enrich.max_concurrent_scrapes",
                enrich.and_then(|e| e.max_concurrent_scrapes).map(|v| v as u64),
                defaults.max_concurrent_scrapes as u64,
            ),
            (
                "enrich.item_workers",
                enrich.and_then(|e| e.item_workers).map(|v| v as u64),
                defaults.item_workers as u64,
            ),
            (
                "enrich.catalog_timeout_secs",
                enrich.and_then(|e| e.catalog_timeout_secs),
                defaults.catalog_timeout.as_secs(),
            ),
            (
                "enrich.scrape_timeout_secs",
                enrich.and_then(|e| e.scrape_timeout_secs),
                defaults.scrape_timeout.as_secs(),
            ),
            (
                "enrich.cache_timeout_secs",
                enrich.and_then(|e| e.cache_timeout_secs),
                defaults.cache_timeout.as_secs(),
            ),
        ];
        for (key, file_value, default) in numeric {
            let (value, source) = resolve_value(file_value, default);
            entries.push(ConfigEntry {
                key,
                value: Some(value.to_string()),
                source,
                secret: false,
            });
        }

        let (snapshot_dir, snapshot_source) = match env(ENV_SNAPSHOT_DIR) {
            Some(dir) => (Some(dir), ValueSource::EnvVar(ENV_SNAPSHOT_DIR)),
            None => match sources.and_then(|s| s.snapshot_dir.as_ref()) {
                Some(dir) => (Some(dir.display().to_string()), ValueSource::ConfigFile),
                None => (None, ValueSource::Missing),
            },
        };
        entries.push(ConfigEntry {
            key: "sources.snapshot_dir",
            value: snapshot_dir,
            source: snapshot_source,
            secret: false,
        });

        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamrank_tmdb::{EnrichSection, SourcesSection};

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn file() -> ConfigFile {
        ConfigFile {
            enrich: Some(EnrichSection {
                region: Some("brazil".to_string()),
                item_workers: Some(3),
                scrape_timeout_secs: Some(5),
                ..Default::default()
            }),
            sources: Some(SourcesSection {
                snapshot_dir: Some(PathBuf::from("/var/lib/streamrank")),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn defaults() {
        let settings = Settings::resolve(None, &no_env);
        assert_eq!(settings.enrich.region, "india");
        assert_eq!(settings.enrich.item_workers, 10);
        assert_eq!(settings.enrich.max_catalog_requests, 8);
        assert_eq!(settings.enrich.max_concurrent_scrapes, 2);
        assert_eq!(settings.enrich.scrape_timeout, Duration::from_secs(30));
        assert!(settings.snapshot_dir.is_none());
    }

    #[test]
    fn file_values_apply() {
        let settings = Settings::resolve(Some(&file()), &no_env);
        assert_eq!(settings.enrich.region, "brazil");
        assert_eq!(settings.enrich.item_workers, 3);
        assert_eq!(settings.enrich.scrape_timeout, Duration::from_secs(5));
        assert_eq!(settings.enrich.catalog_timeout, Duration::from_secs(10));
        assert_eq!(
            settings.snapshot_dir,
            Some(PathBuf::from("/var/lib/streamrank"))
        );
    }

    #[test]
    fn env_beats_file() {
        let env = |key: &str| match key {
            ENV_REGION => Some("india".to_string()),
            ENV_SNAPSHOT_DIR => Some("/tmp/snaps".to_string()),
            _ => None,
        };
        let settings = Settings::resolve(Some(&file()), &env);
        assert_eq!(settings.enrich.region, "india");
        assert_eq!(settings.snapshot_dir, Some(PathBuf::from("/tmp/snaps")));
    }

    #[test]
    fn entries_cover_every_section() {
        let entries = Settings::entries(Some(&file()), &no_env);
        let find = |k: &str| entries.iter().find(|e| e.key == k).unwrap();

        assert_eq!(find("tmdb.api_key").source, ValueSource::Missing);
        assert_eq!(find("enrich.region").source, ValueSource::ConfigFile);
        assert_eq!(find("enrich.item_workers").value.as_deref(), Some("3"));
        assert_eq!(find("enrich.cache_timeout_secs").source, ValueSource::Default);
        assert_eq!(find("sources.snapshot_dir").source, ValueSource::ConfigFile);
    }
}
