use std::path::{Path, PathBuf};

use tokio::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_MIN_REQUEST_INTERVAL_MS: u64 = 25;

pub const ENV_API_KEY: &str = "TMDB_API_KEY";
pub const ENV_BASE_URL: &str = "TMDB_BASE_URL";

/// Where a configuration value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Hard-coded default value.
    Default,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// One resolved setting, for display by `config show`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    /// Dotted key as written in the config file, e.g. `tmdb.api_key`.
    pub key: &'static str,
    pub value: Option<String>,
    pub source: ValueSource,
    /// Secrets are masked when displayed.
    pub secret: bool,
}

impl ConfigEntry {
    pub fn display_value(&self) -> String {
        match (&self.value, self.secret) {
            (Some(v), true) => mask_secret(v),
            (Some(v), false) => v.clone(),
            (None, _) => "-".to_string(),
        }
    }
}

/// TOML config file format.
#[derive(Debug, Default, Clone, serde::Deserialize, serde::Serialize)]
pub struct ConfigFile {
    pub tmdb: Option<TmdbSection>,
    pub enrich: Option<EnrichSection>,
    pub sources: Option<SourcesSection>,
}

#[derive(Debug, Default, Clone, serde::Deserialize, serde::Serialize)]
pub struct TmdbSection {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub language: Option<String>,
    pub min_request_interval_ms: Option<u64>,
}

#[derive(Debug, Default, Clone, serde::Deserialize, serde::Serialize)]
pub struct EnrichSection {
    pub region: Option<String>,
    pub max_catalog_requests: Option<usize>,
    pub max_concurrent_scrapes: Option<usize>,
    pub item_workers: Option<usize>,
    pub catalog_timeout_secs: Option<u64>,
    pub scrape_timeout_secs: Option<u64>,
    pub cache_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Clone, serde::Deserialize, serde::Serialize)]
pub struct SourcesSection {
    pub snapshot_dir: Option<PathBuf>,
}

/// Return the path to the streamrank config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("streamrank").join("config.toml"))
}

/// Read and parse a config file. A missing file is not an error.
pub fn load_config_file(path: &Path) -> Result<Option<ConfigFile>, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(config))
}

/// Read an environment variable, treating empty values as unset.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Resolve a string setting: env var > config file > default.
pub fn resolve_string(
    env_var: Option<&'static str>,
    file_value: Option<&String>,
    default: Option<&str>,
    env: &dyn Fn(&str) -> Option<String>,
) -> (Option<String>, ValueSource) {
    if let Some(var) = env_var
        && let Some(value) = env(var)
    {
        return (Some(value), ValueSource::EnvVar(var));
    }
    if let Some(value) = file_value {
        return (Some(value.clone()), ValueSource::ConfigFile);
    }
    match default {
        Some(d) => (Some(d.to_string()), ValueSource::Default),
        None => (None, ValueSource::Missing),
    }
}

/// Resolve a setting that only the config file can override.
pub fn resolve_value<T: Copy>(file_value: Option<T>, default: T) -> (T, ValueSource) {
    match file_value {
        Some(v) => (v, ValueSource::ConfigFile),
        None => (default, ValueSource::Default),
    }
}

/// Mask a secret for display, keeping only the last four characters.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}

/// Settings for the TMDB client.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub language: String,
    pub min_request_interval: Duration,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            min_request_interval: Duration::from_millis(DEFAULT_MIN_REQUEST_INTERVAL_MS),
        }
    }
}

impl TmdbConfig {
    /// Load from the process environment and the default config file.
    ///
    /// Priority: env vars > config file > defaults. A missing API key is not
    /// an error here; the client reports it on first search.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path().ok_or(ConfigError::NoConfigDir)?;
        let file = load_config_file(&path)?;
        Ok(Self::resolve(file.as_ref(), &process_env))
    }

    pub fn resolve(file: Option<&ConfigFile>, env: &dyn Fn(&str) -> Option<String>) -> Self {
        let section = file.and_then(|f| f.tmdb.as_ref());

        let (api_key, _) = resolve_string(
            Some(ENV_API_KEY),
            section.and_then(|s| s.api_key.as_ref()),
            None,
            env,
        );
        let (base_url, _) = resolve_string(
            Some(ENV_BASE_URL),
            section.and_then(|s| s.base_url.as_ref()),
            Some(DEFAULT_BASE_URL),
            env,
        );
        let (language, _) = resolve_string(
            None,
            section.and_then(|s| s.language.as_ref()),
            Some(DEFAULT_LANGUAGE),
            env,
        );
        let (interval_ms, _) = resolve_value(
            section.and_then(|s| s.min_request_interval_ms),
            DEFAULT_MIN_REQUEST_INTERVAL_MS,
        );

        Self {
            api_key,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            language: language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            min_request_interval: Duration::from_millis(interval_ms),
        }
    }

    /// Describe each TMDB setting and where it came from.
    pub fn entries(
        file: Option<&ConfigFile>,
        env: &dyn Fn(&str) -> Option<String>,
    ) -> Vec<ConfigEntry> {
        let section = file.and_then(|f| f.tmdb.as_ref());

        let (api_key, api_key_source) = resolve_string(
            Some(ENV_API_KEY),
            section.and_then(|s| s.api_key.as_ref()),
            None,
            env,
        );
        let (base_url, base_url_source) = resolve_string(
            Some(ENV_BASE_URL),
            section.and_then(|s| s.base_url.as_ref()),
            Some(DEFAULT_BASE_URL),
            env,
        );
        let (language, language_source) = resolve_string(
            None,
            section.and_then(|s| s.language.as_ref()),
            Some(DEFAULT_LANGUAGE),
            env,
        );
        let (interval, interval_source) = resolve_value(
            section.and_then(|s| s.min_request_interval_ms),
            DEFAULT_MIN_REQUEST_INTERVAL_MS,
        );

        vec![
            ConfigEntry {
                key: "tmdb.api_key",
                value: api_key,
                source: api_key_source,
                secret: true,
            },
            ConfigEntry {
                key: "tmdb.base_url",
                value: base_url,
                source: base_url_source,
                secret: false,
            },
            ConfigEntry {
                key: "tmdb.language",
                value: language,
                source: language_source,
                secret: false,
            },
            ConfigEntry {
                key: "tmdb.min_request_interval_ms",
                value: Some(interval.to_string()),
                source: interval_source,
                secret: false,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn file() -> ConfigFile {
        toml::from_str(
            r#"
            [tmdb]
            api_key = "file-key-1234"
            language = "hi-IN"

            [enrich]
            region = "india"
            item_workers = 4
            "#,
        )
        .unwrap()
    }

    #[test]
    fn defaults_without_file_or_env() {
        let config = TmdbConfig::resolve(None, &no_env);
        assert_eq!(config.api_key, None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.language, "en-US");
        assert_eq!(config.min_request_interval, Duration::from_millis(25));
    }

    #[test]
    fn file_overrides_defaults() {
        let config = TmdbConfig::resolve(Some(&file()), &no_env);
        assert_eq!(config.api_key.as_deref(), Some("file-key-1234"));
        assert_eq!(config.language, "hi-IN");
    }

    #[test]
    fn env_overrides_file() {
        let env = |key: &str| match key {
            ENV_API_KEY => Some("env-key".to_string()),
            ENV_BASE_URL => Some("http://localhost:9999/".to_string()),
            _ => None,
        };
        let config = TmdbConfig::resolve(Some(&file()), &env);
        assert_eq!(config.api_key.as_deref(), Some("env-key"));
        assert_eq!(config.base_url, "http://localhost:9999");
    }

    #[test]
    fn entries_report_sources() {
        let env = |key: &str| (key == ENV_BASE_URL).then(|| "http://x".to_string());
        let entries = TmdbConfig::entries(Some(&file()), &env);
        let by_key = |k: &str| entries.iter().find(|e| e.key == k).unwrap();

        assert_eq!(by_key("tmdb.api_key").source, ValueSource::ConfigFile);
        assert_eq!(by_key("tmdb.api_key").display_value(), "*********1234");
        assert_eq!(by_key("tmdb.base_url").source, ValueSource::EnvVar(ENV_BASE_URL));
        assert_eq!(by_key("tmdb.min_request_interval_ms").source, ValueSource::Default);
    }

    #[test]
    fn missing_api_key_entry() {
        let entries = TmdbConfig::entries(None, &no_env);
        assert_eq!(entries[0].source, ValueSource::Missing);
        assert_eq!(entries[0].display_value(), "-");
    }

    #[test]
    fn masks_short_secrets_entirely() {
        assert_eq!(mask_secret("abc"), "***");
        assert_eq!(mask_secret("abcdefgh"), "****efgh");
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config_file(&dir.path().join("config.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[tmdb\napi_key = ").unwrap();
        assert!(matches!(
            load_config_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
