use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    #[error(transparent)]
    ConfigFile(#[from] streamrank_tmdb::ConfigError),

    #[error("TMDB error: {0}")]
    Tmdb(#[from] streamrank_tmdb::TmdbError),

    #[error("Cache error: {0}")]
    Cache(#[from] streamrank_cache::CacheError),

    #[error(transparent)]
    Enrich(#[from] streamrank_enrich::EnrichError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
