use std::path::PathBuf;

use streamrank_core::CatalogError;

/// Errors talking to the TMDB API.
#[derive(Debug, thiserror::Error)]
pub enum TmdbError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TMDB API key not configured")]
    NotConfigured,

    #[error("Invalid API key (HTTP {status})")]
    InvalidApiKey { status: u16 },

    #[error("Rate limited by TMDB API")]
    RateLimit,

    #[error("Server error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors reading the streamrank config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl From<TmdbError> for CatalogError {
    fn from(err: TmdbError) -> Self {
        match err {
            TmdbError::Http(e) if e.is_timeout() => CatalogError::Timeout {
                secs: crate::client::REQUEST_TIMEOUT.as_secs(),
            },
            TmdbError::Http(e) => CatalogError::unreachable(e.to_string()),
            TmdbError::NotConfigured => CatalogError::NotConfigured,
            TmdbError::InvalidApiKey { status } => CatalogError::Status {
                status,
                message: "invalid API key".to_string(),
            },
            TmdbError::RateLimit => CatalogError::RateLimited,
            TmdbError::ServerError { status, message } => CatalogError::Status { status, message },
            TmdbError::Json(e) => CatalogError::malformed(e.to_string()),
            TmdbError::Config(e) => CatalogError::Unavailable(e.to_string()),
        }
    }
}
