//! TMDB-backed metadata catalog for streamrank.
//!
//! Provides [`TmdbClient`], an implementation of
//! [`streamrank_core::MetadataCatalog`] over the TMDB v3 search API, and the
//! layered configuration (environment > config file > defaults) shared by
//! the rest of the workspace.

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::TmdbClient;
pub use config::{
    ConfigEntry, ConfigFile, EnrichSection, SourcesSection, TmdbConfig, TmdbSection, ValueSource,
    config_path, load_config_file, mask_secret,
};
pub use error::{ConfigError, TmdbError};
