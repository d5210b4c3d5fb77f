//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use streamrank_core::{Category, Platform};

#[derive(Parser)]
#[command(name = "streamrank")]
#[command(
    about = "Enrich streaming top-10 rankings with TMDB metadata",
    long_about = None
)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory of ranking snapshots (<dir>/<platform>/<category>.json)
    #[arg(long, global = true)]
    pub snapshots: Option<PathBuf>,

    /// Keep cached results in memory only (nothing written to disk)
    #[arg(long, global = true)]
    pub memory_cache: bool,

    /// Region used to prefix cache keys (default: india)
    #[arg(long, global = true)]
    pub region: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Print the enriched ranking for one platform and category as JSON
    Top {
        /// Platform name or alias (e.g., netflix, prime, apple-tv)
        platform: Platform,

        /// Ranking category (movies, tv-shows, overall)
        category: Category,
    },

    /// Print every ranking plus an availability summary as JSON
    All,

    /// Match a single title against TMDB and explain the result
    Match {
        /// Title as it appears on a ranking page
        title: String,

        /// Category deciding which media types are searched
        #[arg(short, long, default_value = "overall")]
        category: Category,
    },

    /// List supported platforms and their categories
    Platforms,

    /// Manage cached results
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum CacheAction {
    /// Remove all cached results
    Clear,

    /// Print the cache directory
    Path,
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current settings and their sources
    Show,

    /// Print the config file path
    Path,
}
