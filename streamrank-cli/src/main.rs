//! streamrank CLI
//!
//! Command-line interface for enriching streaming top-10 rankings with
//! TMDB metadata.

mod cli_types;
mod commands;
mod error;
mod logging;
mod settings;
mod spinner;

use clap::Parser;

use cli_types::{CacheAction, Cli, Commands, ConfigAction};
use commands::all::run_all;
use commands::build_orchestrator;
use commands::cache::{run_cache_clear, run_cache_path};
use commands::config::{run_config_path, run_config_show};
use commands::match_title::run_match;
use commands::platforms::run_platforms;
use commands::top::run_top;
use error::CliError;
use settings::Settings;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.quiet, cli.verbose);

    if let Err(e) = run(cli).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let quiet = cli.quiet;

    match cli.command {
        Commands::Top { platform, category } => {
            let settings = Settings::load(cli.region, cli.snapshots)?;
            let orchestrator = build_orchestrator(settings, cli.memory_cache)?;
            run_top(&orchestrator, platform, category, quiet).await
        }
        Commands::All => {
            let settings = Settings::load(cli.region, cli.snapshots)?;
            let orchestrator = build_orchestrator(settings, cli.memory_cache)?;
            run_all(&orchestrator, quiet).await
        }
        Commands::Match { title, category } => {
            let settings = Settings::load(cli.region, cli.snapshots)?;
            run_match(settings.tmdb, &settings.enrich, &title, category, quiet).await
        }
        Commands::Platforms => {
            run_platforms();
            Ok(())
        }
        Commands::Cache { action } => match action {
            CacheAction::Clear => run_cache_clear().await,
            CacheAction::Path => run_cache_path(),
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => run_config_show(),
            ConfigAction::Path => run_config_path(),
        },
    }
}
