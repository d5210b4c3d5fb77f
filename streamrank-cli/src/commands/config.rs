use owo_colors::OwoColorize;

use streamrank_tmdb::config::process_env;

use crate::error::CliError;
use crate::logging::LOG_STREAM;
use crate::settings::{Settings, load_file};

/// Show current settings and where each one came from.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    let path = streamrank_tmdb::config_path();

    log::info!(
        "{}",
        "streamrank Configuration".if_supports_color(LOG_STREAM, |t| t.bold()),
    );
    log::info!("");

    match &path {
        Some(p) if p.exists() => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(LOG_STREAM, |t| t.cyan()),
                "(exists)".if_supports_color(LOG_STREAM, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(LOG_STREAM, |t| t.cyan()),
                "(not found)".if_supports_color(LOG_STREAM, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Config file: {}",
                "could not determine path".if_supports_color(LOG_STREAM, |t| t.red()),
            );
        }
    }
    log::info!("");

    let file = load_file()?;
    for entry in Settings::entries(file.as_ref(), &process_env) {
        let source_str = format!("({})", entry.source);
        match entry.value {
            Some(_) => {
                log::info!(
                    "  {} {} {}",
                    format!("{}:", entry.key).if_supports_color(LOG_STREAM, |t| t.cyan()),
                    entry.display_value(),
                    source_str.if_supports_color(LOG_STREAM, |t| t.dimmed()),
                );
            }
            None => {
                log::info!(
                    "  {} {} {}",
                    format!("{}:", entry.key).if_supports_color(LOG_STREAM, |t| t.cyan()),
                    "not set".if_supports_color(LOG_STREAM, |t| t.yellow()),
                    source_str.if_supports_color(LOG_STREAM, |t| t.dimmed()),
                );
            }
        }
    }
    Ok(())
}

/// Print the config file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    match streamrank_tmdb::config_path() {
        Some(path) => {
            println!("{}", path.display());
            Ok(())
        }
        None => Err(CliError::config("could not determine config directory")),
    }
}
