use owo_colors::OwoColorize;

use streamrank_core::Platform;

use crate::logging::LOG_STREAM;

pub(crate) fn run_platforms() {
    log::info!("Supported platforms:");
    log::info!("");

    for platform in Platform::all() {
        let categories: Vec<&str> = platform.categories().iter().map(|c| c.slug()).collect();
        log::info!(
            "  {} [{}]",
            platform.slug().if_supports_color(LOG_STREAM, |t| t.bold()),
            platform.display_name().if_supports_color(LOG_STREAM, |t| t.cyan()),
        );
        log::info!("    Categories: {}", categories.join(", "));
        if !platform.aliases().is_empty() {
            log::info!("    Aliases: {}", platform.aliases().join(", "));
        }
    }
}
