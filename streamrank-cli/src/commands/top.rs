use owo_colors::OwoColorize;

use streamrank_core::{Category, Platform};
use streamrank_enrich::{Orchestrator, SourceStatus};

use super::print_json;
use crate::error::CliError;
use crate::logging::LOG_STREAM;
use crate::spinner::Spinner;

/// Print the enriched ranking for one source.
pub(crate) async fn run_top(
    orchestrator: &Orchestrator,
    platform: Platform,
    category: Category,
    quiet: bool,
) -> Result<(), CliError> {
    let spinner = Spinner::start(
        format!("Fetching {} {}...", platform.display_name(), category.section_title()),
        quiet,
    );
    let result = orchestrator.get_enriched(platform, category).await;
    spinner.finish();
    let result = result?;

    match &result.status {
        SourceStatus::Available => {
            log::info!(
                "{} {} {}: {} items, {} matched{}",
                "\u{2714}".if_supports_color(LOG_STREAM, |t| t.green()),
                platform.display_name().if_supports_color(LOG_STREAM, |t| t.bold()),
                category.section_title(),
                result.items.len(),
                result.matched_count(),
                if result.from_cache {
                    format!(" {}", "(cached)".if_supports_color(LOG_STREAM, |t| t.dimmed()))
                } else {
                    String::new()
                },
            );
        }
        SourceStatus::Unavailable { reason } => {
            log::warn!(
                "{} {} {} unavailable: {}",
                "\u{2718}".if_supports_color(LOG_STREAM, |t| t.red()),
                platform.display_name().if_supports_color(LOG_STREAM, |t| t.bold()),
                category.section_title(),
                reason,
            );
        }
    }

    print_json(&result)
}
