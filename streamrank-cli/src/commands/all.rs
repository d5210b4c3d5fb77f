use owo_colors::OwoColorize;

use streamrank_enrich::{FetchAllResponse, Orchestrator};

use super::print_json;
use crate::error::CliError;
use crate::logging::LOG_STREAM;
use crate::spinner::Spinner;

/// Print every ranking plus the availability summary.
pub(crate) async fn run_all(orchestrator: &Orchestrator, quiet: bool) -> Result<(), CliError> {
    let spinner = Spinner::start("Fetching all rankings...", quiet);
    let response = orchestrator.get_all().await;
    spinner.finish();

    log_summary(&response);
    print_json(&response)
}

fn log_summary(response: &FetchAllResponse) {
    let summary = &response.summary;

    for (platform, categories) in &summary.platforms {
        for (category, status) in categories {
            if status.available {
                log::info!(
                    "  {} {} [{}] ({} items)",
                    "\u{2714}".if_supports_color(LOG_STREAM, |t| t.green()),
                    platform.if_supports_color(LOG_STREAM, |t| t.bold()),
                    category.if_supports_color(LOG_STREAM, |t| t.cyan()),
                    status.count,
                );
            } else {
                log::warn!(
                    "  {} {} [{}]: {}",
                    "\u{2718}".if_supports_color(LOG_STREAM, |t| t.red()),
                    platform.if_supports_color(LOG_STREAM, |t| t.bold()),
                    category,
                    status.status,
                );
            }
        }
    }

    log::info!(
        "Sources: {}/{} available, platforms: {}/{}, cache hits: {} ({:.0}%)",
        summary.successful_requests,
        summary.total_requests,
        summary.successful_platforms,
        summary.total_platforms,
        summary.cache_hits,
        summary.cache_hit_ratio * 100.0,
    );
}
