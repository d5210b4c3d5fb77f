use owo_colors::OwoColorize;

use streamrank_cache::DiskCache;

use crate::error::CliError;
use crate::logging::LOG_STREAM;

pub(crate) fn format_bytes(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Clear the on-disk result cache.
pub(crate) async fn run_cache_clear() -> Result<(), CliError> {
    let cache = DiskCache::open_default()?;
    match cache.clear().await {
        Ok(freed) => {
            log::info!(
                "{} Cache cleared ({} freed)",
                "\u{2714}".if_supports_color(LOG_STREAM, |t| t.green()),
                format_bytes(freed),
            );
        }
        Err(e) => {
            log::warn!(
                "{} Error clearing cache: {}",
                "\u{2718}".if_supports_color(LOG_STREAM, |t| t.red()),
                e,
            );
        }
    }
    Ok(())
}

/// Print the cache directory.
pub(crate) fn run_cache_path() -> Result<(), CliError> {
    let dir = streamrank_cache::cache_dir()?;
    println!("{}", dir.display());
    Ok(())
}
