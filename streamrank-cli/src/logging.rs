use std::io::Write;

use log::LevelFilter;
use owo_colors::Stream;

/// Stream the logger writes to. Status-line colors are checked against it.
pub(crate) const LOG_STREAM: Stream = Stream::Stderr;

/// Level selected by the global flags. `--quiet` wins over `--verbose`.
pub(crate) fn level_for(quiet: bool, verbose: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger.
///
/// Normal output is printed bare, since `info!` lines are the CLI's user
/// facing output. Verbose mode adds timestamps, levels, and module paths.
/// `RUST_LOG`, when set, overrides the level chosen by the flags.
pub(crate) fn init(quiet: bool, verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_for(quiet, verbose))
        .target(env_logger::Target::Stderr);

    if verbose {
        builder.format_timestamp_millis().format_module_path(true);
    } else {
        builder.format(|buf, record| {
            if record.level() <= log::Level::Warn {
                writeln!(buf, "{}: {}", record.level(), record.args())
            } else {
                writeln!(buf, "{}", record.args())
            }
        });
    }

    builder.parse_env(env_logger::Env::default().filter("RUST_LOG"));
    builder.init();
}
