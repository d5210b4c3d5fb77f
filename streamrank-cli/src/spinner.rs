//! Spinner shown on stderr while a fetch runs.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

pub(crate) struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    /// Start ticking with `msg`. When `quiet` is true the spinner is hidden.
    pub(crate) fn start(msg: impl Into<String>, quiet: bool) -> Self {
        let bar = ProgressBar::new_spinner();
        if quiet {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        let style = ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .expect("static pattern")
            .tick_chars("/-\\|");
        bar.set_style(style);
        bar.set_message(msg.into());
        bar.enable_steady_tick(std::time::Duration::from_millis(100));
        Self { bar }
    }

    /// Stop ticking and clear the line.
    pub(crate) fn finish(self) {
        self.bar.finish_and_clear();
    }
}
