//! Terminal progress bar for a running transcode.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use hardsub_core::ProgressSink;

const BAR_TEMPLATE: &str = "{msg} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len}s";

/// Draws transcode progress on stderr, in seconds of output written.
pub struct BarSink {
    bar: ProgressBar,
}

impl BarSink {
    /// Creates a hidden bar. Nothing is drawn until `start` is called.
    pub fn new() -> Self {
        let style = ProgressStyle::with_template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let bar = ProgressBar::hidden();
        bar.set_style(style);
        bar.set_message("Processing video...");
        Self { bar }
    }
}

impl Default for BarSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for BarSink {
    fn start(&self, total_secs: u64) {
        self.bar.set_length(total_secs);
        self.bar.set_position(0);
        self.bar.set_draw_target(ProgressDrawTarget::stderr());
    }

    fn set_position(&self, secs: u64) {
        self.bar.set_position(secs);
    }

    fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}
