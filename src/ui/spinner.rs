//! Progress spinners.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

use crate::steps::ProgressSink;

use super::theme::TuneupTheme;
use super::SpinnerHandle;

/// Longest status text shown on a spinner line.
const MAX_STATUS_WIDTH: usize = 72;

/// A progress spinner for long-running actions.
pub struct ProgressSpinner {
    bar: ProgressBar,
    theme: TuneupTheme,
}

impl ProgressSpinner {
    pub fn new(message: &str, theme: TuneupTheme) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self { bar, theme }
    }

    /// Create a spinner that doesn't draw (non-terminal output).
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            theme: TuneupTheme::plain(),
        }
    }

    /// Get a clone of the inner progress bar.
    ///
    /// Clones drive the same spinner, so log lines printed through
    /// [`ProgressBar::println`] land above it.
    pub fn bar_clone(&self) -> ProgressBar {
        self.bar.clone()
    }

    fn finish_with(&mut self, text: String) {
        self.bar.set_style(
            ProgressStyle::default_spinner()
                .template("{msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        self.bar.finish_with_message(text);
    }
}

impl SpinnerHandle for ProgressSpinner {
    fn set_message(&mut self, msg: &str) {
        self.bar.set_message(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        let text = self.theme.format_success(msg);
        self.finish_with(text);
    }

    fn finish_error(&mut self, msg: &str) {
        let text = self.theme.format_error(msg);
        self.finish_with(text);
    }

    fn progress_sink(&self) -> Arc<dyn ProgressSink> {
        Arc::new(SpinnerProgress {
            bar: self.bar.clone(),
        })
    }
}

/// Shows progress text on a spinner line.
#[derive(Debug, Clone)]
pub struct SpinnerProgress {
    bar: ProgressBar,
}

impl SpinnerProgress {
    pub fn new(bar: ProgressBar) -> Self {
        Self { bar }
    }
}

impl ProgressSink for SpinnerProgress {
    fn report(&self, text: &str) {
        self.bar.set_message(truncate_status(text));
    }
}

/// Shorten `text` to a single spinner-friendly line.
pub fn truncate_status(text: &str) -> String {
    let line = text.lines().next().unwrap_or("").trim_end();
    if line.chars().count() > MAX_STATUS_WIDTH {
        let head: String = line.chars().take(MAX_STATUS_WIDTH - 3).collect();
        format!("{}...", head)
    } else {
        line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_spinner_finishes() {
        let mut spinner = ProgressSpinner::hidden();
        spinner.set_message("Working");
        spinner.finish_success("Done");
        assert!(spinner.bar_clone().is_finished());
    }

    #[test]
    fn progress_sink_updates_message() {
        let spinner = ProgressSpinner::hidden();
        let sink = spinner.progress_sink();
        sink.report("Cleaning temporary files");
        assert_eq!(spinner.bar_clone().message(), "Cleaning temporary files");
    }

    #[test]
    fn truncates_long_status() {
        let long = "x".repeat(100);
        let short = truncate_status(&long);
        assert!(short.ends_with("..."));
        assert_eq!(short.chars().count(), MAX_STATUS_WIDTH);
    }

    #[test]
    fn keeps_first_line_only() {
        assert_eq!(truncate_status("SUCCESS:\nsome output"), "SUCCESS:");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "é".repeat(100);
        assert!(truncate_status(&text).ends_with("..."));
    }
}
