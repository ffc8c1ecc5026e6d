//! Terminal user interface.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for pipes, CI and other headless use
//! - [`MockUI`] for tests
//!
//! # Example
//!
//! ```
//! use tuneup::ui::{create_ui, OutputMode, UserInterface};
//!
//! let mut ui = create_ui(false, OutputMode::Quiet, false);
//! ui.log_line("EXEC: Flushing DNS cache");
//! ui.success("Done");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod prompts;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use spinner::{truncate_status, ProgressSpinner, SpinnerProgress};
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, TuneupTheme};

use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::steps::ProgressSink;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    fn success(&mut self, msg: &str);

    fn warning(&mut self, msg: &str);

    /// Errors are shown in every output mode.
    fn error(&mut self, msg: &str);

    /// Echo one line of the console log.
    fn log_line(&mut self, line: &str);

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Start a spinner for an action.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Let the user pick any number of options; returns the chosen values.
    fn multi_select(&mut self, question: &str, options: &[PromptOption]) -> Result<Vec<String>>;

    /// Check if the user can answer prompts.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    fn set_message(&mut self, msg: &str);

    /// Mark the action as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the action as failed.
    fn finish_error(&mut self, msg: &str);

    /// A progress sink that updates this spinner from any thread.
    fn progress_sink(&self) -> Arc<dyn ProgressSink>;
}

/// An option in a select prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptOption {
    /// Display label.
    pub label: String,
    /// Value returned when selected.
    pub value: String,
}

/// Format a duration for humans.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 1.0 {
        format!("{}ms", d.as_millis())
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = secs / 60.0;
        format!("{:.1}m", mins)
    }
}
