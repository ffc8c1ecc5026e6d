//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. Multi-select answers can be
//! configured up front.
//!
//! # Example
//!
//! ```
//! use tuneup::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.log_line("SUCCESS");
//! ui.success("Done!");
//!
//! assert!(ui.has_log_line("SUCCESS"));
//! assert!(ui.successes().contains(&"Done!".to_string()));
//! ```

use std::sync::{Arc, Mutex};

use crate::error::{Result, TuneupError};
use crate::steps::ProgressSink;

use super::{OutputMode, PromptOption, SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    log_lines: Vec<String>,
    headers: Vec<String>,
    spinners: Vec<String>,
    progress: Arc<Mutex<Vec<String>>>,
    selection: Option<Vec<String>>,
    questions: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Values returned by the next `multi_select` calls.
    pub fn set_selection(&mut self, values: &[&str]) {
        self.selection = Some(values.iter().map(|s| s.to_string()).collect());
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Console log lines, without the `> ` marker.
    pub fn log_lines(&self) -> &[String] {
        &self.log_lines
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Messages of every spinner started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Progress text reported to any spinner.
    pub fn progress(&self) -> Vec<String> {
        self.progress
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Questions asked through `multi_select`.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    pub fn has_log_line(&self, line: &str) -> bool {
        self.log_lines.iter().any(|l| l.contains(line))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn log_line(&mut self, line: &str) {
        if self.mode.shows_console() {
            self.log_lines.push(line.to_string());
        }
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner {
            progress: Arc::clone(&self.progress),
        })
    }

    fn multi_select(&mut self, question: &str, _options: &[PromptOption]) -> Result<Vec<String>> {
        self.questions.push(question.to_string());
        self.selection
            .clone()
            .ok_or_else(|| TuneupError::ActionFailed {
                action: "prompt".to_string(),
                message: format!("no answer configured for '{}'", question),
            })
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Spinner returned by [`MockUI`].
#[derive(Debug)]
pub struct MockSpinner {
    progress: Arc<Mutex<Vec<String>>>,
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, msg: &str) {
        self.progress
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(msg.to_string());
    }

    fn finish_success(&mut self, _msg: &str) {}

    fn finish_error(&mut self, _msg: &str) {}

    fn progress_sink(&self) -> Arc<dyn ProgressSink> {
        let progress = Arc::clone(&self.progress);
        Arc::new(move |text: &str| {
            progress
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(text.to_string());
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_output() {
        let mut ui = MockUI::new();
        ui.message("hello");
        ui.warning("careful");
        ui.error("broken");
        assert!(ui.has_message("hello"));
        assert_eq!(ui.warnings(), ["careful"]);
        assert!(ui.has_error("broken"));
    }

    #[test]
    fn quiet_mode_drops_log_lines() {
        let mut ui = MockUI::with_mode(OutputMode::Quiet);
        ui.log_line("EXEC: something");
        assert!(ui.log_lines().is_empty());
    }

    #[test]
    fn spinner_progress_is_recorded() {
        let mut ui = MockUI::new();
        let spinner = ui.start_spinner("Working");
        spinner.progress_sink().report("Step one");
        assert_eq!(ui.spinners(), ["Working"]);
        assert_eq!(ui.progress(), vec!["Step one"]);
    }

    #[test]
    fn multi_select_returns_configured_values() {
        let mut ui = MockUI::new();
        ui.set_selection(&["7zip", "vlc"]);
        let picked = ui.multi_select("Pick apps", &[]).unwrap();
        assert_eq!(picked, vec!["7zip", "vlc"]);
        assert_eq!(ui.questions(), ["Pick apps"]);
    }

    #[test]
    fn multi_select_without_answer_fails() {
        let mut ui = MockUI::new();
        assert!(ui.multi_select("Pick apps", &[]).is_err());
    }
}
