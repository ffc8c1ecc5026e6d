//! Interactive terminal UI.

use console::Term;
use indicatif::ProgressBar;
use std::io::Write;

use crate::error::Result;

use super::prompts::prompt_multiselect;
use super::{
    should_use_colors, NonInteractiveUI, OutputMode, ProgressSpinner, PromptOption,
    SpinnerHandle, TuneupTheme, UserInterface,
};

/// Interactive terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: TuneupTheme,
    mode: OutputMode,
    /// Spinner currently drawn, so log lines print above it.
    active: Option<ProgressBar>,
}

impl TerminalUI {
    pub fn new(mode: OutputMode, colors: bool) -> Self {
        let theme = if colors && should_use_colors() {
            TuneupTheme::new()
        } else {
            TuneupTheme::plain()
        };

        Self {
            term: Term::stdout(),
            theme,
            mode,
            active: None,
        }
    }

    fn write_line(&mut self, text: &str) {
        match self.active.as_ref().filter(|bar| !bar.is_finished()) {
            Some(bar) => bar.println(text),
            None => {
                writeln!(self.term, "{}", text).ok();
            }
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.write_line(msg);
    }

    fn success(&mut self, msg: &str) {
        let text = self.theme.format_success(msg);
        self.write_line(&text);
    }

    fn warning(&mut self, msg: &str) {
        let text = self.theme.format_warning(msg);
        self.write_line(&text);
    }

    fn error(&mut self, msg: &str) {
        let text = self.theme.format_error(msg);
        self.write_line(&text);
    }

    fn log_line(&mut self, line: &str) {
        if self.mode.shows_console() {
            let text = self.theme.format_console_line(line);
            self.write_line(&text);
        }
    }

    fn show_header(&mut self, title: &str) {
        let text = format!("\n{}\n", self.theme.format_header(title));
        self.write_line(&text);
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        let spinner = ProgressSpinner::new(message, self.theme.clone());
        self.active = Some(spinner.bar_clone());
        Box::new(spinner)
    }

    fn multi_select(&mut self, question: &str, options: &[PromptOption]) -> Result<Vec<String>> {
        prompt_multiselect(question, options, &self.term)
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}

/// Create the UI for this process.
///
/// A [`TerminalUI`] when `interactive` is requested and stdout is a
/// terminal, a [`NonInteractiveUI`] otherwise.
pub fn create_ui(interactive: bool, mode: OutputMode, colors: bool) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode, colors))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_ui_non_interactive() {
        let ui = create_ui(false, OutputMode::Normal, true);
        assert!(!ui.is_interactive());
    }

    #[test]
    fn create_ui_respects_mode() {
        let ui = create_ui(false, OutputMode::Quiet, false);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn terminal_ui_without_colors_uses_plain_theme() {
        let ui = TerminalUI::new(OutputMode::Normal, false);
        assert_eq!(ui.theme.format_console_line("x"), "> x");
    }
}
