//! Non-interactive UI for pipes, CI and other headless use.

use crate::error::{Result, TuneupError};

use super::{OutputMode, ProgressSpinner, PromptOption, SpinnerHandle, TuneupTheme, UserInterface};

/// Plain-text UI: no colors, no spinners, no prompts.
pub struct NonInteractiveUI {
    mode: OutputMode,
    theme: TuneupTheme,
}

impl NonInteractiveUI {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            theme: TuneupTheme::plain(),
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn success(&mut self, msg: &str) {
        println!("{}", self.theme.format_success(msg));
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_warning(msg));
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn log_line(&mut self, line: &str) {
        if self.mode.shows_console() {
            println!("{}", self.theme.format_console_line(line));
        }
    }

    fn show_header(&mut self, title: &str) {
        println!("{}", self.theme.format_header(title));
    }

    fn start_spinner(&mut self, _message: &str) -> Box<dyn SpinnerHandle> {
        Box::new(ProgressSpinner::hidden())
    }

    fn multi_select(&mut self, question: &str, _options: &[PromptOption]) -> Result<Vec<String>> {
        Err(TuneupError::ActionFailed {
            action: "prompt".to_string(),
            message: format!("cannot ask '{}' without a terminal", question),
        })
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
