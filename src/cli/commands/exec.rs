//! Exec command implementation.
//!
//! `tuneup exec <command line>` runs one command the way the interactive
//! prompt would.

use std::sync::Arc;

use crate::cli::args::ExecArgs;
use crate::engine::{Action, Engine};
use crate::error::Result;
use crate::ui::UserInterface;

use super::console::run_action;
use super::dispatcher::{Command, CommandResult};
use super::display::show_outcome;

/// The exec command implementation.
pub struct ExecCommand {
    engine: Arc<Engine>,
    args: ExecArgs,
}

impl ExecCommand {
    pub fn new(engine: Arc<Engine>, args: ExecArgs) -> Self {
        Self { engine, args }
    }

    /// The words joined back into one command line.
    pub fn command_line(&self) -> String {
        self.args.command.join(" ")
    }
}

impl Command for ExecCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let command = self.command_line();
        let outcome = run_action(
            &self.engine,
            ui,
            Action::Command {
                command: command.clone(),
            },
            &command,
        )?;
        show_outcome(ui, &outcome);
        Ok(CommandResult::from_success(outcome.success()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::ui::MockUI;

    fn engine() -> Arc<Engine> {
        Arc::new(Engine::from_settings(Settings::default(), &std::env::temp_dir()).unwrap())
    }

    fn args(words: &[&str]) -> ExecArgs {
        ExecArgs {
            command: words.iter().map(|w| w.to_string()).collect(),
        }
    }

    #[test]
    fn joins_words_into_command_line() {
        let cmd = ExecCommand::new(engine(), args(&["echo", "a", "b"]));
        assert_eq!(cmd.command_line(), "echo a b");
    }

    #[test]
    fn successful_command_exits_zero() {
        let mut ui = MockUI::new();
        let result = ExecCommand::new(engine(), args(&["echo", "exec-ok"]))
            .execute(&mut ui)
            .unwrap();
        assert!(result.success);
        assert!(ui.has_log_line("EXEC: User Command: echo exec-ok"));
        assert!(ui.has_log_line("exec-ok"));
    }

    #[test]
    fn failing_command_exits_one() {
        let mut ui = MockUI::new();
        let result = ExecCommand::new(engine(), args(&["exit", "4"]))
            .execute(&mut ui)
            .unwrap();
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_log_line("FAILED (Code 4)"));
    }
}
