//! Run command implementation.
//!
//! The `tuneup run` command executes a recipe. Without an argument it is
//! the one-click maintenance run.

use std::sync::Arc;

use crate::cli::args::RunArgs;
use crate::engine::{Action, Engine};
use crate::error::Result;
use crate::shell::is_elevated;
use crate::ui::UserInterface;

use super::console::run_action;
use super::dispatcher::{Command, CommandResult};
use super::display::show_outcome;

/// Shown when a real run starts without administrator rights.
pub const NOT_ELEVATED: &str = "Not running as administrator: some steps may fail";

/// The run command implementation.
pub struct RunCommand {
    engine: Arc<Engine>,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(engine: Arc<Engine>, args: RunArgs) -> Self {
        Self { engine, args }
    }

    pub fn args(&self) -> &RunArgs {
        &self.args
    }

    fn action(&self) -> Action {
        match &self.args.recipe {
            Some(path) => Action::RunRecipe { path: path.clone() },
            None => Action::PanicButton,
        }
    }

    fn title(&self) -> String {
        match &self.args.recipe {
            Some(path) => format!("Running {}", path.display()),
            None => "Maintenance".to_string(),
        }
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.show_header(&self.title());
        if self.engine.state().dry_run() {
            ui.warning("Dry run: commands are logged, not executed");
        } else if !is_elevated() {
            ui.warning(NOT_ELEVATED);
        }

        let outcome = run_action(&self.engine, ui, self.action(), "Working...")?;
        show_outcome(ui, &outcome);
        Ok(CommandResult::from_success(outcome.success()))
    }
}
