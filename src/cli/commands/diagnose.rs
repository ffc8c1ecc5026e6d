//! Diagnose command implementation.
//!
//! `tuneup diagnose [overview|processes|startup]` reports on the machine
//! without changing it. The startup view shells out and honors dry-run.

use std::sync::Arc;

use crate::cli::args::DiagnoseArgs;
use crate::diagnose::DiagnoseView;
use crate::engine::{Action, Engine};
use crate::error::Result;
use crate::ui::UserInterface;

use super::console::run_action;
use super::dispatcher::{Command, CommandResult};
use super::display::show_outcome;

/// The diagnose command implementation.
pub struct DiagnoseCommand {
    engine: Arc<Engine>,
    args: DiagnoseArgs,
}

impl DiagnoseCommand {
    pub fn new(engine: Arc<Engine>, args: DiagnoseArgs) -> Self {
        Self { engine, args }
    }

    fn label(view: DiagnoseView) -> &'static str {
        match view {
            DiagnoseView::Overview => "System overview",
            DiagnoseView::Processes => "Heavy processes",
            DiagnoseView::Startup => "Startup items",
        }
    }
}

impl Command for DiagnoseCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let view = DiagnoseView::from(self.args.view);
        let outcome = run_action(
            &self.engine,
            ui,
            Action::Diagnose { view },
            Self::label(view),
        )?;
        show_outcome(ui, &outcome);
        Ok(CommandResult::from_success(outcome.success()))
    }
}
