//! Tool commands.
//!
//! `tuneup tools` lists the tool catalog; `tuneup tool <category> <name>`
//! runs one entry.

use std::sync::Arc;

use crate::catalog::TOOL_CATEGORIES;
use crate::cli::args::{ToolArgs, ToolsArgs};
use crate::engine::{Action, Engine, NO_COMMANDS};
use crate::error::{Result, TuneupError};
use crate::recipe::explain;
use crate::ui::UserInterface;

use super::console::run_action;
use super::dispatcher::{Command, CommandResult};
use super::display::show_outcome;

fn check_category(category: &str) -> Result<()> {
    if TOOL_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(TuneupError::ActionFailed {
            action: "tools".to_string(),
            message: format!(
                "unknown category '{}' (expected one of: {})",
                category,
                TOOL_CATEGORIES.join(", ")
            ),
        })
    }
}

/// Lists tools per category.
pub struct ToolsCommand {
    engine: Arc<Engine>,
    args: ToolsArgs,
}

impl ToolsCommand {
    pub fn new(engine: Arc<Engine>, args: ToolsArgs) -> Self {
        Self { engine, args }
    }

    fn categories(&self) -> Result<Vec<&str>> {
        match &self.args.category {
            Some(category) => {
                check_category(category)?;
                Ok(vec![category.as_str()])
            }
            None => Ok(TOOL_CATEGORIES.to_vec()),
        }
    }
}

impl Command for ToolsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        for category in self.categories()? {
            let tools = self.engine.tools().list(category)?;
            ui.show_header(category);
            if tools.is_empty() {
                ui.warning(NO_COMMANDS);
                continue;
            }
            for tool in &tools {
                let name = tool.name().unwrap_or_default();
                match tool.friendly() {
                    Some(friendly) => ui.message(&format!("  {:<28} {}", name, friendly)),
                    None => ui.message(&format!("  {:<28} {}", name, explain(tool.tag()))),
                }
            }
        }
        Ok(CommandResult::success())
    }
}

/// Runs one tool.
pub struct ToolCommand {
    engine: Arc<Engine>,
    args: ToolArgs,
}

impl ToolCommand {
    pub fn new(engine: Arc<Engine>, args: ToolArgs) -> Self {
        Self { engine, args }
    }
}

impl Command for ToolCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        check_category(&self.args.category)?;
        let action = Action::RunTool {
            category: self.args.category.clone(),
            name: self.args.name.clone(),
        };
        let outcome = run_action(&self.engine, ui, action, &self.args.name)?;
        show_outcome(ui, &outcome);
        Ok(CommandResult::from_success(outcome.success()))
    }
}
