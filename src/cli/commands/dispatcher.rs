//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::sync::Arc;

use crate::cli::args::{Cli, Commands};
use crate::engine::Engine;
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Success or exit code 1.
    pub fn from_success(success: bool) -> Self {
        if success {
            Self::success()
        } else {
            Self::failure(1)
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    engine: Arc<Engine>,
}

impl CommandDispatcher {
    pub fn new(engine: Arc<Engine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Arc<Engine> {
        &self.engine
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let engine = Arc::clone(&self.engine);
        match &cli.command {
            Commands::Run(args) => super::run::RunCommand::new(engine, args.clone()).execute(ui),
            Commands::Exec(args) => super::exec::ExecCommand::new(engine, args.clone()).execute(ui),
            Commands::Tools(args) => {
                super::tools::ToolsCommand::new(engine, args.clone()).execute(ui)
            }
            Commands::Tool(args) => super::tools::ToolCommand::new(engine, args.clone()).execute(ui),
            Commands::Apps(args) => super::apps::AppsCommand::new(engine, args.clone()).execute(ui),
            Commands::Install(args) => {
                super::install::InstallCommand::new(engine, args.clone()).execute(ui)
            }
            Commands::Diagnose(args) => {
                super::diagnose::DiagnoseCommand::new(engine, args.clone()).execute(ui)
            }
            Commands::Explain(args) => super::explain::ExplainCommand::new(args.clone()).execute(ui),
            Commands::Completions(args) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::ui::MockUI;
    use clap::Parser;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn from_success_maps_to_exit_code() {
        assert_eq!(CommandResult::from_success(true).exit_code, 0);
        assert_eq!(CommandResult::from_success(false).exit_code, 1);
    }

    #[test]
    fn dispatches_explain() {
        let settings = Settings::default();
        let engine = Arc::new(Engine::from_settings(settings, &std::env::temp_dir()).unwrap());
        let dispatcher = CommandDispatcher::new(engine);
        let cli = Cli::parse_from(["tuneup", "explain", "flush_dns"]);
        let mut ui = MockUI::new();
        let result = dispatcher.dispatch(&cli, &mut ui).unwrap();
        assert!(result.success);
        assert!(!ui.messages().is_empty());
    }
}
