//! Command-line interface for tuneup.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    AppsArgs, Cli, Commands, CompletionsArgs, ExecArgs, ExplainArgs, InstallArgs, RunArgs,
    ToolArgs, ToolsArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult};
