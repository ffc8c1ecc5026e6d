//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Commands that run something go
//! through [`console::run_action`], which echoes the console log while the
//! engine works on a background thread.

pub mod apps;
pub mod completions;
pub mod console;
pub mod diagnose;
pub mod dispatcher;
pub mod display;
pub mod exec;
pub mod explain;
pub mod install;
pub mod run;
pub mod tools;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
