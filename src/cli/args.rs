//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::builder::FalseyValueParser;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::diagnose::DiagnoseView;

/// Tuneup - Scripted system maintenance, tools and app installs.
#[derive(Debug, Parser)]
#[command(name = "tuneup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log every step instead of running it
    #[arg(long, global = true, env = "TUNEUP_DRY_RUN", value_parser = FalseyValueParser::new())]
    pub dry_run: bool,

    /// Path to settings file (overrides ./tuneup.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Hide the console log
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a recipe (the maintenance recipe if none is given)
    Run(RunArgs),

    /// Run a single command line
    Exec(ExecArgs),

    /// List tools by category
    Tools(ToolsArgs),

    /// Run one tool
    Tool(ToolArgs),

    /// List installable applications
    Apps(AppsArgs),

    /// Install applications with the package manager
    Install(InstallArgs),

    /// Show system specs, heavy processes or startup items
    Diagnose(DiagnoseArgs),

    /// Explain what a step tag does
    Explain(ExplainArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Recipe path, resolved against the resource directories
    pub recipe: Option<PathBuf>,
}

/// Arguments for the `exec` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ExecArgs {
    /// Command line, passed to the shell as typed
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

/// Arguments for the `tools` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ToolsArgs {
    /// Only list this category
    #[arg(short, long)]
    pub category: Option<String>,
}

/// Arguments for the `tool` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ToolArgs {
    /// Tool category (security, tweaks, maintenance, network)
    pub category: String,

    /// Tool name as listed by `tuneup tools`
    pub name: String,
}

/// Arguments for the `apps` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct AppsArgs {
    /// Only list this category
    #[arg(short, long)]
    pub category: Option<String>,
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstallArgs {
    /// App keys from `tuneup apps`; prompts when omitted
    pub keys: Vec<String>,
}

/// Arguments for the `diagnose` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DiagnoseArgs {
    /// What to report
    #[arg(value_enum, default_value_t = ViewArg::Overview)]
    pub view: ViewArg,
}

/// Diagnostic views selectable on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    /// OS, CPU and memory
    #[default]
    Overview,
    /// The processes using the most memory
    Processes,
    /// Programs started at logon
    Startup,
}

impl From<ViewArg> for DiagnoseView {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::Overview => DiagnoseView::Overview,
            ViewArg::Processes => DiagnoseView::Processes,
            ViewArg::Startup => DiagnoseView::Startup,
        }
    }
}

/// Arguments for the `explain` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ExplainArgs {
    /// Step tag; lists every known tag when omitted
    pub tag: Option<String>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
