//! tuneup - Scripted system maintenance, tools and app installation.
//!
//! tuneup runs maintenance recipes (ordered lists of shell commands read
//! from YAML), one-off tools grouped by category, and batch application
//! installs through a package manager. It also reports read-only system
//! diagnostics. Every action streams its output to a shared console log.
//!
//! # Modules
//!
//! - [`catalog`] - Tool and application catalogs, batch installs
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings loading and validation
//! - [`diagnose`] - System overview, process and startup diagnostics
//! - [`engine`] - Action routing on top of shared runner state
//! - [`error`] - Error types and result aliases
//! - [`recipe`] - Step definitions, recipe files and packaged resources
//! - [`runner`] - Recipe orchestration, runner state and worker tasks
//! - [`shell`] - Child process execution and output decoding
//! - [`sink`] - The process-wide console log
//! - [`steps`] - Single-step execution and results
//! - [`ui`] - Spinners, prompts and terminal output
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use tuneup::recipe::parse_recipe;
//!
//! let steps = parse_recipe("- cmd: ipconfig /flushdns\n  tag: flush_dns\n", Path::new("r.yaml")).unwrap();
//! assert_eq!(steps[0].display_text(), "Flushing DNS cache to fix network issues.");
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod diagnose;
pub mod engine;
pub mod error;
pub mod recipe;
pub mod runner;
pub mod shell;
pub mod sink;
pub mod steps;
pub mod ui;

pub use error::{Result, TuneupError};
