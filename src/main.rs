//! tuneup CLI entry point.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use clap::Parser;
use tracing::Level;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use tuneup::cli::{Cli, CommandDispatcher};
use tuneup::config::load_settings;
use tuneup::engine::Engine;
use tuneup::shell::is_ci;
use tuneup::sink::CONSOLE_TARGET;
use tuneup::ui::{create_ui, OutputMode, UserInterface};

/// Initialize the tracing subscriber for logging.
///
/// Diagnostics go to stderr:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
///
/// Console lines (target `tuneup::console`) are appended to `log_file`.
/// They are never echoed to stderr; the UI shows them.
fn init_tracing(debug: bool, log_file: Option<&Path>) -> Option<std::io::Error> {
    let filter = if debug {
        EnvFilter::new("tuneup=debug,tuneup::console=off")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("tuneup=warn,tuneup::console=off"))
    };
    let stderr = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    let (file, open_error) = match log_file {
        Some(path) => match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => (Some(f), None),
            Err(e) => (None, Some(e)),
        },
        None => (None, None),
    };
    let file_layer = file.map(|f| {
        fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_writer(Mutex::new(f))
            .with_filter(Targets::new().with_target(CONSOLE_TARGET, Level::INFO))
    });

    tracing_subscriber::registry()
        .with(stderr)
        .with(file_layer)
        .init();

    open_error
}

fn output_mode(cli: &Cli) -> OutputMode {
    if cli.quiet {
        OutputMode::Quiet
    } else if cli.verbose {
        OutputMode::Verbose
    } else {
        OutputMode::Normal
    }
}

fn resolve(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut ui = create_ui(!is_ci(), output_mode(&cli), !cli.no_color);

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            init_tracing(cli.debug, None);
            ui.error(&format!("Error: cannot read current directory: {}", e));
            return ExitCode::from(1);
        }
    };

    let mut settings = match load_settings(cli.config.as_deref(), &cwd) {
        Ok(settings) => settings,
        Err(e) => {
            init_tracing(cli.debug, None);
            ui.error(&format!("Error: {}", e));
            return ExitCode::from(1);
        }
    };
    if cli.dry_run {
        settings.dry_run = true;
    }

    let log_file = settings.log_file.as_deref().map(|p| resolve(&cwd, p));
    if let Some(e) = init_tracing(cli.debug, log_file.as_deref()) {
        tracing::warn!("Cannot open log file: {}", e);
    }
    tracing::debug!("tuneup starting with args: {:?}", cli);

    let engine = match Engine::from_settings(settings, &cwd) {
        Ok(engine) => Arc::new(engine),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            return ExitCode::from(1);
        }
    };

    let dispatcher = CommandDispatcher::new(engine);
    run(&dispatcher, &cli, ui.as_mut())
}

fn run(dispatcher: &CommandDispatcher, cli: &Cli, ui: &mut dyn UserInterface) -> ExitCode {
    match dispatcher.dispatch(cli, ui) {
        Ok(result) => exit_code(result.exit_code),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
