//! Error types for tuneup operations.
//!
//! This module defines [`TuneupError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Operational failures of a step (timeout, nonzero exit, spawn failure)
//!   are never errors; they travel as [`ExecutionResult`](crate::steps::ExecutionResult) values
//! - Use `TuneupError` for malformed input (recipes, catalogs, settings) and
//!   other conditions the immediate caller has to present to the user
//! - Use `anyhow::Error` (via `TuneupError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for tuneup operations.
#[derive(Debug, Error)]
pub enum TuneupError {
    /// Recipe file exists but could not be parsed.
    #[error("Failed to parse recipe at {path}: {message}")]
    RecipeParseError { path: PathBuf, message: String },

    /// A step definition violates its invariants.
    #[error("Invalid step: {message}")]
    InvalidStep { message: String },

    /// A child process could not be started.
    #[error("Failed to start '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Settings file not found at an explicitly requested location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse the settings file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Settings parsed but hold unusable values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Catalog resource is missing from every search location.
    #[error("Catalog not found: {path}")]
    CatalogNotFound { path: PathBuf },

    /// Catalog resource exists but could not be parsed.
    #[error("Failed to parse catalog at {path}: {message}")]
    CatalogParseError { path: PathBuf, message: String },

    /// No tool with the given name in the category.
    #[error("Unknown tool '{name}' in category '{category}'")]
    UnknownTool { category: String, name: String },

    /// A worker action could not be started or did not finish cleanly.
    #[error("Action '{action}' failed: {message}")]
    ActionFailed { action: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for tuneup operations.
pub type Result<T> = std::result::Result<T, TuneupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipe_parse_error_displays_path_and_message() {
        let err = TuneupError::RecipeParseError {
            path: PathBuf::from("recipes/maintenance.yaml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("recipes/maintenance.yaml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn invalid_step_displays_message() {
        let err = TuneupError::InvalidStep {
            message: "command is empty".into(),
        };
        assert!(err.to_string().contains("command is empty"));
    }

    #[test]
    fn spawn_failed_displays_command_and_cause() {
        let err = TuneupError::SpawnFailed {
            command: "winget".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "program not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("winget"));
        assert!(msg.contains("program not found"));
    }

    #[test]
    fn config_not_found_displays_path() {
        let err = TuneupError::ConfigNotFound {
            path: PathBuf::from("/foo/tuneup.yml"),
        };
        assert!(err.to_string().contains("/foo/tuneup.yml"));
    }

    #[test]
    fn unknown_tool_displays_category_and_name() {
        let err = TuneupError::UnknownTool {
            category: "network".into(),
            name: "Flush DNS".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("network"));
        assert!(msg.contains("Flush DNS"));
    }

    #[test]
    fn action_failed_displays_action_and_message() {
        let err = TuneupError::ActionFailed {
            action: "panic-button".into(),
            message: "worker panicked".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("panic-button"));
        assert!(msg.contains("worker panicked"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: TuneupError = io_err.into();
        assert!(matches!(err, TuneupError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(TuneupError::ConfigValidationError {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
