//! Settings validation rules.
//!
//! - Timeouts must be positive
//! - The legacy code page must be known
//! - Console filters must be valid regular expressions

use crate::config::schema::Settings;
use crate::error::{Result, TuneupError};

/// Validation error with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Settings field the error refers to
    pub field: String,
    /// Human-readable error message
    pub message: String,
}

/// Validate settings and return all errors.
pub fn validate_settings(settings: &Settings) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (field, value) in [
        ("command_timeout", settings.command_timeout),
        ("install_timeout", settings.install_timeout),
        ("source_update_timeout", settings.source_update_timeout),
    ] {
        if value == 0 {
            errors.push(ValidationError {
                field: field.to_string(),
                message: format!("{} must be greater than 0", field),
            });
        }
    }

    if let Err(e) = settings.legacy_code_page() {
        errors.push(ValidationError {
            field: "legacy_encoding".to_string(),
            message: e.to_string(),
        });
    }

    if let Err(e) = settings.noise_filter() {
        errors.push(ValidationError {
            field: "console_filters".to_string(),
            message: e.to_string(),
        });
    }

    if settings.package_manager.trim().is_empty() {
        errors.push(ValidationError {
            field: "package_manager".to_string(),
            message: "package_manager must not be empty".to_string(),
        });
    }

    errors
}

/// Validate settings, failing on the first batch of errors.
///
/// # Errors
///
/// Returns `ConfigValidationError` listing every problem found.
pub fn validate(settings: &Settings) -> Result<()> {
    let errors = validate_settings(settings);
    if errors.is_empty() {
        return Ok(());
    }

    let message = errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    Err(TuneupError::ConfigValidationError { message })
}
