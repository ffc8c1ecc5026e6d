//! Settings file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::schema::Settings;
use crate::config::validator::validate;
use crate::error::{Result, TuneupError};

/// Settings file looked up in the working directory.
pub const SETTINGS_FILE: &str = "tuneup.yml";

/// Find the settings file for `cwd`, if any.
pub fn find_settings_file(cwd: &Path) -> Option<PathBuf> {
    let path = cwd.join(SETTINGS_FILE);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load settings.
///
/// An explicit path must exist. Without one, `tuneup.yml` in `cwd` is used
/// when present, else the defaults.
///
/// # Errors
///
/// Returns `ConfigNotFound` if `explicit` does not exist,
/// `ConfigParseError` if the YAML is invalid and `ConfigValidationError` if
/// values are unusable.
pub fn load_settings(explicit: Option<&Path>, cwd: &Path) -> Result<Settings> {
    let path = match explicit {
        Some(p) => Some(if p.is_absolute() {
            p.to_path_buf()
        } else {
            cwd.join(p)
        }),
        None => find_settings_file(cwd),
    };

    let settings = match path {
        Some(path) => load_settings_file(&path)?,
        None => {
            debug!("No settings file found, using defaults");
            Settings::default()
        }
    };

    validate(&settings)?;
    Ok(settings)
}

/// Load and parse a single settings file.
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            TuneupError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            TuneupError::Io(e)
        }
    })?;

    debug!("Loading settings from {}", path.display());
    parse_settings(&content, path)
}

/// Parse YAML settings content.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_settings(content: &str, source_path: &Path) -> Result<Settings> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    serde_yaml::from_str(content).map_err(|e| TuneupError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}
