//! Settings schema.
//!
//! Maps the optional `tuneup.yml` settings file. Every field has a default,
//! so an empty file (or no file) is valid.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Result, TuneupError};
use crate::shell::LegacyCodePage;
use crate::sink::filter::{NoiseFilter, DEFAULT_NOISE_PATTERN};

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Start in dry-run mode
    #[serde(skip_serializing_if = "is_false")]
    pub dry_run: bool,

    /// Timeout for commands typed by the user (seconds)
    pub command_timeout: u64,

    /// Timeout for each package install (seconds)
    pub install_timeout: u64,

    /// Timeout for the package source refresh before a batch install (seconds)
    pub source_update_timeout: u64,

    /// Code page tried when command output is not UTF-8
    pub legacy_encoding: String,

    /// Durable log file (relative to the working directory); null disables it
    pub log_file: Option<PathBuf>,

    /// Extra directories searched for recipes and catalogs, before the defaults
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resource_dirs: Vec<PathBuf>,

    /// Regular expressions for console lines to hide
    pub console_filters: Vec<String>,

    /// Recipe run by the panic button
    pub panic_recipe: PathBuf,

    /// Package manager executable used for app installs
    pub package_manager: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dry_run: false,
            command_timeout: 300,
            install_timeout: 300,
            source_update_timeout: 120,
            legacy_encoding: "cp850".to_string(),
            log_file: Some(PathBuf::from("tuneup.log")),
            resource_dirs: Vec::new(),
            console_filters: vec![DEFAULT_NOISE_PATTERN.to_string()],
            panic_recipe: PathBuf::from("recipes/maintenance.yaml"),
            package_manager: "winget".to_string(),
        }
    }
}

impl Settings {
    /// The configured legacy code page.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` for an unknown label.
    pub fn legacy_code_page(&self) -> Result<LegacyCodePage> {
        LegacyCodePage::from_label(&self.legacy_encoding).ok_or_else(|| {
            TuneupError::ConfigValidationError {
                message: format!("unknown legacy_encoding '{}'", self.legacy_encoding),
            }
        })
    }

    /// The configured console filter.
    pub fn noise_filter(&self) -> Result<NoiseFilter> {
        NoiseFilter::from_patterns(&self.console_filters)
    }
}

fn is_false(v: &bool) -> bool {
    !v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mapping_uses_defaults() {
        let settings: Settings = serde_yaml::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.command_timeout, 300);
        assert_eq!(settings.package_manager, "winget");
    }

    #[test]
    fn parses_overrides() {
        let yaml = r#"
dry_run: true
install_timeout: 900
legacy_encoding: ibm866
log_file: logs/tuneup.log
resource_dirs: [my]
console_filters: []
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert!(settings.dry_run);
        assert_eq!(settings.install_timeout, 900);
        assert_eq!(settings.log_file, Some(PathBuf::from("logs/tuneup.log")));
        assert_eq!(settings.resource_dirs, vec![PathBuf::from("my")]);
        assert!(settings.console_filters.is_empty());
        assert_eq!(settings.legacy_code_page().unwrap().name(), "IBM866");
    }

    #[test]
    fn null_log_file_disables_logging() {
        let settings: Settings = serde_yaml::from_str("log_file: null").unwrap();
        assert!(settings.log_file.is_none());
    }

    #[test]
    fn unknown_legacy_encoding_is_rejected() {
        let settings = Settings {
            legacy_encoding: "klingon".to_string(),
            ..Default::default()
        };
        assert!(settings.legacy_code_page().is_err());
    }

    #[test]
    fn serialization_omits_defaults_flagged_skip() {
        let yaml = serde_yaml::to_string(&Settings::default()).unwrap();
        assert!(!yaml.contains("dry_run"));
        assert!(!yaml.contains("resource_dirs"));
        assert!(yaml.contains("panic_recipe"));
    }
}
