//! Step definitions.
//!
//! A [`Step`] is one maintenance action: a command plus the metadata used
//! to describe it. Steps are validated once, at construction, and are
//! read-only afterwards.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TuneupError};
use crate::recipe::explain::explain;

/// Default time a step may run before it is abandoned.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Tag used when a record does not carry one.
pub const UNKNOWN_TAG: &str = "unknown";

/// The command of a step.
///
/// `Shell` is handed to the platform shell; `Argv` is a literal argument
/// vector. When a step runs in shell mode an `Argv` is joined with single
/// spaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepCommand {
    /// Shell-interpreted command line.
    Shell(String),
    /// Literal argument vector.
    Argv(Vec<String>),
}

impl StepCommand {
    /// Command line form used by shell mode.
    pub fn to_shell_string(&self) -> Cow<'_, str> {
        match self {
            Self::Shell(s) => Cow::Borrowed(s.as_str()),
            Self::Argv(args) => Cow::Owned(args.join(" ")),
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            Self::Shell(s) => s.trim().is_empty(),
            Self::Argv(args) => args.first().map_or(true, |a| a.trim().is_empty()),
        }
    }
}

impl fmt::Display for StepCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_shell_string())
    }
}

/// On-disk shape of a step record.
#[derive(Debug, Clone, Deserialize)]
struct StepRecord {
    cmd: StepCommand,
    #[serde(default)]
    tag: Option<String>,
    #[serde(default)]
    friendly: Option<String>,
    #[serde(default)]
    timeout: Option<u64>,
    #[serde(default)]
    name: Option<String>,
}

/// A single maintenance action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StepRecord")]
pub struct Step {
    cmd: StepCommand,
    tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    friendly: Option<String>,
    timeout: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl TryFrom<StepRecord> for Step {
    type Error = TuneupError;

    fn try_from(record: StepRecord) -> Result<Self> {
        let step = Self {
            cmd: record.cmd,
            tag: record.tag.unwrap_or_else(|| UNKNOWN_TAG.to_string()),
            friendly: record.friendly,
            timeout: record.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS),
            name: record.name,
        };
        step.validate()?;
        Ok(step)
    }
}

impl Step {
    /// Create a step from any command form.
    pub fn new(cmd: StepCommand) -> Result<Self> {
        let step = Self {
            cmd,
            tag: UNKNOWN_TAG.to_string(),
            friendly: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            name: None,
        };
        step.validate()?;
        Ok(step)
    }

    /// Create a shell-mode step.
    pub fn shell(command: impl Into<String>) -> Result<Self> {
        Self::new(StepCommand::Shell(command.into()))
    }

    /// Create a step from an argument vector.
    pub fn argv<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(StepCommand::Argv(args.into_iter().map(Into::into).collect()))
    }

    /// Create the step for a command line typed by the user.
    pub fn interactive(command: &str, timeout_secs: u64) -> Result<Self> {
        Self::shell(command)?
            .with_tag("user_command")
            .with_friendly(format!("User Command: {}", command))
            .with_timeout(timeout_secs)
    }

    /// Set the explanation tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Set the human-readable description.
    pub fn with_friendly(mut self, friendly: impl Into<String>) -> Self {
        self.friendly = Some(friendly.into());
        self
    }

    /// Set the display name used by tool catalogs.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the timeout in seconds.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStep` when `secs` is zero.
    pub fn with_timeout(mut self, secs: u64) -> Result<Self> {
        self.timeout = secs;
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if self.cmd.is_blank() {
            return Err(TuneupError::InvalidStep {
                message: format!("step '{}' has an empty command", self.tag),
            });
        }
        if self.timeout == 0 {
            return Err(TuneupError::InvalidStep {
                message: format!("step '{}' has a timeout of 0 seconds", self.tag),
            });
        }
        Ok(())
    }

    pub fn command(&self) -> &StepCommand {
        &self.cmd
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn friendly(&self) -> Option<&str> {
        self.friendly.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout)
    }

    /// Text shown for this step: the friendly description if present,
    /// else the explanation registered for the tag.
    pub fn display_text(&self) -> Cow<'_, str> {
        match &self.friendly {
            Some(friendly) => Cow::Borrowed(friendly.as_str()),
            None => explain(&self.tag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_command_with_defaults() {
        let step: Step = serde_yaml::from_str("cmd: ipconfig /flushdns").unwrap();
        assert_eq!(
            step.command(),
            &StepCommand::Shell("ipconfig /flushdns".to_string())
        );
        assert_eq!(step.tag(), UNKNOWN_TAG);
        assert_eq!(step.timeout_secs(), DEFAULT_TIMEOUT_SECS);
        assert!(step.friendly().is_none());
    }

    #[test]
    fn parses_vector_command() {
        let yaml = r#"
cmd: [sfc, /scannow]
tag: scan_sfc
timeout: 900
"#;
        let step: Step = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            step.command(),
            &StepCommand::Argv(vec!["sfc".to_string(), "/scannow".to_string()])
        );
        assert_eq!(step.command().to_shell_string(), "sfc /scannow");
        assert_eq!(step.timeout_secs(), 900);
    }

    #[test]
    fn rejects_empty_command() {
        let err = serde_yaml::from_str::<Step>("cmd: '  '").unwrap_err();
        assert!(err.to_string().contains("empty command"));
    }

    #[test]
    fn rejects_empty_vector() {
        assert!(serde_yaml::from_str::<Step>("cmd: []").is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = serde_yaml::from_str::<Step>("cmd: echo hi\ntimeout: 0").unwrap_err();
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn rejects_negative_timeout() {
        assert!(serde_yaml::from_str::<Step>("cmd: echo hi\ntimeout: -5").is_err());
    }

    #[test]
    fn display_text_prefers_friendly() {
        let step = Step::shell("echo")
            .unwrap()
            .with_tag("clean_temp")
            .with_friendly("Custom text");
        assert_eq!(step.display_text(), "Custom text");
    }

    #[test]
    fn display_text_falls_back_to_tag_table() {
        let step = Step::shell("echo").unwrap().with_tag("flush_dns");
        assert_eq!(
            step.display_text(),
            "Flushing DNS cache to fix network issues."
        );
    }

    #[test]
    fn display_text_for_unknown_tag() {
        let step = Step::shell("echo").unwrap().with_tag("mystery");
        assert_eq!(step.display_text(), "Running action: mystery");
    }

    #[test]
    fn interactive_step_uses_user_command_text() {
        let step = Step::interactive("dir C:\\", 300).unwrap();
        assert_eq!(step.display_text(), "User Command: dir C:\\");
        assert_eq!(step.timeout_secs(), 300);
    }

    #[test]
    fn with_timeout_rejects_zero() {
        assert!(Step::shell("echo").unwrap().with_timeout(0).is_err());
    }

    #[test]
    fn argv_constructor_rejects_blank_program() {
        assert!(Step::argv(Vec::<String>::new()).is_err());
        assert!(Step::argv(["", "arg"]).is_err());
    }
}
