//! Output verbosity.

use std::str::FromStr;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show everything, including the full report of each step.
    Verbose,
    /// Show the console log and status.
    #[default]
    Normal,
    /// Show status and the final result only.
    Quiet,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verbose" => Ok(Self::Verbose),
            "normal" => Ok(Self::Normal),
            "quiet" => Ok(Self::Quiet),
            _ => Err(format!("unknown output mode: {}", s)),
        }
    }
}

impl OutputMode {
    /// Check if this mode echoes the console log.
    pub fn shows_console(&self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Check if this mode shows per-step details in summaries.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Verbose)
    }
}
