//! Step outcomes.

use std::fmt;
use std::time::Duration;

/// Output text of a dry-run step.
pub const DRY_RUN_OUTPUT: &str = "Dry run";

/// Output text of a step that hit its timeout.
pub const TIMED_OUT_OUTPUT: &str = "Command timed out";

/// Output text of a cancelled step.
pub const CANCELLED_OUTPUT: &str = "Command cancelled";

/// How a step ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStatus {
    /// Exited with code 0.
    Succeeded,

    /// Simulated; nothing was spawned.
    DryRun,

    /// Exited with a nonzero code (`None` if killed by a signal).
    Failed { code: Option<i32> },

    /// Terminated after the step timeout.
    TimedOut,

    /// The process could not be started.
    SpawnError,

    /// Terminated on request.
    Cancelled,
}

impl ExecutionStatus {
    /// Get a display character for this status.
    pub fn display_char(&self) -> char {
        match self {
            ExecutionStatus::Succeeded => '✓',
            ExecutionStatus::DryRun => '○',
            ExecutionStatus::Failed { .. } | ExecutionStatus::SpawnError => '✗',
            ExecutionStatus::TimedOut => '⧗',
            ExecutionStatus::Cancelled => '⊘',
        }
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionStatus::Succeeded => write!(f, "succeeded"),
            ExecutionStatus::DryRun => write!(f, "dry run"),
            ExecutionStatus::Failed { code: Some(code) } => write!(f, "failed (code {})", code),
            ExecutionStatus::Failed { code: None } => write!(f, "failed"),
            ExecutionStatus::TimedOut => write!(f, "timed out"),
            ExecutionStatus::SpawnError => write!(f, "could not start"),
            ExecutionStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Result of executing one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Whether the step succeeded (dry runs count as success).
    pub success: bool,

    /// Captured output, or a fixed message for dry run, timeout and
    /// cancellation.
    pub output: String,

    pub status: ExecutionStatus,

    pub duration: Duration,
}

impl ExecutionResult {
    pub fn dry_run() -> Self {
        Self {
            success: true,
            output: DRY_RUN_OUTPUT.to_string(),
            status: ExecutionStatus::DryRun,
            duration: Duration::ZERO,
        }
    }

    pub fn succeeded(output: String, duration: Duration) -> Self {
        Self {
            success: true,
            output,
            status: ExecutionStatus::Succeeded,
            duration,
        }
    }

    pub fn failed(code: Option<i32>, output: String, duration: Duration) -> Self {
        Self {
            success: false,
            output,
            status: ExecutionStatus::Failed { code },
            duration,
        }
    }

    pub fn timed_out(duration: Duration) -> Self {
        Self {
            success: false,
            output: TIMED_OUT_OUTPUT.to_string(),
            status: ExecutionStatus::TimedOut,
            duration,
        }
    }

    pub fn cancelled(duration: Duration) -> Self {
        Self {
            success: false,
            output: CANCELLED_OUTPUT.to_string(),
            status: ExecutionStatus::Cancelled,
            duration,
        }
    }

    pub fn spawn_error(message: String, duration: Duration) -> Self {
        Self {
            success: false,
            output: message,
            status: ExecutionStatus::SpawnError,
            duration,
        }
    }

    /// Whether the step was cut short by cancellation.
    pub fn is_cancelled(&self) -> bool {
        self.status == ExecutionStatus::Cancelled
    }
}
