//! Step execution.
//!
//! - [`StepExecutor`] - Runs one step in shell or vector mode
//! - [`ExecutionResult`] - Success flag, captured output and status
//! - [`ProgressSink`] - Status-line callback
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tuneup::recipe::Step;
//! use tuneup::runner::RunnerState;
//! use tuneup::steps::StepExecutor;
//!
//! let state = Arc::new(RunnerState::default());
//! state.set_dry_run(true);
//!
//! let executor = StepExecutor::new(state);
//! let result = executor.execute(&Step::shell("sfc /scannow").unwrap(), None);
//! assert!(result.success);
//! assert_eq!(result.output, "Dry run");
//! ```

pub mod executor;
pub mod progress;
pub mod result;

pub use executor::StepExecutor;
pub use progress::ProgressSink;
pub use result::{
    ExecutionResult, ExecutionStatus, CANCELLED_OUTPUT, DRY_RUN_OUTPUT, TIMED_OUT_OUTPUT,
};
