//! Recipe orchestration, shared runner state and worker tasks.

pub mod recipe;
pub mod state;
pub mod task;

pub use recipe::{RecipeReport, RecipeRunner, RecipeSource, StepOutcome};
pub use state::RunnerState;
pub use task::ActionTask;
