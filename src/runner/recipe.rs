//! Recipe orchestration.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::error::Result;
use crate::recipe::{RecipeStore, Step};
use crate::shell::CancelToken;
use crate::steps::{ExecutionResult, ProgressSink, StepExecutor};

/// Where a run gets its steps from.
#[derive(Debug, Clone)]
pub enum RecipeSource {
    /// Logical path resolved through the [`RecipeStore`].
    Path(PathBuf),

    /// An already materialized sequence.
    Steps(Vec<Step>),
}

impl RecipeSource {
    fn label(&self) -> String {
        match self {
            RecipeSource::Path(p) => p.display().to_string(),
            RecipeSource::Steps(steps) => format!("{} inline step(s)", steps.len()),
        }
    }
}

impl From<PathBuf> for RecipeSource {
    fn from(path: PathBuf) -> Self {
        RecipeSource::Path(path)
    }
}

impl From<&Path> for RecipeSource {
    fn from(path: &Path) -> Self {
        RecipeSource::Path(path.to_path_buf())
    }
}

impl From<Vec<Step>> for RecipeSource {
    fn from(steps: Vec<Step>) -> Self {
        RecipeSource::Steps(steps)
    }
}

/// Outcome of one step within a recipe run.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    /// Zero-based position in the recipe.
    pub index: usize,
    pub display: String,
    pub tag: String,
    pub result: ExecutionResult,
}

/// Aggregate result of a recipe run.
#[derive(Debug, Clone)]
pub struct RecipeReport {
    /// Where the steps came from.
    pub source: String,
    /// Outcomes of the steps that ran, in order.
    pub steps: Vec<StepOutcome>,
    /// Total duration.
    pub duration: Duration,
    /// Whether the run stopped early on cancellation.
    pub cancelled: bool,
}

impl RecipeReport {
    fn new(source: String) -> Self {
        Self {
            source,
            steps: Vec::new(),
            duration: Duration::ZERO,
            cancelled: false,
        }
    }

    /// True when every step succeeded and the run was not cancelled.
    pub fn success(&self) -> bool {
        !self.cancelled && self.steps.iter().all(|s| s.result.success)
    }

    /// True when the recipe had no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty() && !self.cancelled
    }

    pub fn succeeded_count(&self) -> usize {
        self.steps.iter().filter(|s| s.result.success).count()
    }

    pub fn failed_count(&self) -> usize {
        self.steps.len() - self.succeeded_count()
    }

    /// Steps that did not succeed.
    pub fn failures(&self) -> impl Iterator<Item = &StepOutcome> {
        self.steps.iter().filter(|s| !s.result.success)
    }
}

impl fmt::Display for RecipeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} step(s): {} succeeded, {} failed in {:.1}s",
            self.steps.len(),
            self.succeeded_count(),
            self.failed_count(),
            self.duration.as_secs_f64()
        )?;
        if self.cancelled {
            write!(f, " (cancelled)")?;
        }
        Ok(())
    }
}

/// Runs recipes step by step, best effort.
///
/// A failed step is logged and the run moves on; nothing is retried or
/// rolled back. Only cancellation stops a run early.
#[derive(Debug, Clone)]
pub struct RecipeRunner {
    executor: StepExecutor,
    store: Arc<RecipeStore>,
}

impl RecipeRunner {
    pub fn new(executor: StepExecutor, store: Arc<RecipeStore>) -> Self {
        Self { executor, store }
    }

    pub fn executor(&self) -> &StepExecutor {
        &self.executor
    }

    pub fn store(&self) -> &RecipeStore {
        &self.store
    }

    /// Run a recipe to completion.
    ///
    /// # Errors
    ///
    /// Returns `RecipeParseError` if the recipe file is malformed. A missing
    /// recipe is an empty run.
    pub fn run(
        &self,
        source: impl Into<RecipeSource>,
        progress: Option<&dyn ProgressSink>,
    ) -> Result<RecipeReport> {
        self.run_with_cancel(source, progress, &CancelToken::new())
    }

    /// Run a recipe, stopping before the next step once `cancel` is set.
    pub fn run_with_cancel(
        &self,
        source: impl Into<RecipeSource>,
        progress: Option<&dyn ProgressSink>,
        cancel: &CancelToken,
    ) -> Result<RecipeReport> {
        let source = source.into();
        let start = Instant::now();
        let mut report = RecipeReport::new(source.label());

        let steps = match source {
            RecipeSource::Path(path) => self.store.load(&path)?,
            RecipeSource::Steps(steps) => steps,
        };

        if steps.is_empty() {
            debug!("Recipe {} has no steps", report.source);
            return Ok(report);
        }

        let sink = self.executor.state().sink();
        for (index, step) in steps.iter().enumerate() {
            if cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }

            let result = self.executor.execute_with_cancel(step, progress, cancel);
            if !result.success {
                sink.publish_error(format!("Step failed: {}", result.output));
            }

            let cancelled = result.is_cancelled();
            report.steps.push(StepOutcome {
                index,
                display: step.display_text().into_owned(),
                tag: step.tag().to_string(),
                result,
            });

            if cancelled {
                report.cancelled = true;
                break;
            }
        }

        report.duration = start.elapsed();
        info!("Recipe {} finished: {}", report.source, report);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::RunnerState;
    use crate::sink::CollectingObserver;
    use std::fs;
    use tempfile::TempDir;

    fn runner(dry_run: bool, base: &Path) -> (RecipeRunner, Arc<CollectingObserver>) {
        let state = Arc::new(RunnerState::default());
        state.set_dry_run(dry_run);
        let observer = Arc::new(CollectingObserver::new());
        state.sink().attach(observer.clone());
        let store = RecipeStore::new(vec![base.to_path_buf()]).without_packaged();
        (
            RecipeRunner::new(StepExecutor::new(state), Arc::new(store)),
            observer,
        )
    }

    #[test]
    fn continues_past_failed_step() {
        let temp = TempDir::new().unwrap();
        let (runner, log) = runner(false, temp.path());
        let steps = vec![
            Step::shell("echo one").unwrap(),
            Step::shell("exit 1").unwrap(),
            Step::shell("echo three").unwrap(),
        ];

        let report = runner.run(steps, None).unwrap();

        assert_eq!(report.steps.len(), 3);
        assert!(report.steps[0].result.success);
        assert!(!report.steps[1].result.success);
        assert!(report.steps[2].result.success);
        assert_eq!(report.steps[2].result.output, "three");
        assert!(!report.success());
        assert_eq!(report.failed_count(), 1);
        assert!(log.contains("Step failed: "));
    }

    #[test]
    fn missing_recipe_is_empty_run() {
        let temp = TempDir::new().unwrap();
        let (runner, log) = runner(false, temp.path());
        let report = runner.run(PathBuf::from("recipes/nope.yaml"), None).unwrap();
        assert!(report.is_empty());
        assert!(report.success());
        assert!(log.lines().is_empty());
    }

    #[test]
    fn malformed_recipe_is_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("bad.yaml"), "- cmd: [unclosed").unwrap();
        let (runner, _) = runner(false, temp.path());
        assert!(runner.run(PathBuf::from("bad.yaml"), None).is_err());
    }

    #[test]
    fn loads_recipe_from_store() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("clean.yaml"),
            "- cmd: echo a\n  tag: clean_temp\n- cmd: echo b\n  friendly: Second\n",
        )
        .unwrap();
        let (runner, _) = runner(true, temp.path());
        let report = runner.run(Path::new("clean.yaml"), None).unwrap();
        assert_eq!(report.steps.len(), 2);
        assert_eq!(report.steps[0].tag, "clean_temp");
        assert_eq!(report.steps[1].display, "Second");
        assert!(report.success());
        assert!(report.source.contains("clean.yaml"));
    }

    #[test]
    fn dry_run_reports_every_step() {
        let temp = TempDir::new().unwrap();
        let (runner, log) = runner(true, temp.path());
        let steps = vec![Step::shell("exit 1").unwrap(), Step::shell("exit 2").unwrap()];
        let report = runner.run(steps, None).unwrap();
        assert!(report.success());
        assert!(report.steps.iter().all(|s| s.result.output == "Dry run"));
        assert_eq!(
            log.lines().iter().filter(|l| l.starts_with("[DRY]")).count(),
            2
        );
    }

    #[test]
    fn cancelled_before_start_runs_nothing() {
        let temp = TempDir::new().unwrap();
        let (runner, _) = runner(false, temp.path());
        let cancel = CancelToken::new();
        cancel.cancel();
        let report = runner
            .run_with_cancel(vec![Step::shell("echo x").unwrap()], None, &cancel)
            .unwrap();
        assert!(report.cancelled);
        assert!(report.steps.is_empty());
        assert!(!report.success());
    }

    #[test]
    fn progress_sees_each_step() {
        let temp = TempDir::new().unwrap();
        let (runner, _) = runner(true, temp.path());
        let seen = std::sync::Mutex::new(Vec::new());
        let progress = |text: &str| seen.lock().unwrap().push(text.to_string());
        let steps = vec![
            Step::shell("a").unwrap().with_friendly("First"),
            Step::shell("b").unwrap().with_friendly("Second"),
        ];
        runner.run(steps, Some(&progress)).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec!["First", "Second"]);
    }

    #[test]
    fn summary_line() {
        let report = RecipeReport::new("x".into());
        assert!(report.to_string().starts_with("0 step(s): 0 succeeded, 0 failed"));
    }
}
