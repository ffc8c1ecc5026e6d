//! Application engine: shared state plus action routing.
//!
//! One [`Engine`] exists per process. Front ends attach their console
//! observer to [`Engine::sink`] before spawning any action, then hand user
//! requests to [`Engine::run`] (blocking) or [`Engine::spawn`] (worker
//! thread).
//!
//! # Example
//!
//! ```
//! use tuneup::config::Settings;
//! use tuneup::engine::{Action, Engine};
//! use tuneup::sink::CollectingObserver;
//! use std::sync::Arc;
//!
//! let settings = Settings { dry_run: true, ..Default::default() };
//! let engine = Engine::from_settings(settings, &std::env::temp_dir()).unwrap();
//! let log = Arc::new(CollectingObserver::new());
//! engine.sink().attach(log.clone());
//!
//! let outcome = engine
//!     .run(Action::Command { command: "echo hi".into() }, None, &Default::default())
//!     .unwrap();
//! assert!(outcome.success());
//! assert!(log.contains("[DRY] echo hi"));
//! ```

pub mod actions;

pub use actions::{
    Action, ActionContext, ActionHandler, ActionKind, ActionOutcome, ActionTable, NO_COMMANDS,
    PANIC_DONE, PANIC_START,
};

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::catalog::{AppCatalog, ToolCatalog};
use crate::config::Settings;
use crate::error::Result;
use crate::recipe::RecipeStore;
use crate::runner::{ActionTask, RecipeRunner, RunnerState};
use crate::shell::CancelToken;
use crate::sink::LogSink;
use crate::steps::{ProgressSink, StepExecutor};

/// Owns the runner state, resource store and action table.
#[derive(Debug)]
pub struct Engine {
    settings: Settings,
    state: Arc<RunnerState>,
    store: Arc<RecipeStore>,
    runner: RecipeRunner,
    tools: ToolCatalog,
    actions: ActionTable,
}

impl Engine {
    /// Create an engine over an explicit resource store.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` if the settings name an unknown code
    /// page.
    pub fn new(settings: Settings, store: RecipeStore) -> Result<Self> {
        let state = Arc::new(RunnerState::from_settings(&settings)?);
        let store = Arc::new(store);
        let executor = StepExecutor::new(Arc::clone(&state));

        Ok(Self {
            runner: RecipeRunner::new(executor, Arc::clone(&store)),
            tools: ToolCatalog::new(Arc::clone(&store)),
            actions: ActionTable::new(),
            settings,
            state,
            store,
        })
    }

    /// Create an engine searching the configured resource directories,
    /// `cwd`, the executable's directory, then the packaged resources.
    pub fn from_settings(settings: Settings, cwd: &Path) -> Result<Self> {
        let store = RecipeStore::discover(&settings.resource_dirs, cwd);
        Self::new(settings, store)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &Arc<RunnerState> {
        &self.state
    }

    pub fn sink(&self) -> &LogSink {
        self.state.sink()
    }

    pub fn store(&self) -> &RecipeStore {
        &self.store
    }

    pub fn runner(&self) -> &RecipeRunner {
        &self.runner
    }

    pub fn executor(&self) -> &StepExecutor {
        self.runner.executor()
    }

    pub fn tools(&self) -> &ToolCatalog {
        &self.tools
    }

    /// Load the application catalog.
    pub fn apps(&self) -> Result<AppCatalog> {
        AppCatalog::load(&self.store)
    }

    pub fn set_dry_run(&self, enabled: bool) {
        self.state.set_dry_run(enabled);
    }

    /// Run an action on the current thread.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown tools or apps and a malformed application
    /// catalog. A recipe or tool catalog that cannot be loaded ends as
    /// [`ActionOutcome::NoCommands`]; step failures are part of the outcome.
    pub fn run(
        &self,
        action: Action,
        progress: Option<&dyn ProgressSink>,
        cancel: &CancelToken,
    ) -> Result<ActionOutcome> {
        info!("Running action {}", action.kind());
        let ctx = ActionContext { progress, cancel };
        self.actions.dispatch(self, action, &ctx)
    }

    /// Run an action on a named worker thread.
    ///
    /// The returned task can be cancelled; cancellation reaches the running
    /// child process. Errors raised by the action are published to the sink
    /// as well as returned from [`ActionTask::join`].
    pub fn spawn(
        self: &Arc<Self>,
        action: Action,
        progress: Option<Arc<dyn ProgressSink>>,
    ) -> Result<ActionTask<Result<ActionOutcome>>> {
        let engine = Arc::clone(self);
        ActionTask::spawn(action.kind().name(), move |cancel| {
            let outcome = engine.run(action, progress.as_deref(), &cancel);
            if let Err(e) = &outcome {
                engine.sink().publish_error(format!("Error: {}", e));
            }
            outcome
        })
    }
}
