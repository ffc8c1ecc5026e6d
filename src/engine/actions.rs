//! User actions and their handlers.
//!
//! Every user-triggered operation is an [`Action`]. Handlers are plain
//! functions registered per [`ActionKind`] in an [`ActionTable`], built once
//! when the [`Engine`](super::Engine) is created.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::catalog::{run_tool, BatchInstaller, InstallReport};
use crate::diagnose::{
    process_lines, startup_step, top_processes, DiagnoseView, SystemOverview, DIAGNOSE_PREFIX,
    STARTUP_QUERY, TOP_PROCESSES,
};
use crate::error::{Result, TuneupError};
use crate::recipe::Step;
use crate::runner::RecipeReport;
use crate::shell::CancelToken;
use crate::steps::{ExecutionResult, ProgressSink};

use super::Engine;

/// Progress text shown before the panic recipe starts.
pub const PANIC_START: &str = "Starting maintenance...";

/// Progress text shown after the panic recipe finishes.
pub const PANIC_DONE: &str = "All done! System cleaned.";

/// Message published when an action has nothing to run.
pub const NO_COMMANDS: &str = "No commands found";

/// A user-triggered operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Run the configured maintenance recipe.
    PanicButton,
    RunRecipe { path: PathBuf },
    RunTool { category: String, name: String },
    /// A raw command line typed by the user.
    Command { command: String },
    InstallApps { keys: Vec<String> },
    Diagnose { view: DiagnoseView },
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::PanicButton => ActionKind::PanicButton,
            Action::RunRecipe { .. } => ActionKind::RunRecipe,
            Action::RunTool { .. } => ActionKind::RunTool,
            Action::Command { .. } => ActionKind::Command,
            Action::InstallApps { .. } => ActionKind::InstallApps,
            Action::Diagnose { .. } => ActionKind::Diagnose,
        }
    }
}

/// Payload-free discriminant of [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    PanicButton,
    RunRecipe,
    RunTool,
    Command,
    InstallApps,
    Diagnose,
}

impl ActionKind {
    pub const ALL: [ActionKind; 6] = [
        ActionKind::PanicButton,
        ActionKind::RunRecipe,
        ActionKind::RunTool,
        ActionKind::Command,
        ActionKind::InstallApps,
        ActionKind::Diagnose,
    ];

    /// Short name, also used for worker thread names.
    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::PanicButton => "panic-button",
            ActionKind::RunRecipe => "run-recipe",
            ActionKind::RunTool => "run-tool",
            ActionKind::Command => "command",
            ActionKind::InstallApps => "install-apps",
            ActionKind::Diagnose => "diagnose",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What an action produced.
#[derive(Debug, Clone)]
pub enum ActionOutcome {
    Recipe(RecipeReport),
    Step(ExecutionResult),
    Install(InstallReport),
    /// Lines of a read-only system report.
    Diagnostics(Vec<String>),
    /// The recipe or tool category had no steps.
    NoCommands,
}

impl ActionOutcome {
    pub fn success(&self) -> bool {
        match self {
            ActionOutcome::Recipe(report) => report.success(),
            ActionOutcome::Step(result) => result.success,
            ActionOutcome::Install(report) => report.success(),
            ActionOutcome::Diagnostics(_) => true,
            ActionOutcome::NoCommands => false,
        }
    }
}

/// Per-run inputs handed to a handler.
pub struct ActionContext<'a> {
    pub progress: Option<&'a dyn ProgressSink>,
    pub cancel: &'a CancelToken,
}

impl<'a> ActionContext<'a> {
    fn report(&self, text: &str) {
        if let Some(progress) = self.progress {
            progress.report(text);
        }
    }
}

/// Handler signature shared by every action kind.
pub type ActionHandler = fn(&Engine, Action, &ActionContext<'_>) -> Result<ActionOutcome>;

/// Maps each [`ActionKind`] to its handler.
#[derive(Clone)]
pub struct ActionTable {
    handlers: HashMap<ActionKind, ActionHandler>,
}

impl fmt::Debug for ActionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionTable")
            .field("kinds", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for ActionTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionTable {
    /// Table with the built-in handler for every kind.
    pub fn new() -> Self {
        let mut handlers: HashMap<ActionKind, ActionHandler> = HashMap::new();
        handlers.insert(ActionKind::PanicButton, panic_button);
        handlers.insert(ActionKind::RunRecipe, run_recipe);
        handlers.insert(ActionKind::RunTool, run_tool_action);
        handlers.insert(ActionKind::Command, run_command);
        handlers.insert(ActionKind::InstallApps, install_apps);
        handlers.insert(ActionKind::Diagnose, diagnose);
        Self { handlers }
    }

    pub fn handler(&self, kind: ActionKind) -> Option<ActionHandler> {
        self.handlers.get(&kind).copied()
    }

    /// Route `action` to its handler.
    ///
    /// # Errors
    ///
    /// Returns `ActionFailed` if no handler is registered, else whatever the
    /// handler returns.
    pub fn dispatch(
        &self,
        engine: &Engine,
        action: Action,
        ctx: &ActionContext<'_>,
    ) -> Result<ActionOutcome> {
        let kind = action.kind();
        let handler = self
            .handler(kind)
            .ok_or_else(|| TuneupError::ActionFailed {
                action: kind.to_string(),
                message: "no handler registered".to_string(),
            })?;
        debug!("Dispatching {}", kind);
        handler(engine, action, ctx)
    }
}

fn recipe_outcome(engine: &Engine, report: RecipeReport) -> ActionOutcome {
    if report.is_empty() {
        engine.sink().publish(NO_COMMANDS);
        ActionOutcome::NoCommands
    } else {
        ActionOutcome::Recipe(report)
    }
}

/// A recipe or catalog that cannot be loaded leaves the action with nothing
/// to run. The cause is logged and the action ends as [`ActionOutcome::NoCommands`].
fn load_failed(engine: &Engine, err: TuneupError) -> ActionOutcome {
    warn!("{}", err);
    engine.sink().publish_error(format!("Error: {}", err));
    engine.sink().publish(NO_COMMANDS);
    ActionOutcome::NoCommands
}

fn panic_button(engine: &Engine, _action: Action, ctx: &ActionContext<'_>) -> Result<ActionOutcome> {
    ctx.report(PANIC_START);
    let report = match engine.runner().run_with_cancel(
        engine.settings().panic_recipe.clone(),
        ctx.progress,
        ctx.cancel,
    ) {
        Ok(report) => report,
        Err(e) => return Ok(load_failed(engine, e)),
    };
    ctx.report(PANIC_DONE);
    Ok(recipe_outcome(engine, report))
}

fn run_recipe(engine: &Engine, action: Action, ctx: &ActionContext<'_>) -> Result<ActionOutcome> {
    let Action::RunRecipe { path } = action else {
        return Err(mismatch(ActionKind::RunRecipe));
    };
    match engine
        .runner()
        .run_with_cancel(path, ctx.progress, ctx.cancel)
    {
        Ok(report) => Ok(recipe_outcome(engine, report)),
        Err(e) => Ok(load_failed(engine, e)),
    }
}

fn run_tool_action(
    engine: &Engine,
    action: Action,
    ctx: &ActionContext<'_>,
) -> Result<ActionOutcome> {
    let Action::RunTool { category, name } = action else {
        return Err(mismatch(ActionKind::RunTool));
    };
    let tools = match engine.tools().list(&category) {
        Ok(tools) => tools,
        Err(e) => return Ok(load_failed(engine, e)),
    };
    if tools.is_empty() {
        engine.sink().publish(NO_COMMANDS);
        return Ok(ActionOutcome::NoCommands);
    }
    let tool = engine.tools().find(&category, &name)?;
    ctx.report(&tool.display_text());
    let result = run_tool(engine.executor(), &tool, ctx.cancel);
    Ok(ActionOutcome::Step(result))
}

fn run_command(engine: &Engine, action: Action, ctx: &ActionContext<'_>) -> Result<ActionOutcome> {
    let Action::Command { command } = action else {
        return Err(mismatch(ActionKind::Command));
    };
    let step = Step::interactive(&command, engine.settings().command_timeout)?;
    let result = engine
        .executor()
        .execute_with_cancel(&step, ctx.progress, ctx.cancel);
    Ok(ActionOutcome::Step(result))
}

fn install_apps(engine: &Engine, action: Action, ctx: &ActionContext<'_>) -> Result<ActionOutcome> {
    let Action::InstallApps { keys } = action else {
        return Err(mismatch(ActionKind::InstallApps));
    };
    let catalog = engine.apps()?;
    let settings = engine.settings();
    ctx.report("Installing applications...");
    let report = BatchInstaller::new(engine.executor(), &catalog)
        .package_manager(settings.package_manager.clone())
        .install_timeout(std::time::Duration::from_secs(settings.install_timeout))
        .source_update_timeout(settings.source_update_timeout)
        .install(&keys, ctx.cancel)?;
    Ok(ActionOutcome::Install(report))
}

fn diagnose(engine: &Engine, action: Action, ctx: &ActionContext<'_>) -> Result<ActionOutcome> {
    let Action::Diagnose { view } = action else {
        return Err(mismatch(ActionKind::Diagnose));
    };
    let lines = match view {
        DiagnoseView::Overview => {
            ctx.report("Reading system specs...");
            SystemOverview::collect().lines()
        }
        DiagnoseView::Processes => {
            ctx.report("Scanning processes...");
            process_lines(&top_processes(TOP_PROCESSES))
        }
        DiagnoseView::Startup => {
            ctx.report(STARTUP_QUERY);
            let result = engine
                .executor()
                .execute_with_cancel(&startup_step()?, None, ctx.cancel);
            return Ok(ActionOutcome::Step(result));
        }
    };
    for line in &lines {
        engine.sink().publish(format!("{}{}", DIAGNOSE_PREFIX, line));
    }
    Ok(ActionOutcome::Diagnostics(lines))
}

fn mismatch(kind: ActionKind) -> TuneupError {
    TuneupError::ActionFailed {
        action: kind.to_string(),
        message: "handler received a different action".to_string(),
    }
}
