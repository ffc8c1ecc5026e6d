//! Tool catalog: named one-off steps grouped by category.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Result, TuneupError};
use crate::recipe::{RecipeStore, Step};
use crate::shell::CancelToken;
use crate::steps::{ExecutionResult, StepExecutor};

/// Known tool categories, in display order.
pub const TOOL_CATEGORIES: &[&str] = &["security", "tweaks", "maintenance", "network"];

/// Prefix of every line the tool runner publishes.
pub const TOOLS_PREFIX: &str = "[Tools] ";

const SEPARATOR_WIDTH: usize = 30;

/// Logical path of a category's catalog file.
pub fn tools_path(category: &str) -> PathBuf {
    Path::new("tools").join(format!("{}.yaml", category))
}

/// Loads tool definitions through a [`RecipeStore`].
#[derive(Debug, Clone)]
pub struct ToolCatalog {
    store: Arc<RecipeStore>,
}

impl ToolCatalog {
    pub fn new(store: Arc<RecipeStore>) -> Self {
        Self { store }
    }

    /// Tools of `category`, in file order.
    ///
    /// A category without a file is empty.
    ///
    /// # Errors
    ///
    /// Returns `RecipeParseError` for malformed YAML and `CatalogParseError`
    /// when an entry has no name.
    pub fn list(&self, category: &str) -> Result<Vec<Step>> {
        let path = tools_path(category);
        let tools = self.store.load(&path)?;

        if let Some(pos) = tools.iter().position(|t| t.name().is_none()) {
            return Err(TuneupError::CatalogParseError {
                path,
                message: format!("entry {} has no name", pos + 1),
            });
        }

        Ok(tools)
    }

    /// Find a tool by its name (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `UnknownTool` when no tool in `category` has that name.
    pub fn find(&self, category: &str, name: &str) -> Result<Step> {
        self.list(category)?
            .into_iter()
            .find(|t| t.name().is_some_and(|n| n.eq_ignore_ascii_case(name)))
            .ok_or_else(|| TuneupError::UnknownTool {
                category: category.to_string(),
                name: name.to_string(),
            })
    }
}

/// Run a single tool, framing its output in the log.
pub fn run_tool(executor: &StepExecutor, tool: &Step, cancel: &CancelToken) -> ExecutionResult {
    let sink = executor.state().sink();
    let name = tool.name().unwrap_or_else(|| tool.tag());

    sink.publish(format!("{}--- Running {} ---", TOOLS_PREFIX, name));
    let result = executor.execute_with_cancel(tool, None, cancel);

    let verdict = if result.success { "SUCCESS" } else { "FAILED" };
    sink.publish(format!("{}{}:\n{}", TOOLS_PREFIX, verdict, result.output));
    sink.publish(format!("{}{}", TOOLS_PREFIX, "-".repeat(SEPARATOR_WIDTH)));

    result
}
