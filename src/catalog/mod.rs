//! Catalogs of tools and installable applications.
//!
//! Both are plain data files resolved through the
//! [`RecipeStore`](crate::recipe::RecipeStore), so a file in a resource
//! directory overrides the packaged copy.

pub mod apps;
pub mod install;
pub mod tools;

pub use apps::{App, AppCatalog, APPS_PATH, DEFAULT_CATEGORY};
pub use install::{
    AppInstallResult, BatchInstaller, InstallOutcome, InstallReport, APPSTORE_PREFIX,
};
pub use tools::{run_tool, tools_path, ToolCatalog, TOOLS_PREFIX, TOOL_CATEGORIES};
