//! Batch installation through an external package manager.

use std::time::Duration;

use tracing::info;

use crate::catalog::apps::AppCatalog;
use crate::error::{Result, TuneupError};
use crate::recipe::Step;
use crate::shell::CancelToken;
use crate::steps::{ExecutionResult, StepExecutor};

/// Prefix of every line the installer publishes.
pub const APPSTORE_PREFIX: &str = "[AppStore] ";

/// What happened to one selected app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed,
    Failed,
    /// No package id in the catalog.
    Skipped,
}

#[derive(Debug, Clone)]
pub struct AppInstallResult {
    pub key: String,
    pub name: String,
    pub outcome: InstallOutcome,
    /// `None` when nothing was run.
    pub result: Option<ExecutionResult>,
}

/// Result of a batch install.
#[derive(Debug, Clone)]
pub struct InstallReport {
    /// The package source refresh run before any install.
    pub source_update: ExecutionResult,
    pub apps: Vec<AppInstallResult>,
    pub cancelled: bool,
}

impl InstallReport {
    fn count(&self, outcome: InstallOutcome) -> usize {
        self.apps.iter().filter(|a| a.outcome == outcome).count()
    }

    pub fn installed(&self) -> usize {
        self.count(InstallOutcome::Installed)
    }

    pub fn failed(&self) -> usize {
        self.count(InstallOutcome::Failed)
    }

    pub fn skipped(&self) -> usize {
        self.count(InstallOutcome::Skipped)
    }

    /// True when nothing failed and the batch ran to the end.
    ///
    /// A failed source refresh alone does not fail the batch.
    pub fn success(&self) -> bool {
        !self.cancelled && self.failed() == 0
    }
}

/// Installs catalog apps one by one in vector mode.
#[derive(Debug)]
pub struct BatchInstaller<'a> {
    executor: &'a StepExecutor,
    catalog: &'a AppCatalog,
    package_manager: String,
    install_timeout: Duration,
    source_update_timeout: u64,
}

impl<'a> BatchInstaller<'a> {
    pub fn new(executor: &'a StepExecutor, catalog: &'a AppCatalog) -> Self {
        Self {
            executor,
            catalog,
            package_manager: "winget".to_string(),
            install_timeout: Duration::from_secs(300),
            source_update_timeout: 120,
        }
    }

    pub fn package_manager(mut self, program: impl Into<String>) -> Self {
        self.package_manager = program.into();
        self
    }

    pub fn install_timeout(mut self, timeout: Duration) -> Self {
        self.install_timeout = timeout;
        self
    }

    pub fn source_update_timeout(mut self, secs: u64) -> Self {
        self.source_update_timeout = secs;
        self
    }

    /// Argument vector installing `package_id` silently.
    pub fn install_args(&self, package_id: &str) -> Vec<String> {
        [
            self.package_manager.as_str(),
            "install",
            "--id",
            package_id,
            "--silent",
            "--accept-package-agreements",
            "--accept-source-agreements",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    /// Refresh package sources, then install `keys` in order.
    ///
    /// # Errors
    ///
    /// Returns `ActionFailed` if any key is not in the catalog (nothing is
    /// run in that case).
    pub fn install(&self, keys: &[String], cancel: &CancelToken) -> Result<InstallReport> {
        let unknown: Vec<&str> = keys
            .iter()
            .filter(|k| self.catalog.get(k).is_none())
            .map(String::as_str)
            .collect();
        if !unknown.is_empty() {
            return Err(TuneupError::ActionFailed {
                action: "install".to_string(),
                message: format!("unknown app(s): {}", unknown.join(", ")),
            });
        }

        self.log("Updating Winget sources...");
        let update = Step::shell(format!("{} source update", self.package_manager))?
            .with_friendly("Updating Winget Source")
            .with_timeout(self.source_update_timeout)?;
        let source_update = self.executor.execute_with_cancel(&update, None, cancel);

        let mut report = InstallReport {
            cancelled: source_update.is_cancelled(),
            source_update,
            apps: Vec::new(),
        };

        let total = keys.len();
        for (i, key) in keys.iter().enumerate() {
            if report.cancelled || cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }
            let Some(app) = self.catalog.get(key) else {
                continue;
            };

            self.log(&format!(
                "[{}/{}] Installing {} ({})...",
                i + 1,
                total,
                app.name,
                app.package_id().unwrap_or("na")
            ));

            let Some(package_id) = app.package_id() else {
                self.log("  -> Skipped (No Winget ID)");
                report.apps.push(AppInstallResult {
                    key: key.clone(),
                    name: app.name.clone(),
                    outcome: InstallOutcome::Skipped,
                    result: None,
                });
                continue;
            };

            self.executor
                .state()
                .sink()
                .publish(format!("Installing {} (Native Mode)...", app.name));
            let result =
                self.executor
                    .execute_native(&self.install_args(package_id), self.install_timeout, cancel);

            let outcome = if result.success {
                self.log("  -> Success");
                InstallOutcome::Installed
            } else {
                self.log("  -> Failed");
                InstallOutcome::Failed
            };
            report.cancelled = result.is_cancelled();
            report.apps.push(AppInstallResult {
                key: key.clone(),
                name: app.name.clone(),
                outcome,
                result: Some(result),
            });
        }

        self.log("Batch installation complete.");
        info!(
            "Batch install: {} installed, {} failed, {} skipped",
            report.installed(),
            report.failed(),
            report.skipped()
        );
        Ok(report)
    }

    fn log(&self, text: &str) {
        self.executor
            .state()
            .sink()
            .publish(format!("{}{}", APPSTORE_PREFIX, text));
    }
}
