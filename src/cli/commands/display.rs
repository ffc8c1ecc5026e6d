//! Shared rendering of action outcomes.

use crate::catalog::{InstallOutcome, InstallReport};
use crate::engine::{ActionOutcome, NO_COMMANDS};
use crate::runner::RecipeReport;
use crate::steps::ExecutionResult;
use crate::ui::{format_duration, UserInterface};

/// Print the summary for any action outcome.
pub fn show_outcome(ui: &mut dyn UserInterface, outcome: &ActionOutcome) {
    match outcome {
        ActionOutcome::Recipe(report) => show_recipe_report(ui, report),
        ActionOutcome::Step(result) => show_step_result(ui, result),
        ActionOutcome::Install(report) => show_install_report(ui, report),
        ActionOutcome::Diagnostics(lines) => show_diagnostics(ui, lines),
        ActionOutcome::NoCommands => ui.warning(NO_COMMANDS),
    }
}

pub fn show_recipe_report(ui: &mut dyn UserInterface, report: &RecipeReport) {
    for failed in report.failures() {
        ui.error(&format!(
            "  Step {} failed: {} ({})",
            failed.index + 1,
            failed.display,
            failed.result.status
        ));
    }

    let summary = format!("{}: {}", report.source, report);
    if report.success() {
        ui.success(&summary);
    } else if report.cancelled {
        ui.warning(&summary);
    } else {
        ui.error(&summary);
    }
}

/// Diagnostic lines already reach the console log; quiet mode still needs
/// the report itself.
pub fn show_diagnostics(ui: &mut dyn UserInterface, lines: &[String]) {
    if !ui.output_mode().shows_console() {
        for line in lines {
            ui.message(line);
        }
    }
}

pub fn show_step_result(ui: &mut dyn UserInterface, result: &ExecutionResult) {
    let line = format!("{} in {}", result.status, format_duration(result.duration));
    if result.success {
        ui.success(&line);
    } else {
        ui.error(&line);
    }
}

pub fn show_install_report(ui: &mut dyn UserInterface, report: &InstallReport) {
    if ui.output_mode().shows_details() {
        for app in &report.apps {
            let mark = match app.outcome {
                InstallOutcome::Installed => "installed",
                InstallOutcome::Failed => "failed",
                InstallOutcome::Skipped => "skipped",
            };
            ui.message(&format!("  {} ({}): {}", app.name, app.key, mark));
        }
    }

    let summary = format!(
        "{} installed, {} failed, {} skipped",
        report.installed(),
        report.failed(),
        report.skipped()
    );
    if report.success() {
        ui.success(&summary);
    } else {
        ui.error(&summary);
    }
    if !report.source_update.success {
        ui.warning("Package source update failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AppInstallResult;
    use crate::runner::StepOutcome;
    use crate::ui::{MockUI, OutputMode};
    use std::time::Duration;

    fn report(results: Vec<ExecutionResult>) -> RecipeReport {
        RecipeReport {
            source: "recipes/maintenance.yaml".into(),
            steps: results
                .into_iter()
                .enumerate()
                .map(|(index, result)| StepOutcome {
                    index,
                    display: format!("step {}", index + 1),
                    tag: "unknown".into(),
                    result,
                })
                .collect(),
            duration: Duration::from_secs(2),
            cancelled: false,
        }
    }

    #[test]
    fn successful_recipe_is_a_success_line() {
        let mut ui = MockUI::new();
        show_recipe_report(
            &mut ui,
            &report(vec![ExecutionResult::succeeded("ok".into(), Duration::ZERO)]),
        );
        assert_eq!(ui.successes().len(), 1);
        assert!(ui.errors().is_empty());
    }

    #[test]
    fn failed_step_is_listed() {
        let mut ui = MockUI::new();
        show_recipe_report(
            &mut ui,
            &report(vec![
                ExecutionResult::succeeded("ok".into(), Duration::ZERO),
                ExecutionResult::failed(Some(1), "boom".into(), Duration::ZERO),
            ]),
        );
        assert!(ui.has_error("Step 2 failed: step 2"));
        assert!(ui.successes().is_empty());
    }

    #[test]
    fn no_commands_is_a_warning() {
        let mut ui = MockUI::new();
        show_outcome(&mut ui, &ActionOutcome::NoCommands);
        assert_eq!(ui.warnings(), [NO_COMMANDS.to_string()]);
    }

    #[test]
    fn diagnostics_printed_only_when_console_hidden() {
        let lines = vec!["OS: Test".to_string()];

        let mut normal = MockUI::new();
        show_outcome(&mut normal, &ActionOutcome::Diagnostics(lines.clone()));
        assert!(normal.messages().is_empty());

        let mut quiet = MockUI::with_mode(OutputMode::Quiet);
        show_outcome(&mut quiet, &ActionOutcome::Diagnostics(lines));
        assert!(quiet.has_message("OS: Test"));
    }

    #[test]
    fn install_details_only_in_verbose_mode() {
        let install = InstallReport {
            source_update: ExecutionResult::dry_run(),
            apps: vec![AppInstallResult {
                key: "7zip".into(),
                name: "7-Zip".into(),
                outcome: InstallOutcome::Skipped,
                result: None,
            }],
            cancelled: false,
        };

        let mut normal = MockUI::new();
        show_install_report(&mut normal, &install);
        assert!(normal.messages().is_empty());

        let mut verbose = MockUI::with_mode(OutputMode::Verbose);
        show_install_report(&mut verbose, &install);
        assert!(verbose.has_message("7-Zip (7zip): skipped"));
        assert!(verbose.successes()[0].contains("1 skipped"));
    }
}
