//! Install command implementation.
//!
//! `tuneup install [keys...]` installs catalog apps through the package
//! manager. Without keys an interactive terminal gets a checklist.

use std::sync::Arc;

use crate::catalog::AppCatalog;
use crate::cli::args::InstallArgs;
use crate::engine::{Action, Engine};
use crate::error::{Result, TuneupError};
use crate::ui::{PromptOption, UserInterface};

use super::console::run_action;
use super::dispatcher::{Command, CommandResult};
use super::display::show_outcome;

/// The install command implementation.
pub struct InstallCommand {
    engine: Arc<Engine>,
    args: InstallArgs,
}

impl InstallCommand {
    pub fn new(engine: Arc<Engine>, args: InstallArgs) -> Self {
        Self { engine, args }
    }

    fn options(catalog: &AppCatalog) -> Vec<PromptOption> {
        catalog
            .by_category()
            .into_iter()
            .flat_map(|(category, apps)| {
                apps.into_iter()
                    .filter(|app| app.is_installable())
                    .map(move |app| PromptOption {
                        label: format!("[{}] {}", category, app.name),
                        value: app.key.clone(),
                    })
            })
            .collect()
    }

    fn select_keys(&self, ui: &mut dyn UserInterface) -> Result<Vec<String>> {
        if !self.args.keys.is_empty() {
            return Ok(self.args.keys.clone());
        }
        if !ui.is_interactive() {
            return Err(TuneupError::ActionFailed {
                action: "install".to_string(),
                message: "no apps given; pass app keys from `tuneup apps`".to_string(),
            });
        }
        let catalog = self.engine.apps()?;
        ui.multi_select("Select apps to install", &Self::options(&catalog))
    }
}

impl Command for InstallCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let keys = self.select_keys(ui)?;
        if keys.is_empty() {
            ui.warning("Nothing selected");
            return Ok(CommandResult::success());
        }

        let outcome = run_action(
            &self.engine,
            ui,
            Action::InstallApps { keys },
            "Installing applications...",
        )?;
        show_outcome(ui, &outcome);
        Ok(CommandResult::from_success(outcome.success()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::recipe::RecipeStore;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    const APPS: &str = r#"{
        "vlc": {"content": "VLC", "category": "Media", "winget": "VideoLAN.VLC"},
        "legacy": {"content": "Legacy Tool", "category": "Utilities", "winget": "na"}
    }"#;

    fn engine(temp: &TempDir) -> Arc<Engine> {
        fs::create_dir_all(temp.path().join("data")).unwrap();
        fs::write(temp.path().join("data/applications.json"), APPS).unwrap();
        let settings = Settings {
            dry_run: true,
            ..Default::default()
        };
        let store = RecipeStore::new(vec![temp.path().to_path_buf()]).without_packaged();
        Arc::new(Engine::new(settings, store).unwrap())
    }

    #[test]
    fn installs_given_keys() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let args = InstallArgs {
            keys: vec!["vlc".into(), "legacy".into()],
        };

        let result = InstallCommand::new(engine(&temp), args)
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui.has_log_line("Installing VLC (Native Mode)..."));
        assert!(ui.has_log_line("Skipped (No Winget ID)"));
        assert!(ui.successes().iter().any(|s| s.contains("1 skipped")));
    }

    #[test]
    fn non_interactive_without_keys_is_an_error() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let err = InstallCommand::new(engine(&temp), InstallArgs::default())
            .execute(&mut ui)
            .unwrap_err();
        assert!(err.to_string().contains("no apps given"));
    }

    #[test]
    fn interactive_prompt_offers_installable_apps() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        ui.set_interactive(true);
        ui.set_selection(&["vlc"]);

        let result = InstallCommand::new(engine(&temp), InstallArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert_eq!(ui.questions(), ["Select apps to install".to_string()]);
        assert!(ui.has_log_line("[1/1] Installing VLC"));
    }

    #[test]
    fn empty_selection_does_nothing() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        ui.set_interactive(true);
        ui.set_selection(&[]);

        let result = InstallCommand::new(engine(&temp), InstallArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert_eq!(ui.warnings(), ["Nothing selected".to_string()]);
        assert!(ui.log_lines().is_empty());
    }

    #[test]
    fn options_skip_apps_without_package() {
        let temp = TempDir::new().unwrap();
        let catalog = engine(&temp).apps().unwrap();
        let options = InstallCommand::options(&catalog);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].value, "vlc");
        assert_eq!(options[0].label, "[Media] VLC");
    }
}
