//! Apps command implementation.
//!
//! `tuneup apps` lists the application catalog grouped by category.

use std::sync::Arc;

use crate::cli::args::AppsArgs;
use crate::engine::Engine;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The apps command implementation.
pub struct AppsCommand {
    engine: Arc<Engine>,
    args: AppsArgs,
}

impl AppsCommand {
    pub fn new(engine: Arc<Engine>, args: AppsArgs) -> Self {
        Self { engine, args }
    }

    fn wants(&self, category: &str) -> bool {
        self.args
            .category
            .as_deref()
            .is_none_or(|c| c.eq_ignore_ascii_case(category))
    }
}

impl Command for AppsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let catalog = self.engine.apps()?;
        let verbose = ui.output_mode().shows_details();
        let mut shown = 0;

        for (category, apps) in catalog.by_category() {
            if !self.wants(category) {
                continue;
            }
            ui.show_header(category);
            for app in apps {
                let id = app.package_id().unwrap_or("-");
                ui.message(&format!("  {:<16} {:<28} {}", app.key, app.name, id));
                if verbose {
                    if let Some(description) = &app.description {
                        ui.message(&format!("      {}", description));
                    }
                }
                shown += 1;
            }
        }

        if shown == 0 {
            ui.warning("No applications found");
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::recipe::RecipeStore;
    use crate::ui::{MockUI, OutputMode};
    use std::fs;
    use tempfile::TempDir;

    const APPS: &str = r#"{
        "vlc": {"content": "VLC", "category": "Media", "winget": "VideoLAN.VLC", "description": "Player"},
        "legacy": {"content": "Legacy Tool", "category": "Utilities", "winget": "na"}
    }"#;

    fn engine(temp: &TempDir) -> Arc<Engine> {
        fs::create_dir_all(temp.path().join("data")).unwrap();
        fs::write(temp.path().join("data/applications.json"), APPS).unwrap();
        let store = RecipeStore::new(vec![temp.path().to_path_buf()]).without_packaged();
        Arc::new(Engine::new(Settings::default(), store).unwrap())
    }

    #[test]
    fn lists_apps_by_category() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        AppsCommand::new(engine(&temp), AppsArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert_eq!(ui.headers(), ["Media".to_string(), "Utilities".to_string()]);
        assert!(ui.has_message("VideoLAN.VLC"));
        assert!(ui.messages().iter().any(|m| m.contains("Legacy Tool") && m.ends_with('-')));
        assert!(!ui.has_message("Player"));
    }

    #[test]
    fn filters_by_category_case_insensitively() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let args = AppsArgs {
            category: Some("media".into()),
        };
        AppsCommand::new(engine(&temp), args)
            .execute(&mut ui)
            .unwrap();
        assert_eq!(ui.headers(), ["Media".to_string()]);
    }

    #[test]
    fn verbose_shows_descriptions() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::with_mode(OutputMode::Verbose);
        AppsCommand::new(engine(&temp), AppsArgs::default())
            .execute(&mut ui)
            .unwrap();
        assert!(ui.has_message("Player"));
    }

    #[test]
    fn missing_catalog_is_an_error() {
        let temp = TempDir::new().unwrap();
        let store = RecipeStore::new(vec![temp.path().to_path_buf()]).without_packaged();
        let engine = Arc::new(Engine::new(Settings::default(), store).unwrap());
        let mut ui = MockUI::new();
        assert!(AppsCommand::new(engine, AppsArgs::default())
            .execute(&mut ui)
            .is_err());
    }
}
