//! Explain command implementation.
//!
//! `tuneup explain [tag]` prints what a step tag does.

use crate::cli::args::ExplainArgs;
use crate::error::Result;
use crate::recipe::{explain, EXPLANATIONS};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The explain command implementation.
pub struct ExplainCommand {
    args: ExplainArgs,
}

impl ExplainCommand {
    pub fn new(args: ExplainArgs) -> Self {
        Self { args }
    }
}

impl Command for ExplainCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &self.args.tag {
            Some(tag) => ui.message(&explain(tag)),
            None => {
                for (tag, text) in EXPLANATIONS {
                    ui.message(&format!("{:<20} {}", tag, text));
                }
            }
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;

    #[test]
    fn explains_single_tag() {
        let mut ui = MockUI::new();
        ExplainCommand::new(ExplainArgs {
            tag: Some("scan_sfc".into()),
        })
        .execute(&mut ui)
        .unwrap();
        assert_eq!(
            ui.messages(),
            ["Checking system files for corruption (SFC).".to_string()]
        );
    }

    #[test]
    fn unknown_tag_uses_fallback() {
        let mut ui = MockUI::new();
        ExplainCommand::new(ExplainArgs {
            tag: Some("mystery".into()),
        })
        .execute(&mut ui)
        .unwrap();
        assert!(ui.has_message("Running action: mystery"));
    }

    #[test]
    fn lists_every_tag() {
        let mut ui = MockUI::new();
        ExplainCommand::new(ExplainArgs::default())
            .execute(&mut ui)
            .unwrap();
        assert_eq!(ui.messages().len(), EXPLANATIONS.len());
    }
}
