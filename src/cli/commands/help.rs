//! `cf help [COMMAND]`.

use std::rc::Rc;

use crate::cli::flags::FlagContext;
use crate::cli::registry::CommandRegistry;
use crate::error::{CfError, Result};
use crate::requirements::{Requirement, RequirementFactory};
use crate::ui::SharedUi;

use super::{Command, CommandMetadata};

fn meta() -> CommandMetadata {
    CommandMetadata::new("help", "Show help", "cf help [COMMAND]").alias("h")
}

/// Register `help` with a snapshot of everything registered so far.
pub fn register(registry: &mut CommandRegistry) {
    let mut commands = registry.metadatas();
    commands.push(meta());
    commands.sort_by(|a, b| a.name.cmp(&b.name));
    let commands = Rc::new(commands);

    registry.register_with(meta(), move |deps| {
        Box::new(HelpCommand {
            ui: deps.ui,
            commands: commands.clone(),
        })
    });
}

pub struct HelpCommand {
    ui: SharedUi,
    commands: Rc<Vec<CommandMetadata>>,
}

impl HelpCommand {
    fn overview(&self) -> String {
        let width = self
            .commands
            .iter()
            .map(|meta| meta.name.len())
            .max()
            .unwrap_or(0);

        let mut text = format!(
            "cf version {}\n\nUSAGE:\n   cf [global options] command [arguments...] [command options]\n\nCOMMANDS:",
            env!("CARGO_PKG_VERSION")
        );
        for meta in self.commands.iter() {
            text.push_str(&format!(
                "\n   {:width$}   {}",
                meta.name,
                meta.description,
                width = width
            ));
        }
        text.push_str("\n\nGLOBAL OPTIONS:\n   --debug      Print debug logs\n   --no-color   Disable colored output");
        text.push_str("\n\nUse 'cf help COMMAND' for more information about a command.");
        text
    }
}

impl Command for HelpCommand {
    fn metadata(&self) -> CommandMetadata {
        meta()
    }

    fn requirements(
        &mut self,
        _factory: &dyn RequirementFactory,
        _flags: &FlagContext,
    ) -> Result<Vec<Rc<dyn Requirement>>> {
        Ok(Vec::new())
    }

    fn execute(&mut self, flags: &FlagContext) -> Result<()> {
        let text = match flags.args().first() {
            None => self.overview(),
            Some(name) => self
                .commands
                .iter()
                .find(|meta| meta.answers_to(name))
                .map(CommandMetadata::help_text)
                .ok_or_else(|| CfError::CommandNotFound { name: name.clone() })?,
        };
        self.ui.borrow_mut().say(&text);
        Ok(())
    }
}
