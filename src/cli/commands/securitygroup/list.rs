use std::cell::RefCell;
use std::rc::Rc;

use crate::api::RepositoryLocator;
use crate::cli::commands::{current_user, BuiltinCommand, Command, CommandMetadata, Dependency};
use crate::cli::flags::FlagContext;
use crate::config::ConfigRepository;
use crate::error::Result;
use crate::requirements::{Requirement, RequirementFactory};
use crate::ui::SharedUi;

/// `cf security-groups`: every group with the spaces it is bound to.
pub struct ListSecurityGroups {
    ui: SharedUi,
    config: Rc<RefCell<ConfigRepository>>,
    locator: RepositoryLocator,
}

impl BuiltinCommand for ListSecurityGroups {
    fn meta() -> CommandMetadata {
        CommandMetadata::new(
            "security-groups",
            "List all security groups",
            "cf security-groups",
        )
    }

    fn new(deps: Dependency) -> Self {
        Self {
            ui: deps.ui,
            config: deps.config,
            locator: deps.repo_locator,
        }
    }
}

impl Command for ListSecurityGroups {
    fn metadata(&self) -> CommandMetadata {
        Self::meta()
    }

    fn requirements(
        &mut self,
        factory: &dyn RequirementFactory,
        flags: &FlagContext,
    ) -> Result<Vec<Rc<dyn Requirement>>> {
        Ok(vec![
            factory.new_number_of_arguments_requirement(flags.args(), 0, &Self::meta().usage),
            factory.new_login_requirement(),
        ])
    }

    fn execute(&mut self, _flags: &FlagContext) -> Result<()> {
        self.ui.borrow_mut().say(&format!(
            "Getting security groups as {}",
            current_user(&self.config)
        ));
        let groups = self.locator.security_group_repository().find_all()?;

        let mut ui = self.ui.borrow_mut();
        ui.ok();
        ui.say("");

        if groups.is_empty() {
            ui.say("No security groups");
            return Ok(());
        }

        let mut table = ui.table(&["", "Name", "Organization", "Space"]);
        for (index, group) in groups.iter().enumerate() {
            let position = format!("#{}", index);
            if group.spaces.is_empty() {
                table.add_row(vec![position.as_str(), group.name.as_str(), "", ""]);
                continue;
            }
            // Only the first row of a group carries its index and name.
            for (i, space) in group.spaces.iter().enumerate() {
                let (position, name) = if i == 0 {
                    (position.as_str(), group.name.as_str())
                } else {
                    ("", "")
                };
                table.add_row(vec![position, name, space.organization_name.as_str(), space.name.as_str()]);
            }
        }
        ui.print_table(&table);
        Ok(())
    }
}
