use std::cell::RefCell;
use std::rc::Rc;

use crate::api::RepositoryLocator;
use crate::cli::commands::{current_user, BuiltinCommand, Command, CommandMetadata, Dependency};
use crate::cli::flags::FlagContext;
use crate::config::ConfigRepository;
use crate::error::Result;
use crate::requirements::{Requirement, RequirementFactory};
use crate::ui::SharedUi;

/// `cf security-group SECURITY_GROUP`: rules and bound spaces of one group.
pub struct ShowSecurityGroup {
    ui: SharedUi,
    config: Rc<RefCell<ConfigRepository>>,
    locator: RepositoryLocator,
}

impl BuiltinCommand for ShowSecurityGroup {
    fn meta() -> CommandMetadata {
        CommandMetadata::new(
            "security-group",
            "Show a single security group",
            "cf security-group SECURITY_GROUP",
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

impl Command for ShowSecurityGroup {
    fn metadata(&self) -> CommandMetadata {
        Self::meta()
    }

    fn requirements(
        &mut self,
        factory: &dyn RequirementFactory,
        flags: &FlagContext,
    ) -> Result<Vec<Rc<dyn Requirement>>> {
        Ok(vec![
            factory.new_number_of_arguments_requirement(flags.args(), 1, &Self::meta().usage),
            factory.new_login_requirement(),
        ])
    }

    fn execute(&mut self, flags: &FlagContext) -> Result<()> {
        let name = &flags.args()[0];
        self.ui.borrow_mut().say(&format!(
            "Getting info for security group {} as {}",
            name,
            current_user(&self.config)
        ));
        let group = self.locator.security_group_repository().read(name)?;
        let rules = serde_json::to_string_pretty(&group.rules)?;

        let mut ui = self.ui.borrow_mut();
        ui.ok();
        ui.say("");
        ui.print_key_values(&[("Name", group.name.clone()), ("Rules", String::new())]);
        for line in rules.lines() {
            ui.say(&format!("\t{}", line));
        }
        ui.say("");

        if group.spaces.is_empty() {
            ui.say("No spaces assigned");
            return Ok(());
        }

        let mut table = ui.table(&["", "Organization", "Space"]);
        for (index, space) in group.spaces.iter().enumerate() {
            let position = format!("#{}", index);
            table.add_row(vec![
                position.as_str(),
                space.organization_name.as_str(),
                space.name.as_str(),
            ]);
        }
        ui.print_table(&table);
        Ok(())
    }
}
