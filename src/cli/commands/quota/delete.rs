use std::cell::RefCell;
use std::rc::Rc;

use crate::api::RepositoryLocator;
use crate::cli::commands::{current_user, BuiltinCommand, Command, CommandMetadata, Dependency};
use crate::cli::flags::{bool_flag, FlagContext};
use crate::config::ConfigRepository;
use crate::error::Result;
use crate::requirements::{Requirement, RequirementFactory};
use crate::ui::SharedUi;

/// `cf delete-quota QUOTA [-f]`.
pub struct DeleteQuota {
    ui: SharedUi,
    config: Rc<RefCell<ConfigRepository>>,
    locator: RepositoryLocator,
}

impl BuiltinCommand for DeleteQuota {
    fn meta() -> CommandMetadata {
        CommandMetadata::new("delete-quota", "Delete a quota", "cf delete-quota QUOTA [-f]")
            .flag(bool_flag("f", "Force deletion without confirmation"))
    }

    fn new(deps: Dependency) -> Self {
        Self {
            ui: deps.ui,
            config: deps.config,
            locator: deps.repo_locator,
        }
    }
}

impl Command for DeleteQuota {
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

        if !flags.bool("f") && !self.ui.borrow_mut().confirm_delete("quota", name)? {
            return Ok(());
        }

        self.ui.borrow_mut().say(&format!(
            "Deleting quota {} as {}...",
            name,
            current_user(&self.config)
        ));

        let repo = self.locator.quota_repository();
        let quota = match repo.find_by_name(name) {
            Ok(quota) => quota,
            Err(err) if err.is_not_found() => {
                let mut ui = self.ui.borrow_mut();
                ui.ok();
                ui.warn(&format!("Quota {} does not exist", name));
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        repo.delete(&quota.guid)?;
        self.ui.borrow_mut().ok();
        Ok(())
    }
}
