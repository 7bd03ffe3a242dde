use std::cell::RefCell;
use std::rc::Rc;

use crate::api::RepositoryLocator;
use crate::cli::commands::{current_user, BuiltinCommand, Command, CommandMetadata, Dependency};
use crate::cli::flags::{bool_flag, FlagContext};
use crate::config::ConfigRepository;
use crate::error::Result;
use crate::requirements::{Requirement, RequirementFactory, TargetedOrgRequirement};
use crate::ui::SharedUi;

/// `cf delete-space-quota SPACE_QUOTA [-f]`.
pub struct DeleteSpaceQuota {
    ui: SharedUi,
    config: Rc<RefCell<ConfigRepository>>,
    locator: RepositoryLocator,
    org_req: Option<Rc<TargetedOrgRequirement>>,
}

impl BuiltinCommand for DeleteSpaceQuota {
    fn meta() -> CommandMetadata {
        CommandMetadata::new(
            "delete-space-quota",
            "Delete a space quota definition and unassign the space quota from all spaces",
            "cf delete-space-quota SPACE_QUOTA [-f]",
        )
        .flag(bool_flag("f", "Force delete (do not prompt for confirmation)"))
    }

    fn new(deps: Dependency) -> Self {
        Self {
            ui: deps.ui,
            config: deps.config,
            locator: deps.repo_locator,
            org_req: None,
        }
    }
}

impl Command for DeleteSpaceQuota {
    fn metadata(&self) -> CommandMetadata {
        Self::meta()
    }

    fn requirements(
        &mut self,
        factory: &dyn RequirementFactory,
        flags: &FlagContext,
    ) -> Result<Vec<Rc<dyn Requirement>>> {
        let org_req = factory.new_targeted_org_requirement();
        self.org_req = Some(org_req.clone());

        let mut reqs = vec![
            factory.new_number_of_arguments_requirement(flags.args(), 1, &Self::meta().usage),
            factory.new_login_requirement(),
        ];
        reqs.push(org_req);
        Ok(reqs)
    }

    fn execute(&mut self, flags: &FlagContext) -> Result<()> {
        let name = &flags.args()[0];
        let org = match &self.org_req {
            Some(req) => req.organization_fields()?,
            None => self.config.borrow().organization_fields(),
        };

        if !flags.bool("f") && !self.ui.borrow_mut().confirm_delete("quota", name)? {
            return Ok(());
        }

        self.ui.borrow_mut().say(&format!(
            "Deleting space quota {} as {}...",
            name,
            current_user(&self.config)
        ));

        let repo = self.locator.space_quota_repository();
        let quota = match repo.find_by_name_and_org_guid(name, &org.guid) {
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
