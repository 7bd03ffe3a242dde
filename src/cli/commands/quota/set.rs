use std::cell::RefCell;
use std::rc::Rc;

use crate::api::RepositoryLocator;
use crate::cli::commands::{current_user, BuiltinCommand, Command, CommandMetadata, Dependency};
use crate::cli::flags::FlagContext;
use crate::config::ConfigRepository;
use crate::error::{CfError, Result};
use crate::requirements::{arity_message, OrganizationRequirement, Requirement, RequirementFactory};
use crate::ui::SharedUi;

/// `cf set-quota ORG QUOTA`: assign a quota to an org.
pub struct SetQuota {
    ui: SharedUi,
    config: Rc<RefCell<ConfigRepository>>,
    locator: RepositoryLocator,
    org_req: Option<Rc<OrganizationRequirement>>,
}

impl BuiltinCommand for SetQuota {
    fn meta() -> CommandMetadata {
        CommandMetadata::new("set-quota", "Assign a quota to an org", "cf set-quota ORG QUOTA")
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

impl Command for SetQuota {
    fn metadata(&self) -> CommandMetadata {
        Self::meta()
    }

    fn requirements(
        &mut self,
        factory: &dyn RequirementFactory,
        flags: &FlagContext,
    ) -> Result<Vec<Rc<dyn Requirement>>> {
        if flags.args().len() != 2 {
            return Err(CfError::usage(arity_message(2), Self::meta().usage));
        }

        let org_req = factory.new_organization_requirement(&flags.args()[0]);
        self.org_req = Some(org_req.clone());

        let mut reqs = vec![factory.new_login_requirement()];
        reqs.push(org_req);
        Ok(reqs)
    }

    fn execute(&mut self, flags: &FlagContext) -> Result<()> {
        let org = match &self.org_req {
            Some(req) => req.organization()?,
            None => return Err(CfError::usage(arity_message(2), Self::meta().usage)),
        };
        let quota = self
            .locator
            .quota_repository()
            .find_by_name(&flags.args()[1])?;

        self.ui.borrow_mut().say(&format!(
            "Setting quota {} to org {} as {}...",
            quota.name,
            org.name,
            current_user(&self.config)
        ));
        self.locator
            .quota_repository()
            .assign_quota_to_org(&org.guid, &quota.guid)?;
        self.ui.borrow_mut().ok();
        Ok(())
    }
}
