use std::cell::RefCell;
use std::rc::Rc;

use crate::api::RepositoryLocator;
use crate::cli::commands::{current_user, BuiltinCommand, Command, CommandMetadata, Dependency};
use crate::cli::flags::FlagContext;
use crate::config::ConfigRepository;
use crate::error::{CfError, Result};
use crate::requirements::{arity_message, Requirement, RequirementFactory, TargetedOrgRequirement};
use crate::ui::SharedUi;

/// `cf set-space-quota SPACE SPACE_QUOTA`.
pub struct SetSpaceQuota {
    ui: SharedUi,
    config: Rc<RefCell<ConfigRepository>>,
    locator: RepositoryLocator,
    org_req: Option<Rc<TargetedOrgRequirement>>,
}

impl BuiltinCommand for SetSpaceQuota {
    fn meta() -> CommandMetadata {
        CommandMetadata::new(
            "set-space-quota",
            "Assign a space quota definition to a space",
            "cf set-space-quota SPACE_NAME SPACE_QUOTA_NAME",
        )
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

impl Command for SetSpaceQuota {
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

        let org_req = factory.new_targeted_org_requirement();
        self.org_req = Some(org_req.clone());

        let mut reqs = vec![factory.new_login_requirement()];
        reqs.push(org_req);
        Ok(reqs)
    }

    fn execute(&mut self, flags: &FlagContext) -> Result<()> {
        let (space_name, quota_name) = (&flags.args()[0], &flags.args()[1]);
        let org = match &self.org_req {
            Some(req) => req.organization_fields()?,
            None => self.config.borrow().organization_fields(),
        };

        self.ui.borrow_mut().say(&format!(
            "Assigning space quota {} to space {} as {}...",
            quota_name,
            space_name,
            current_user(&self.config)
        ));

        let space = self
            .locator
            .space_repository()
            .find_by_name_in_org(space_name, &org.guid)?;
        if space
            .space_quota_definition_guid
            .as_deref()
            .is_some_and(|guid| !guid.is_empty())
        {
            return Err(CfError::InvalidArgument {
                message: "This space already has an assigned space quota.".to_string(),
            });
        }

        let quota = self
            .locator
            .space_quota_repository()
            .find_by_name_and_org_guid(quota_name, &org.guid)?;
        self.locator
            .space_quota_repository()
            .associate_space_with_quota(&space.guid, &quota.guid)?;
        self.ui.borrow_mut().ok();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::commands::test_support::Harness;
    use crate::models::{Space, SpaceQuota};

    fn harness(assigned: Option<&str>) -> Harness {
        let h = Harness::new();
        h.fakes.spaces.spaces.borrow_mut().push(Space {
            guid: "space-guid".into(),
            name: "dev-space".into(),
            organization_guid: "my-org-guid".into(),
            space_quota_definition_guid: assigned.map(String::from),
        });
        h.fakes.space_quotas.quotas.borrow_mut().push(SpaceQuota {
            guid: "quota-guid".into(),
            name: "dev".into(),
            organization_guid: "my-org-guid".into(),
            ..SpaceQuota::default()
        });
        h
    }

    #[test]
    fn associates_space_with_quota() {
        let h = harness(None);

        h.run("set-space-quota", &["dev-space", "dev"]).unwrap();

        assert_eq!(
            *h.fakes.space_quotas.associated.borrow(),
            vec![("space-guid".to_string(), "quota-guid".to_string())]
        );
        assert!(h.has_outputs_in_order(&[
            "Assigning space quota dev to space dev-space as my-user...",
            "OK",
        ]));
    }

    #[test]
    fn space_with_quota_is_rejected() {
        let h = harness(Some("existing-guid"));

        assert!(h.run("set-space-quota", &["dev-space", "dev"]).is_err());
        assert!(h.has_output("This space already has an assigned space quota."));
        assert!(h.fakes.space_quotas.associated.borrow().is_empty());
    }

    #[test]
    fn unknown_space_fails() {
        let h = harness(None);
        assert!(h.run("set-space-quota", &["nope", "dev"]).is_err());
        assert!(h.has_output("Space nope not found"));
    }
}
