use std::cell::RefCell;
use std::rc::Rc;

use crate::api::RepositoryLocator;
use crate::cli::commands::quota::{paid_plans, route_ports};
use crate::cli::commands::{current_user, BuiltinCommand, Command, CommandMetadata, Dependency};
use crate::cli::flags::FlagContext;
use crate::config::ConfigRepository;
use crate::error::Result;
use crate::formatters::{limit_or_unlimited, memory_or_unlimited};
use crate::requirements::{Requirement, RequirementFactory, TargetedOrgRequirement};
use crate::ui::SharedUi;

/// `cf space-quota SPACE_QUOTA`.
pub struct ShowSpaceQuota {
    ui: SharedUi,
    config: Rc<RefCell<ConfigRepository>>,
    locator: RepositoryLocator,
    org_req: Option<Rc<TargetedOrgRequirement>>,
}

impl BuiltinCommand for ShowSpaceQuota {
    fn meta() -> CommandMetadata {
        CommandMetadata::new(
            "space-quota",
            "Show space quota info",
            "cf space-quota SPACE_QUOTA",
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

impl Command for ShowSpaceQuota {
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

        self.ui.borrow_mut().say(&format!(
            "Getting space quota {} info as {}...",
            name,
            current_user(&self.config)
        ));
        let quota = self
            .locator
            .space_quota_repository()
            .find_by_name_and_org_guid(name, &org.guid)?;

        let mut ui = self.ui.borrow_mut();
        ui.ok();
        ui.say("");
        ui.print_key_values(&[
            ("total memory limit", memory_or_unlimited(quota.memory_limit)),
            ("instance memory limit", memory_or_unlimited(quota.instance_memory_limit)),
            ("routes", limit_or_unlimited(quota.routes_limit)),
            ("services", limit_or_unlimited(quota.services_limit)),
            ("non basic services", paid_plans(quota.non_basic_services_allowed).to_string()),
            ("app instance limit", limit_or_unlimited(quota.app_instance_limit)),
            ("reserved route ports", route_ports(quota.reserved_route_ports)),
        ]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::commands::test_support::Harness;
    use crate::models::SpaceQuota;

    #[test]
    fn shows_quota_of_targeted_org() {
        let h = Harness::new();
        h.fakes.space_quotas.quotas.borrow_mut().push(SpaceQuota {
            name: "dev".into(),
            memory_limit: 1024,
            services_limit: -1,
            non_basic_services_allowed: true,
            organization_guid: "my-org-guid".into(),
            ..SpaceQuota::default()
        });

        h.run("space-quota", &["dev"]).unwrap();

        assert!(h.has_outputs_in_order(&[
            "Getting space quota dev info as my-user...",
            "OK",
            "total memory limit:      1G",
            "instance memory limit:   unlimited",
            "services:                unlimited",
            "non basic services:      allowed",
        ]));
    }

    #[test]
    fn quota_in_another_org_is_not_found() {
        let h = Harness::new();
        h.fakes.space_quotas.quotas.borrow_mut().push(SpaceQuota {
            name: "dev".into(),
            organization_guid: "other-org-guid".into(),
            ..SpaceQuota::default()
        });

        assert!(h.run("space-quota", &["dev"]).is_err());
        assert!(h.has_output("Space Quota dev not found"));
    }
}
