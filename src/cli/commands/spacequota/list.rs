use std::cell::RefCell;
use std::rc::Rc;

use crate::api::RepositoryLocator;
use crate::cli::commands::quota::limit_columns;
use crate::cli::commands::{current_user, BuiltinCommand, Command, CommandMetadata, Dependency};
use crate::cli::flags::FlagContext;
use crate::config::ConfigRepository;
use crate::error::Result;
use crate::requirements::{Requirement, RequirementFactory, TargetedOrgRequirement};
use crate::ui::SharedUi;

/// `cf space-quotas`: the space quotas of the targeted org.
pub struct ListSpaceQuotas {
    ui: SharedUi,
    config: Rc<RefCell<ConfigRepository>>,
    locator: RepositoryLocator,
    org_req: Option<Rc<TargetedOrgRequirement>>,
}

impl BuiltinCommand for ListSpaceQuotas {
    fn meta() -> CommandMetadata {
        CommandMetadata::new(
            "space-quotas",
            "List available space resource quotas",
            "cf space-quotas",
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

impl Command for ListSpaceQuotas {
    fn metadata(&self) -> CommandMetadata {
        Self::meta()
    }

    fn requirements(
        &mut self,
        factory: &dyn RequirementFactory,
        _flags: &FlagContext,
    ) -> Result<Vec<Rc<dyn Requirement>>> {
        let org_req = factory.new_targeted_org_requirement();
        self.org_req = Some(org_req.clone());

        let mut reqs = vec![factory.new_login_requirement()];
        reqs.push(org_req);
        Ok(reqs)
    }

    fn execute(&mut self, _flags: &FlagContext) -> Result<()> {
        let org = match &self.org_req {
            Some(req) => req.organization_fields()?,
            None => self.config.borrow().organization_fields(),
        };

        self.ui.borrow_mut().say(&format!(
            "Getting space quotas as {}...",
            current_user(&self.config)
        ));
        let quotas = self.locator.space_quota_repository().find_by_org(&org.guid)?;

        let mut ui = self.ui.borrow_mut();
        ui.ok();
        ui.say("");

        let mut table = ui.table(&[
            "name",
            "total memory",
            "instance memory",
            "routes",
            "service instances",
            "paid plans",
            "app instances",
            "route ports",
        ]);
        for quota in &quotas {
            let mut row = vec![quota.name.clone()];
            row.extend(limit_columns(
                quota.memory_limit,
                quota.instance_memory_limit,
                quota.routes_limit,
                quota.services_limit,
                quota.non_basic_services_allowed,
                quota.app_instance_limit,
                quota.reserved_route_ports,
            ));
            table.add_row(row.iter().map(String::as_str).collect());
        }
        ui.print_table(&table);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::commands::test_support::{logged_in_config, Harness};
    use crate::config::OrganizationFields;
    use crate::models::SpaceQuota;

    #[test]
    fn lists_only_quotas_of_the_targeted_org() {
        let h = Harness::new();
        h.fakes.space_quotas.quotas.borrow_mut().extend([
            SpaceQuota {
                name: "dev".into(),
                memory_limit: 2048,
                routes_limit: 5,
                organization_guid: "my-org-guid".into(),
                ..SpaceQuota::default()
            },
            SpaceQuota {
                name: "elsewhere".into(),
                organization_guid: "other-org-guid".into(),
                ..SpaceQuota::default()
            },
        ]);

        h.run("space-quotas", &[]).unwrap();

        let ui = h.ui.borrow();
        let table = &ui.tables()[0];
        assert_eq!(table.row_count(), 1);
        assert_eq!(
            table.rows()[0],
            ["dev", "2G", "unlimited", "5", "0", "disallowed", "unlimited", "0"]
        );
        assert!(ui.has_outputs_in_order(&["Getting space quotas as my-user...", "OK"]));
    }

    #[test]
    fn requires_a_targeted_org() {
        let mut config = logged_in_config();
        config.set_organization_fields(OrganizationFields::default());
        let h = Harness::with_config(config);

        assert!(h.run("space-quotas", &[]).is_err());
        assert!(h.has_output("No org targeted"));
    }
}
