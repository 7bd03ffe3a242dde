use std::cell::RefCell;
use std::rc::Rc;

use crate::api::RepositoryLocator;
use crate::cli::commands::quota::{limit_flags, RESERVED_ROUTE_PORTS_VERSION};
use crate::cli::commands::{current_user, BuiltinCommand, Command, CommandMetadata, Dependency};
use crate::cli::flags::FlagContext;
use crate::config::ConfigRepository;
use crate::error::{CfError, Result, SPACE_QUOTA_DEFINITION_NAME_TAKEN};
use crate::formatters::parse_memory_limit;
use crate::models::SpaceQuota;
use crate::requirements::{arity_message, Requirement, RequirementFactory, TargetedOrgRequirement};
use crate::ui::SharedUi;

use super::SPACE_APP_INSTANCE_LIMIT_VERSION;

/// `cf create-space-quota QUOTA`: define a space quota in the targeted org.
pub struct CreateSpaceQuota {
    ui: SharedUi,
    config: Rc<RefCell<ConfigRepository>>,
    locator: RepositoryLocator,
    org_req: Option<Rc<TargetedOrgRequirement>>,
}

impl BuiltinCommand for CreateSpaceQuota {
    fn meta() -> CommandMetadata {
        let mut meta = CommandMetadata::new(
            "create-space-quota",
            "Define a new space resource quota",
            "cf create-space-quota QUOTA [-m TOTAL_MEMORY] [-i INSTANCE_MEMORY] [-r ROUTES] [-s SERVICE_INSTANCES] [-a APP_INSTANCES] [--allow-paid-service-plans] [--reserved-route-ports RESERVED_ROUTE_PORTS]",
        );
        meta.flags = limit_flags();
        meta
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

impl Command for CreateSpaceQuota {
    fn metadata(&self) -> CommandMetadata {
        Self::meta()
    }

    fn requirements(
        &mut self,
        factory: &dyn RequirementFactory,
        flags: &FlagContext,
    ) -> Result<Vec<Rc<dyn Requirement>>> {
        if flags.args().len() != 1 {
            return Err(CfError::usage(arity_message(1), Self::meta().usage));
        }

        let org_req = factory.new_targeted_org_requirement();
        self.org_req = Some(org_req.clone());

        let mut reqs = vec![factory.new_login_requirement()];
        reqs.push(org_req);
        if flags.is_set("a") {
            reqs.push(factory.new_min_api_version_requirement(
                "Option '-a'",
                SPACE_APP_INSTANCE_LIMIT_VERSION,
            ));
        }
        if flags.is_set("reserved-route-ports") {
            reqs.push(factory.new_min_api_version_requirement(
                "Option '--reserved-route-ports'",
                RESERVED_ROUTE_PORTS_VERSION,
            ));
        }
        Ok(reqs)
    }

    fn execute(&mut self, flags: &FlagContext) -> Result<()> {
        let name = flags.args()[0].clone();
        let org = match &self.org_req {
            Some(req) => req.organization_fields()?,
            None => self.config.borrow().organization_fields(),
        };

        self.ui.borrow_mut().say(&format!(
            "Creating space quota {} for org {} as {}...",
            name,
            org.name,
            current_user(&self.config)
        ));

        let mut quota = SpaceQuota {
            name: name.clone(),
            organization_guid: org.guid,
            ..SpaceQuota::default()
        };
        if let Some(memory) = flags.string("m") {
            quota.memory_limit = parse_memory_limit("memory limit", &memory, false)?;
        }
        if let Some(memory) = flags.string("i") {
            quota.instance_memory_limit =
                parse_memory_limit("instance memory limit", &memory, true)?;
        }
        if let Some(routes) = flags.int("r") {
            quota.routes_limit = routes;
        }
        if let Some(services) = flags.int("s") {
            quota.services_limit = services;
        }
        if let Some(instances) = flags.int("a") {
            quota.app_instance_limit = instances;
        }
        if let Some(ports) = flags.int("reserved-route-ports") {
            quota.reserved_route_ports = Some(ports);
        }
        quota.non_basic_services_allowed = flags.bool("allow-paid-service-plans");

        match self.locator.space_quota_repository().create(&quota) {
            Ok(()) => self.ui.borrow_mut().ok(),
            Err(err) if err.error_code() == Some(SPACE_QUOTA_DEFINITION_NAME_TAKEN) => {
                let mut ui = self.ui.borrow_mut();
                ui.ok();
                ui.warn(&format!("Space Quota Definition {} already exists", name));
            }
            Err(err) => return Err(err),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::commands::test_support::Harness;
    use crate::error::CfError;

    #[test]
    fn creates_in_targeted_org() {
        let h = Harness::new();
        h.run("create-space-quota", &["dev", "-m", "2G", "-r", "10", "-a", "4"])
            .unwrap();

        let created = h.fakes.space_quotas.created.borrow();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].name, "dev");
        assert_eq!(created[0].organization_guid, "my-org-guid");
        assert_eq!(created[0].memory_limit, 2048);
        assert_eq!(created[0].routes_limit, 10);
        assert_eq!(created[0].app_instance_limit, 4);
        assert!(h.has_outputs_in_order(&[
            "Creating space quota dev for org my-org as my-user...",
            "OK",
        ]));
    }

    #[test]
    fn app_instance_limit_needs_newer_api() {
        let mut config = crate::cli::commands::test_support::logged_in_config();
        config.set_api_version("2.39.0");
        let h = Harness::with_config(config);

        assert!(h.run("create-space-quota", &["dev", "-a", "4"]).is_err());
        assert!(h.has_output("Option '-a' requires CF API version 2.40.0"));
        assert!(h.fakes.space_quotas.created.borrow().is_empty());
    }

    #[test]
    fn existing_name_is_a_warning() {
        let h = Harness::new();
        h.fakes.space_quotas.failures.set(
            "create",
            CfError::Http {
                status: 400,
                code: "310001".into(),
                description: "The space quota definition name is taken: dev".into(),
            },
        );

        h.run("create-space-quota", &["dev"]).unwrap();

        assert!(h.has_warning("Space Quota Definition dev already exists"));
        assert!(!h.has_output("FAILED"));
    }

    #[test]
    fn needs_exactly_one_argument() {
        let h = Harness::new();
        assert!(matches!(
            h.run("create-space-quota", &[]),
            Err(CfError::IncorrectUsage { .. })
        ));
    }
}
