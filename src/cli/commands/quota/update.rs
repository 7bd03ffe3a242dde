use std::cell::RefCell;
use std::rc::Rc;

use crate::api::RepositoryLocator;
use crate::cli::commands::{current_user, BuiltinCommand, Command, CommandMetadata, Dependency};
use crate::cli::flags::{bool_flag, string_flag, FlagContext};
use crate::config::ConfigRepository;
use crate::error::{CfError, Result};
use crate::formatters::parse_memory_limit;
use crate::requirements::{arity_message, Requirement, RequirementFactory};
use crate::ui::SharedUi;

use super::{limit_flags, APP_INSTANCE_LIMIT_VERSION, RESERVED_ROUTE_PORTS_VERSION};

/// `cf update-quota QUOTA`: change limits or the name of an org quota.
pub struct UpdateQuota {
    ui: SharedUi,
    config: Rc<RefCell<ConfigRepository>>,
    locator: RepositoryLocator,
}

impl BuiltinCommand for UpdateQuota {
    fn meta() -> CommandMetadata {
        let mut meta = CommandMetadata::new(
            "update-quota",
            "Update an existing resource quota",
            "cf update-quota QUOTA [-m TOTAL_MEMORY] [-i INSTANCE_MEMORY] [-n NEW_NAME] [-r ROUTES] [-s SERVICE_INSTANCES] [-a APP_INSTANCES] [--allow-paid-service-plans | --disallow-paid-service-plans] [--reserved-route-ports RESERVED_ROUTE_PORTS]",
        );
        meta.flags = limit_flags();
        meta.flags
            .push(string_flag("n", "NEW_NAME", "New name"));
        meta.flags.push(bool_flag(
            "disallow-paid-service-plans",
            "Cannot provision instances of paid service plans",
        ));
        meta
    }

    fn new(deps: Dependency) -> Self {
        Self {
            ui: deps.ui,
            config: deps.config,
            locator: deps.repo_locator,
        }
    }
}

impl Command for UpdateQuota {
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

        let mut reqs = vec![factory.new_login_requirement()];
        if flags.is_set("a") {
            reqs.push(factory.new_min_api_version_requirement("Option '-a'", APP_INSTANCE_LIMIT_VERSION));
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
        let allow = flags.bool("allow-paid-service-plans");
        let disallow = flags.bool("disallow-paid-service-plans");
        if allow && disallow {
            return Err(CfError::InvalidArgument {
                message: "Please choose either allow or disallow. Both flags are not permitted to be passed in the same command.".to_string(),
            });
        }

        let name = &flags.args()[0];
        let repo = self.locator.quota_repository();
        let mut quota = repo.find_by_name(name)?;

        let usage = Self::meta().usage;
        if let Some(memory) = flags.string("m") {
            quota.memory_limit = parse_memory_limit("memory limit", &memory, false)
                .map_err(|err| CfError::usage(err.to_string(), usage.clone()))?;
        }
        if let Some(memory) = flags.string("i") {
            quota.instance_memory_limit =
                parse_memory_limit("instance memory limit", &memory, true)
                    .map_err(|err| CfError::usage(err.to_string(), usage.clone()))?;
        }
        if let Some(new_name) = flags.string("n") {
            quota.name = new_name;
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
        if allow {
            quota.non_basic_services_allowed = true;
        }
        if disallow {
            quota.non_basic_services_allowed = false;
        }

        self.ui.borrow_mut().say(&format!(
            "Updating quota {} as {}...",
            name,
            current_user(&self.config)
        ));
        repo.update(&quota)?;
        self.ui.borrow_mut().ok();
        Ok(())
    }
}
