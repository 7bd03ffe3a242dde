use std::cell::RefCell;
use std::rc::Rc;

use crate::api::RepositoryLocator;
use crate::cli::commands::{current_user, BuiltinCommand, Command, CommandMetadata, Dependency};
use crate::cli::flags::FlagContext;
use crate::config::ConfigRepository;
use crate::error::{CfError, Result, QUOTA_DEFINITION_NAME_TAKEN};
use crate::formatters::parse_memory_limit;
use crate::models::QuotaFields;
use crate::requirements::{arity_message, Requirement, RequirementFactory};
use crate::ui::SharedUi;

use super::{limit_flags, APP_INSTANCE_LIMIT_VERSION, RESERVED_ROUTE_PORTS_VERSION};

/// `cf create-quota QUOTA`: define a new org quota.
pub struct CreateQuota {
    ui: SharedUi,
    config: Rc<RefCell<ConfigRepository>>,
    locator: RepositoryLocator,
}

impl BuiltinCommand for CreateQuota {
    fn meta() -> CommandMetadata {
        let mut meta = CommandMetadata::new(
            "create-quota",
            "Define a new resource quota",
            "cf create-quota QUOTA [-m TOTAL_MEMORY] [-i INSTANCE_MEMORY] [-r ROUTES] [-s SERVICE_INSTANCES] [-a APP_INSTANCES] [--allow-paid-service-plans] [--reserved-route-ports RESERVED_ROUTE_PORTS]",
        );
        meta.flags = limit_flags();
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

impl Command for CreateQuota {
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
        let name = flags.args()[0].clone();
        self.ui.borrow_mut().say(&format!(
            "Creating quota {} as {}...",
            name,
            current_user(&self.config)
        ));

        let mut quota = QuotaFields {
            name: name.clone(),
            ..QuotaFields::default()
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

        match self.locator.quota_repository().create(&quota) {
            Ok(()) => self.ui.borrow_mut().ok(),
            Err(err) if err.error_code() == Some(QUOTA_DEFINITION_NAME_TAKEN) => {
                let mut ui = self.ui.borrow_mut();
                ui.ok();
                ui.warn(&format!("Quota Definition {} already exists", name));
            }
            Err(err) => return Err(err),
        }
        Ok(())
    }
}
