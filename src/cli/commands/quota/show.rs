use std::cell::RefCell;
use std::rc::Rc;

use crate::api::RepositoryLocator;
use crate::cli::commands::{current_user, BuiltinCommand, Command, CommandMetadata, Dependency};
use crate::cli::flags::FlagContext;
use crate::config::ConfigRepository;
use crate::error::Result;
use crate::formatters::{limit_or_unlimited, memory_or_unlimited};
use crate::requirements::{Requirement, RequirementFactory};
use crate::ui::SharedUi;

use super::{paid_plans, route_ports};

/// `cf quota QUOTA`: details of one org quota.
pub struct ShowQuota {
    ui: SharedUi,
    config: Rc<RefCell<ConfigRepository>>,
    locator: RepositoryLocator,
}

impl BuiltinCommand for ShowQuota {
    fn meta() -> CommandMetadata {
        CommandMetadata::new("quota", "Show quota info", "cf quota QUOTA")
    }

    fn new(deps: Dependency) -> Self {
        Self {
            ui: deps.ui,
            config: deps.config,
            locator: deps.repo_locator,
        }
    }
}

impl Command for ShowQuota {
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
            "Getting quota {} info as {}...",
            name,
            current_user(&self.config)
        ));
        let quota = self.locator.quota_repository().find_by_name(name)?;

        let mut ui = self.ui.borrow_mut();
        ui.ok();
        ui.say("");
        ui.print_key_values(&[
            ("Total Memory", memory_or_unlimited(quota.memory_limit)),
            ("Instance Memory", memory_or_unlimited(quota.instance_memory_limit)),
            ("Routes", limit_or_unlimited(quota.routes_limit)),
            ("Services", limit_or_unlimited(quota.services_limit)),
            ("Paid service plans", paid_plans(quota.non_basic_services_allowed).to_string()),
            ("App instance limit", limit_or_unlimited(quota.app_instance_limit)),
            ("Reserved Route Ports", route_ports(quota.reserved_route_ports)),
        ]);
        Ok(())
    }
}
