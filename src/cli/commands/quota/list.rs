use std::cell::RefCell;
use std::rc::Rc;

use crate::api::RepositoryLocator;
use crate::cli::commands::{current_user, BuiltinCommand, Command, CommandMetadata, Dependency};
use crate::cli::flags::FlagContext;
use crate::config::ConfigRepository;
use crate::error::Result;
use crate::requirements::{Requirement, RequirementFactory};
use crate::ui::SharedUi;

use super::limit_columns;

/// `cf quotas`: list every org quota.
pub struct ListQuotas {
    ui: SharedUi,
    config: Rc<RefCell<ConfigRepository>>,
    locator: RepositoryLocator,
}

impl BuiltinCommand for ListQuotas {
    fn meta() -> CommandMetadata {
        CommandMetadata::new("quotas", "List available usage quotas", "cf quotas")
    }

    fn new(deps: Dependency) -> Self {
        Self {
            ui: deps.ui,
            config: deps.config,
            locator: deps.repo_locator,
        }
    }
}

impl Command for ListQuotas {
    fn metadata(&self) -> CommandMetadata {
        Self::meta()
    }

    fn requirements(
        &mut self,
        factory: &dyn RequirementFactory,
        _flags: &FlagContext,
    ) -> Result<Vec<Rc<dyn Requirement>>> {
        Ok(vec![factory.new_login_requirement()])
    }

    fn execute(&mut self, _flags: &FlagContext) -> Result<()> {
        self.ui.borrow_mut().say(&format!(
            "Getting quotas as {}...",
            current_user(&self.config)
        ));
        let quotas = self.locator.quota_repository().find_all()?;

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
