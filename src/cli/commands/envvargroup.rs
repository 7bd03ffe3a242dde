//! Running and staging environment variable groups.
//!
//! Both groups are plain JSON objects on the Cloud Controller. Reading
//! prints them as a two-column table; setting replaces the whole object.

use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

use serde_json::{Map, Value};

use crate::api::{Lifecycle, RepositoryLocator};
use crate::cli::commands::phase::{Phase, Running, Staging};
use crate::cli::commands::{current_user, BuiltinCommand, Command, CommandMetadata, Dependency};
use crate::cli::flags::FlagContext;
use crate::config::ConfigRepository;
use crate::error::{CfError, Result};
use crate::requirements::{Requirement, RequirementFactory};
use crate::ui::SharedUi;

pub type RunningEnvironmentVariableGroup = ShowEnvironmentVariableGroup<Running>;
pub type StagingEnvironmentVariableGroup = ShowEnvironmentVariableGroup<Staging>;
pub type SetRunningEnvironmentVariableGroup = SetEnvironmentVariableGroup<Running>;
pub type SetStagingEnvironmentVariableGroup = SetEnvironmentVariableGroup<Staging>;

fn alias(set: bool, lifecycle: Lifecycle) -> &'static str {
    match (set, lifecycle) {
        (false, Lifecycle::Running) => "revg",
        (false, Lifecycle::Staging) => "sevg",
        (true, Lifecycle::Running) => "srevg",
        (true, Lifecycle::Staging) => "ssevg",
    }
}

/// `cf running-environment-variable-group` / `cf staging-environment-variable-group`.
pub struct ShowEnvironmentVariableGroup<P> {
    ui: SharedUi,
    config: Rc<RefCell<ConfigRepository>>,
    locator: RepositoryLocator,
    phase: PhantomData<P>,
}

impl<P: Phase> BuiltinCommand for ShowEnvironmentVariableGroup<P> {
    fn meta() -> CommandMetadata {
        let lifecycle = P::LIFECYCLE;
        CommandMetadata::new(
            &format!("{}-environment-variable-group", lifecycle),
            &format!("Retrieve the contents of the {} environment variable group", lifecycle),
            &format!("cf {}-environment-variable-group", lifecycle),
        )
        .alias(alias(false, lifecycle))
    }

    fn new(deps: Dependency) -> Self {
        Self {
            ui: deps.ui,
            config: deps.config,
            locator: deps.repo_locator,
            phase: PhantomData,
        }
    }
}

impl<P: Phase> Command for ShowEnvironmentVariableGroup<P> {
    fn metadata(&self) -> CommandMetadata {
        Self::meta()
    }

    fn requirements(
        &mut self,
        factory: &dyn RequirementFactory,
        flags: &FlagContext,
    ) -> Result<Vec<Rc<dyn Requirement>>> {
        Ok(vec![
            factory.new_number_of_arguments_requirement(flags.args(), 0, &Self::meta().usage),
            factory.new_login_requirement(),
        ])
    }

    fn execute(&mut self, _flags: &FlagContext) -> Result<()> {
        let lifecycle = P::LIFECYCLE;
        self.ui.borrow_mut().say(&format!(
            "Retrieving the contents of the {} environment variable group as {}...",
            lifecycle,
            current_user(&self.config)
        ));
        let variables = self
            .locator
            .environment_variable_groups_repository()
            .list(lifecycle)?;

        let mut ui = self.ui.borrow_mut();
        ui.ok();

        let mut table = ui.table(&["Variable Name", "Assigned Value"]);
        for variable in &variables {
            table.add_row(vec![variable.name.as_str(), variable.value.as_str()]);
        }
        ui.print_table(&table);
        Ok(())
    }
}

/// `cf set-running-environment-variable-group '{"name":"value"}'` and its
/// staging twin.
pub struct SetEnvironmentVariableGroup<P> {
    ui: SharedUi,
    config: Rc<RefCell<ConfigRepository>>,
    locator: RepositoryLocator,
    phase: PhantomData<P>,
}

impl<P: Phase> SetEnvironmentVariableGroup<P> {
    fn usage() -> String {
        format!(
            "cf set-{}-environment-variable-group '{{\"name\":\"value\",\"name\":\"value\"}}'",
            P::LIFECYCLE
        )
    }

    fn parse(json: &str) -> Result<Map<String, Value>> {
        serde_json::from_str(json).map_err(|_| CfError::InvalidArgument {
            message: format!(
                "Your JSON string syntax is invalid.  Proper syntax is this:  {}",
                Self::usage()
            ),
        })
    }
}

impl<P: Phase> BuiltinCommand for SetEnvironmentVariableGroup<P> {
    fn meta() -> CommandMetadata {
        let lifecycle = P::LIFECYCLE;
        CommandMetadata::new(
            &format!("set-{}-environment-variable-group", lifecycle),
            &format!(
                "Pass parameters as JSON to create a {} environment variable group",
                lifecycle
            ),
            &Self::usage(),
        )
        .alias(alias(true, lifecycle))
    }

    fn new(deps: Dependency) -> Self {
        Self {
            ui: deps.ui,
            config: deps.config,
            locator: deps.repo_locator,
            phase: PhantomData,
        }
    }
}

impl<P: Phase> Command for SetEnvironmentVariableGroup<P> {
    fn metadata(&self) -> CommandMetadata {
        Self::meta()
    }

    fn requirements(
        &mut self,
        factory: &dyn RequirementFactory,
        flags: &FlagContext,
    ) -> Result<Vec<Rc<dyn Requirement>>> {
        Ok(vec![
            factory.new_number_of_arguments_requirement(flags.args(), 1, &Self::usage()),
            factory.new_login_requirement(),
        ])
    }

    fn execute(&mut self, flags: &FlagContext) -> Result<()> {
        let lifecycle = P::LIFECYCLE;
        self.ui.borrow_mut().say(&format!(
            "Setting the contents of the {} environment variable group as {}...",
            lifecycle,
            current_user(&self.config)
        ));

        let variables = Self::parse(&flags.args()[0])?;
        self.locator
            .environment_variable_groups_repository()
            .set(lifecycle, &variables)?;
        self.ui.borrow_mut().ok();
        Ok(())
    }
}
