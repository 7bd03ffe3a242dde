//! Command dispatch.
//!
//! [`CommandRunner::run_cmd_by_name`] drives one invocation:
//!
//! 1. Look the command up and instantiate it with the dependency bundle
//! 2. Parse the raw arguments against the command's flags
//! 3. Ask the command for its requirements
//! 4. Execute them in order, stopping at the first failure
//! 5. Run the command body once
//!
//! Any failure is reported once through the UI and returned; nothing is
//! retried.

use crate::cli::commands::Dependency;
use crate::cli::flags::FlagContext;
use crate::cli::registry::CommandRegistry;
use crate::error::Result;
use crate::requirements::RequirementFactory;

/// Runs commands out of a registry.
pub struct CommandRunner<'a> {
    registry: &'a CommandRegistry,
    factory: &'a dyn RequirementFactory,
    deps: Dependency,
}

impl<'a> CommandRunner<'a> {
    pub fn new(
        registry: &'a CommandRegistry,
        factory: &'a dyn RequirementFactory,
        deps: Dependency,
    ) -> Self {
        Self {
            registry,
            factory,
            deps,
        }
    }

    /// Run the command registered as `name` with the raw words after it.
    pub fn run_cmd_by_name(&self, name: &str, args: &[String]) -> Result<()> {
        let result = self.dispatch(name, args);
        if let Err(err) = &result {
            tracing::debug!("Command {} failed: {}", name, err);
            self.deps.ui.borrow_mut().failed(&err.to_string());
        }
        result
    }

    fn dispatch(&self, name: &str, args: &[String]) -> Result<()> {
        tracing::debug!("Dispatching {} with {} argument(s)", name, args.len());
        let mut cmd = self.registry.instantiate(name, self.deps.clone())?;
        let metadata = cmd.metadata();

        let flags = FlagContext::parse(&metadata, args)?;
        if flags.help_requested() {
            self.deps.ui.borrow_mut().say(&metadata.help_text());
            return Ok(());
        }

        let requirements = cmd.requirements(self.factory, &flags)?;
        tracing::debug!("Checking {} requirement(s)", requirements.len());
        for requirement in &requirements {
            tracing::trace!("Executing requirement {}", requirement.name());
            requirement.execute()?;
        }

        tracing::debug!("Requirements passed, executing {}", metadata.name);
        cmd.execute(&flags)?;
        tracing::debug!("{} succeeded", metadata.name);
        Ok(())
    }
}
