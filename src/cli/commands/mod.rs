//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait: it describes itself with
//! [`CommandMetadata`], declares its preconditions as an ordered list of
//! requirements, and runs its body once they all pass. Commands receive
//! their collaborators through a [`Dependency`] bundle when the registry
//! instantiates them.
//!
//! # Groups
//!
//! - [`session`] - `api`, `auth`, `target`, `logout`
//! - [`help`] - Command listing and per-command help
//! - [`quota`] - Organization quotas
//! - [`spacequota`] - Space quotas
//! - [`securitygroup`] - Security groups and the running/staging defaults
//! - [`envvargroup`] - Running/staging environment variable groups
//! - [`env`] - Environment of one application

pub mod env;
pub mod envvargroup;
pub mod help;
pub mod phase;
pub mod quota;
pub mod securitygroup;
pub mod session;
pub mod spacequota;

use std::cell::RefCell;
use std::rc::Rc;

use clap::Arg;

use crate::api::RepositoryLocator;
use crate::cli::flags::FlagContext;
use crate::config::ConfigRepository;
use crate::error::Result;
use crate::requirements::{Requirement, RequirementFactory};
use crate::ui::SharedUi;

/// Name, usage and flags of a command.
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    pub name: String,
    pub short_name: Option<String>,
    pub description: String,
    pub usage: String,
    pub flags: Vec<Arg>,
}

impl CommandMetadata {
    pub fn new(name: &str, description: &str, usage: &str) -> Self {
        Self {
            name: name.to_string(),
            short_name: None,
            description: description.to_string(),
            usage: usage.to_string(),
            flags: Vec::new(),
        }
    }

    pub fn alias(mut self, short_name: &str) -> Self {
        self.short_name = Some(short_name.to_string());
        self
    }

    pub fn flag(mut self, flag: Arg) -> Self {
        self.flags.push(flag);
        self
    }

    /// Whether `name` is this command's name or alias.
    pub fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.short_name.as_deref() == Some(name)
    }

    /// The full help page printed by `cf help NAME` and `cf NAME -h`.
    pub fn help_text(&self) -> String {
        let mut text = format!(
            "NAME:\n   {} - {}\n\nUSAGE:\n   {}",
            self.name, self.description, self.usage
        );
        if let Some(alias) = &self.short_name {
            text.push_str(&format!("\n\nALIAS:\n   {}", alias));
        }
        if !self.flags.is_empty() {
            let labels: Vec<String> = self
                .flags
                .iter()
                .map(|flag| match (flag.get_short(), flag.get_long()) {
                    (Some(short), _) => format!("-{}", short),
                    (None, Some(long)) => format!("--{}", long),
                    (None, None) => flag.get_id().as_str().to_string(),
                })
                .collect();
            let width = labels.iter().map(String::len).max().unwrap_or(0);

            text.push_str("\n\nOPTIONS:");
            for (label, flag) in labels.iter().zip(&self.flags) {
                let help = flag.get_help().map(|h| h.to_string()).unwrap_or_default();
                text.push_str(&format!("\n   {:width$}   {}", label, help, width = width));
            }
        }
        text
    }
}

/// Collaborators handed to a command when it is instantiated.
#[derive(Clone)]
pub struct Dependency {
    pub ui: SharedUi,
    pub config: Rc<RefCell<ConfigRepository>>,
    pub repo_locator: RepositoryLocator,
    /// Set when a plugin invokes the command over RPC rather than a user
    /// from the shell. Handed to every constructor; built-in commands
    /// behave the same either way.
    pub plugin_call: bool,
}

/// A command the runner can dispatch.
pub trait Command {
    fn metadata(&self) -> CommandMetadata;

    /// Preconditions, in the order they must be checked.
    ///
    /// Returning an error (usually a usage error) aborts the invocation
    /// before any requirement runs.
    fn requirements(
        &mut self,
        factory: &dyn RequirementFactory,
        flags: &FlagContext,
    ) -> Result<Vec<Rc<dyn Requirement>>>;

    /// The command body. Called once, and only after every requirement passed.
    fn execute(&mut self, flags: &FlagContext) -> Result<()>;
}

/// A command type the registry can construct.
pub trait BuiltinCommand: Command + 'static {
    fn meta() -> CommandMetadata
    where
        Self: Sized;

    fn new(deps: Dependency) -> Self
    where
        Self: Sized;
}

/// The name of the logged-in user, as shown in progress messages.
pub(crate) fn current_user(config: &Rc<RefCell<ConfigRepository>>) -> String {
    config.borrow().username().to_string()
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Wiring shared by command tests.

    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::api::fakes::FakeRepositories;
    use crate::cli::registry::CommandRegistry;
    use crate::cli::runner::CommandRunner;
    use crate::config::{OrganizationFields, SpaceFields};
    use crate::error::Result;
    use crate::requirements::Factory;
    use crate::ui::MockUI;

    /// A logged-in session targeting `my-org`/`my-space` at API 2.100.0.
    pub fn logged_in_config() -> ConfigRepository {
        let mut config = ConfigRepository::in_memory();
        config.set_api_endpoint("https://api.example.com");
        config.set_api_version("2.100.0");
        config.set_access_token("bearer my-token");
        config.set_username("my-user");
        config.set_organization_fields(OrganizationFields::new("my-org-guid", "my-org"));
        config.set_space_fields(SpaceFields::new("my-space-guid", "my-space"));
        config
    }

    /// Everything a command test needs: UI, session, fakes and a runner.
    pub struct Harness {
        pub ui: Rc<RefCell<MockUI>>,
        pub config: Rc<RefCell<ConfigRepository>>,
        pub fakes: FakeRepositories,
        pub registry: CommandRegistry,
    }

    impl Harness {
        pub fn new() -> Self {
            Self::with_config(logged_in_config())
        }

        pub fn with_config(config: ConfigRepository) -> Self {
            Self {
                ui: Rc::new(RefCell::new(MockUI::new())),
                config: Rc::new(RefCell::new(config)),
                fakes: FakeRepositories::new(),
                registry: CommandRegistry::with_builtins(),
            }
        }

        pub fn run(&self, name: &str, args: &[&str]) -> Result<()> {
            let locator = self.fakes.locator();
            let deps = Dependency {
                ui: self.ui.clone(),
                config: self.config.clone(),
                repo_locator: locator.clone(),
                plugin_call: false,
            };
            let factory = Factory::new(self.config.clone(), locator);
            let runner = CommandRunner::new(&self.registry, &factory, deps);
            let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
            runner.run_cmd_by_name(name, &args)
        }

        pub fn outputs(&self) -> Vec<String> {
            self.ui.borrow().outputs().to_vec()
        }

        pub fn has_output(&self, text: &str) -> bool {
            self.ui.borrow().has_output(text)
        }

        pub fn has_warning(&self, text: &str) -> bool {
            self.ui.borrow().has_warning(text)
        }

        pub fn has_outputs_in_order(&self, fragments: &[&str]) -> bool {
            self.ui.borrow().has_outputs_in_order(fragments)
        }

        pub fn confirm_with(&self, answers: Vec<bool>) {
            self.ui.borrow_mut().queue_confirmations(answers);
        }
    }
}
