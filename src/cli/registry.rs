//! Command registry for looking up commands by name.
//!
//! The [`CommandRegistry`] stores one registration per command name: the
//! command's metadata and a constructor that wires a [`Dependency`] bundle
//! into a fresh instance. Nothing is global; `main` builds the registry once
//! and hands it to the runner, and tests build their own.

use std::collections::HashMap;

use crate::cli::commands::{
    env, envvargroup, help, quota, securitygroup, session, spacequota, BuiltinCommand, Command,
    CommandMetadata, Dependency,
};
use crate::error::{CfError, Result};

type Constructor = Box<dyn Fn(Dependency) -> Box<dyn Command>>;

struct Registration {
    metadata: CommandMetadata,
    constructor: Constructor,
}

/// Registry of every command the CLI can run.
pub struct CommandRegistry {
    commands: HashMap<String, Registration>,
}

impl CommandRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Create a registry with all built-in commands.
    ///
    /// `help` is registered last so it can list everything else.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        registry.register::<session::ApiCommand>();
        registry.register::<session::AuthCommand>();
        registry.register::<session::TargetCommand>();
        registry.register::<session::LogoutCommand>();

        registry.register::<quota::ListQuotas>();
        registry.register::<quota::ShowQuota>();
        registry.register::<quota::CreateQuota>();
        registry.register::<quota::UpdateQuota>();
        registry.register::<quota::DeleteQuota>();
        registry.register::<quota::SetQuota>();

        registry.register::<spacequota::ListSpaceQuotas>();
        registry.register::<spacequota::ShowSpaceQuota>();
        registry.register::<spacequota::CreateSpaceQuota>();
        registry.register::<spacequota::DeleteSpaceQuota>();
        registry.register::<spacequota::SetSpaceQuota>();

        registry.register::<securitygroup::ListSecurityGroups>();
        registry.register::<securitygroup::ShowSecurityGroup>();
        registry.register::<securitygroup::CreateSecurityGroup>();
        registry.register::<securitygroup::DeleteSecurityGroup>();
        registry.register::<securitygroup::RunningSecurityGroups>();
        registry.register::<securitygroup::StagingSecurityGroups>();
        registry.register::<securitygroup::BindRunningSecurityGroup>();
        registry.register::<securitygroup::UnbindRunningSecurityGroup>();
        registry.register::<securitygroup::BindStagingSecurityGroup>();
        registry.register::<securitygroup::UnbindStagingSecurityGroup>();

        registry.register::<envvargroup::RunningEnvironmentVariableGroup>();
        registry.register::<envvargroup::StagingEnvironmentVariableGroup>();
        registry.register::<envvargroup::SetRunningEnvironmentVariableGroup>();
        registry.register::<envvargroup::SetStagingEnvironmentVariableGroup>();

        registry.register::<env::EnvCommand>();

        help::register(&mut registry);
        registry
    }

    /// Register a built-in command type.
    pub fn register<C: BuiltinCommand>(&mut self) {
        self.register_with(C::meta(), |deps| Box::new(C::new(deps)));
    }

    /// Register a command from its metadata and constructor.
    ///
    /// Registering a name again replaces the earlier registration.
    pub fn register_with(
        &mut self,
        metadata: CommandMetadata,
        constructor: impl Fn(Dependency) -> Box<dyn Command> + 'static,
    ) {
        tracing::trace!("Registering command {}", metadata.name);
        self.commands.insert(
            metadata.name.clone(),
            Registration {
                metadata,
                constructor: Box::new(constructor),
            },
        );
    }

    fn registration(&self, name: &str) -> Option<&Registration> {
        self.commands.get(name).or_else(|| {
            self.commands
                .values()
                .find(|registration| registration.metadata.answers_to(name))
        })
    }

    /// Check whether a command name or alias is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.registration(name).is_some()
    }

    /// Metadata of the command registered under `name` or alias.
    pub fn find(&self, name: &str) -> Result<CommandMetadata> {
        self.registration(name)
            .map(|registration| registration.metadata.clone())
            .ok_or_else(|| CfError::CommandNotFound {
                name: name.to_string(),
            })
    }

    /// A fresh instance of the command with `deps` wired in.
    pub fn instantiate(&self, name: &str, deps: Dependency) -> Result<Box<dyn Command>> {
        let registration = self.registration(name).ok_or_else(|| CfError::CommandNotFound {
            name: name.to_string(),
        })?;
        Ok((registration.constructor)(deps))
    }

    /// Metadata of every command, sorted by name.
    pub fn metadatas(&self) -> Vec<CommandMetadata> {
        let mut all: Vec<CommandMetadata> = self
            .commands
            .values()
            .map(|registration| registration.metadata.clone())
            .collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    /// Get the number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fakes::FakeRepositories;
    use crate::cli::flags::FlagContext;
    use crate::config::ConfigRepository;
    use crate::requirements::{Requirement, RequirementFactory};
    use crate::ui::MockUI;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Noop;

    impl Command for Noop {
        fn metadata(&self) -> CommandMetadata {
            CommandMetadata::new("noop", "Does nothing", "cf noop")
        }

        fn requirements(
            &mut self,
            _factory: &dyn RequirementFactory,
            _flags: &FlagContext,
        ) -> Result<Vec<Rc<dyn Requirement>>> {
            Ok(Vec::new())
        }

        fn execute(&mut self, _flags: &FlagContext) -> Result<()> {
            Ok(())
        }
    }

    fn deps() -> Dependency {
        Dependency {
            ui: Rc::new(RefCell::new(MockUI::new())),
            config: Rc::new(RefCell::new(ConfigRepository::in_memory())),
            repo_locator: FakeRepositories::new().locator(),
            plugin_call: false,
        }
    }

    #[test]
    fn registered_command_round_trips_by_name() {
        let mut registry = CommandRegistry::new();
        registry.register_with(Noop.metadata().alias("n"), |_| Box::new(Noop));

        let cmd = registry.instantiate("noop", deps()).unwrap();
        assert_eq!(cmd.metadata().name, "noop");
        assert_eq!(registry.find("n").unwrap().name, "noop");
    }

    #[test]
    fn repeated_lookup_yields_equivalent_commands() {
        let registry = CommandRegistry::with_builtins();

        let first = registry.instantiate("create-quota", deps()).unwrap();
        let second = registry.instantiate("create-quota", deps()).unwrap();

        assert_eq!(first.metadata().name, second.metadata().name);
        assert_eq!(first.metadata().usage, second.metadata().usage);
        assert_eq!(first.metadata().flags.len(), second.metadata().flags.len());
    }

    #[test]
    fn reregistering_overwrites() {
        let mut registry = CommandRegistry::new();
        registry.register_with(CommandMetadata::new("noop", "first", "cf noop"), |_| {
            Box::new(Noop)
        });
        registry.register_with(CommandMetadata::new("noop", "second", "cf noop"), |_| {
            Box::new(Noop)
        });

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.find("noop").unwrap().description, "second");
    }

    #[test]
    fn unknown_name_is_command_not_found() {
        let registry = CommandRegistry::new();
        let err = registry.find("frobnicate").unwrap_err();
        assert_eq!(
            err.to_string(),
            "'frobnicate' is not a registered command. See 'cf help'"
        );
        assert!(registry.instantiate("frobnicate", deps()).is_err());
    }

    #[test]
    fn builtins_include_every_group() {
        let registry = CommandRegistry::with_builtins();
        for name in [
            "api",
            "auth",
            "target",
            "logout",
            "help",
            "quotas",
            "create-quota",
            "delete-quota",
            "space-quotas",
            "security-group",
            "bind-running-security-group",
            "running-environment-variable-group",
            "env",
        ] {
            assert!(registry.contains(name), "missing {}", name);
        }
    }

    #[test]
    fn metadatas_are_sorted() {
        let names: Vec<String> = CommandRegistry::with_builtins()
            .metadatas()
            .into_iter()
            .map(|m| m.name)
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
