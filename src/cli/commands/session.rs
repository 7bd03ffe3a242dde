//! Session commands: `api`, `auth`, `target` and `logout`.
//!
//! These are the only commands that write the session file.

use std::cell::RefCell;
use std::rc::Rc;

use crate::api::RepositoryLocator;
use crate::cli::flags::{bool_flag, string_flag, FlagContext};
use crate::config::{ConfigRepository, OrganizationFields, SpaceFields};
use crate::error::Result;
use crate::requirements::{Requirement, RequirementFactory};
use crate::ui::SharedUi;

use super::{BuiltinCommand, Command, CommandMetadata, Dependency};

fn endpoint_summary(config: &ConfigRepository) -> String {
    format!(
        "{} (API version: {})",
        config.api_endpoint(),
        config.api_version()
    )
}

/// `cf api [URL]`: show, set or unset the API endpoint.
pub struct ApiCommand {
    ui: SharedUi,
    config: Rc<RefCell<ConfigRepository>>,
    locator: RepositoryLocator,
}

impl BuiltinCommand for ApiCommand {
    fn meta() -> CommandMetadata {
        CommandMetadata::new(
            "api",
            "Set or view target api url",
            "cf api [URL] [--unset] [--skip-ssl-validation]",
        )
        .flag(bool_flag("unset", "Remove all api endpoint targeting"))
        .flag(bool_flag(
            "skip-ssl-validation",
            "Skip verification of the API endpoint. Not recommended!",
        ))
    }

    fn new(deps: Dependency) -> Self {
        Self {
            ui: deps.ui,
            config: deps.config,
            locator: deps.repo_locator,
        }
    }
}

impl ApiCommand {
    fn show(&self) {
        let config = self.config.borrow();
        let mut ui = self.ui.borrow_mut();
        if config.has_api_endpoint() {
            ui.print_key_values(&[("API endpoint", endpoint_summary(&config))]);
        } else {
            ui.say("No api endpoint set. Use 'cf api' to set an endpoint");
        }
    }

    fn unset(&self) -> Result<()> {
        self.ui.borrow_mut().say("Unsetting api endpoint...");
        {
            let mut config = self.config.borrow_mut();
            config.unset_api();
            config.save()?;
        }
        let mut ui = self.ui.borrow_mut();
        ui.ok();
        ui.say("");
        ui.say("No api endpoint set.");
        Ok(())
    }

    fn set(&self, url: &str, skip_ssl: bool) -> Result<()> {
        let endpoint = if url.contains("://") {
            url.to_string()
        } else {
            format!("https://{}", url)
        };
        self.ui
            .borrow_mut()
            .say(&format!("Setting api endpoint to {}...", endpoint));

        self.config.borrow_mut().set_ssl_disabled(skip_ssl);
        let info = self.locator.endpoint_repository().get_info(&endpoint)?;

        {
            let mut config = self.config.borrow_mut();
            if config.api_endpoint() != endpoint.trim_end_matches('/') {
                config.clear_session();
            }
            config.set_api_endpoint(&endpoint);
            config.set_api_version(&info.api_version);
            config.set_authorization_endpoint(&info.authorization_endpoint);
            config.save()?;
        }

        self.ui.borrow_mut().ok();
        self.ui.borrow_mut().say("");
        self.show();
        if !self.config.borrow().is_logged_in() {
            self.ui
                .borrow_mut()
                .say("Not logged in. Use 'cf login' to log in.");
        }
        Ok(())
    }
}

impl Command for ApiCommand {
    fn metadata(&self) -> CommandMetadata {
        Self::meta()
    }

    fn requirements(
        &mut self,
        _factory: &dyn RequirementFactory,
        _flags: &FlagContext,
    ) -> Result<Vec<Rc<dyn Requirement>>> {
        Ok(Vec::new())
    }

    fn execute(&mut self, flags: &FlagContext) -> Result<()> {
        if flags.bool("unset") {
            return self.unset();
        }
        match flags.args().first() {
            Some(url) => self.set(url, flags.bool("skip-ssl-validation")),
            None => {
                self.show();
                Ok(())
            }
        }
    }
}

/// `cf auth USERNAME PASSWORD`: log in non-interactively.
pub struct AuthCommand {
    ui: SharedUi,
    config: Rc<RefCell<ConfigRepository>>,
    locator: RepositoryLocator,
}

impl BuiltinCommand for AuthCommand {
    fn meta() -> CommandMetadata {
        CommandMetadata::new(
            "auth",
            "Authenticate user non-interactively",
            "cf auth USERNAME PASSWORD",
        )
    }

    fn new(deps: Dependency) -> Self {
        Self {
            ui: deps.ui,
            config: deps.config,
            locator: deps.repo_locator,
        }
    }
}

impl Command for AuthCommand {
    fn metadata(&self) -> CommandMetadata {
        Self::meta()
    }

    fn requirements(
        &mut self,
        factory: &dyn RequirementFactory,
        flags: &FlagContext,
    ) -> Result<Vec<Rc<dyn Requirement>>> {
        Ok(vec![
            factory.new_number_of_arguments_requirement(flags.args(), 2, &Self::meta().usage),
            factory.new_api_endpoint_requirement(),
        ])
    }

    fn execute(&mut self, flags: &FlagContext) -> Result<()> {
        let (username, password) = (&flags.args()[0], &flags.args()[1]);

        let endpoint = self.config.borrow().api_endpoint().to_string();
        self.ui
            .borrow_mut()
            .print_key_values(&[("API endpoint", endpoint)]);
        self.ui.borrow_mut().say("Authenticating...");

        self.config.borrow_mut().clear_session();
        let grant = self
            .locator
            .authentication_repository()
            .authenticate(username, password)?;

        {
            let mut config = self.config.borrow_mut();
            config.set_access_token(&grant.authorization());
            config.set_refresh_token(&grant.refresh_token);
            config.set_username(username);
            config.save()?;
        }

        let mut ui = self.ui.borrow_mut();
        ui.ok();
        ui.say("Use 'cf target' to view or set your target org and space");
        Ok(())
    }
}

/// `cf target [-o ORG] [-s SPACE]`: show or change the targeted org and space.
pub struct TargetCommand {
    ui: SharedUi,
    config: Rc<RefCell<ConfigRepository>>,
    locator: RepositoryLocator,
}

impl BuiltinCommand for TargetCommand {
    fn meta() -> CommandMetadata {
        CommandMetadata::new(
            "target",
            "Set or view the targeted org or space",
            "cf target [-o ORG] [-s SPACE]",
        )
        .alias("t")
        .flag(string_flag("o", "ORG", "Organization"))
        .flag(string_flag("s", "SPACE", "Space"))
    }

    fn new(deps: Dependency) -> Self {
        Self {
            ui: deps.ui,
            config: deps.config,
            locator: deps.repo_locator,
        }
    }
}

impl TargetCommand {
    fn show(&self) {
        let config = self.config.borrow();
        let mut pairs = vec![("API endpoint", endpoint_summary(&config))];
        pairs.push(("User", config.username().to_string()));
        pairs.push((
            "Org",
            if config.has_organization() {
                config.organization_fields().name
            } else {
                "No org targeted, use 'cf target -o ORG'".to_string()
            },
        ));
        pairs.push((
            "Space",
            if config.has_space() {
                config.space_fields().name
            } else {
                "No space targeted, use 'cf target -s SPACE'".to_string()
            },
        ));
        self.ui.borrow_mut().print_key_values(&pairs);
    }
}

impl Command for TargetCommand {
    fn metadata(&self) -> CommandMetadata {
        Self::meta()
    }

    fn requirements(
        &mut self,
        factory: &dyn RequirementFactory,
        flags: &FlagContext,
    ) -> Result<Vec<Rc<dyn Requirement>>> {
        let mut reqs = vec![factory.new_api_endpoint_requirement()];
        if flags.is_set("o") || flags.is_set("s") {
            reqs.push(factory.new_login_requirement());
        }
        if flags.is_set("s") && !flags.is_set("o") {
            reqs.push(factory.new_targeted_org_requirement());
        }
        Ok(reqs)
    }

    fn execute(&mut self, flags: &FlagContext) -> Result<()> {
        if let Some(org_name) = flags.string("o") {
            let found = self
                .locator
                .organization_repository()
                .find_by_name(&org_name);
            let mut config = self.config.borrow_mut();
            match found {
                Ok(org) => {
                    config.set_organization_fields(OrganizationFields::new(org.guid, org.name));
                    config.save()?;
                }
                Err(err) => {
                    // A failed switch leaves nothing targeted.
                    config.set_organization_fields(OrganizationFields::default());
                    config.save()?;
                    return Err(err);
                }
            }
        }

        if let Some(space_name) = flags.string("s") {
            let org_guid = self.config.borrow().organization_fields().guid;
            let found = self
                .locator
                .space_repository()
                .find_by_name_in_org(&space_name, &org_guid);
            let mut config = self.config.borrow_mut();
            match found {
                Ok(space) => {
                    config.set_space_fields(SpaceFields::new(space.guid, space.name));
                    config.save()?;
                }
                Err(err) => {
                    config.set_space_fields(SpaceFields::default());
                    config.save()?;
                    return Err(err);
                }
            }
        }

        self.show();
        Ok(())
    }
}

/// `cf logout`: forget the user and target.
pub struct LogoutCommand {
    ui: SharedUi,
    config: Rc<RefCell<ConfigRepository>>,
}

impl BuiltinCommand for LogoutCommand {
    fn meta() -> CommandMetadata {
        CommandMetadata::new("logout", "Log user out", "cf logout").alias("lo")
    }

    fn new(deps: Dependency) -> Self {
        Self {
            ui: deps.ui,
            config: deps.config,
        }
    }
}

impl Command for LogoutCommand {
    fn metadata(&self) -> CommandMetadata {
        Self::meta()
    }

    fn requirements(
        &mut self,
        _factory: &dyn RequirementFactory,
        _flags: &FlagContext,
    ) -> Result<Vec<Rc<dyn Requirement>>> {
        Ok(Vec::new())
    }

    fn execute(&mut self, _flags: &FlagContext) -> Result<()> {
        self.ui.borrow_mut().say("Logging out...");
        {
            let mut config = self.config.borrow_mut();
            config.clear_session();
            config.save()?;
        }
        self.ui.borrow_mut().ok();
        Ok(())
    }
}
