//! `cf env APP_NAME`: the environment an application sees.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{Map, Value};

use crate::api::environment_variable_groups::display_value;
use crate::api::RepositoryLocator;
use crate::cli::commands::{current_user, BuiltinCommand, Command, CommandMetadata, Dependency};
use crate::cli::flags::FlagContext;
use crate::config::ConfigRepository;
use crate::error::{CfError, Result};
use crate::requirements::{arity_message, ApplicationRequirement, Requirement, RequirementFactory};
use crate::ui::{SharedUi, UserInterface};

pub struct EnvCommand {
    ui: SharedUi,
    config: Rc<RefCell<ConfigRepository>>,
    locator: RepositoryLocator,
    app_req: Option<Rc<ApplicationRequirement>>,
}

impl BuiltinCommand for EnvCommand {
    fn meta() -> CommandMetadata {
        CommandMetadata::new("env", "Show all env variables for an app", "cf env APP_NAME")
            .alias("e")
    }

    fn new(deps: Dependency) -> Self {
        Self {
            ui: deps.ui,
            config: deps.config,
            locator: deps.repo_locator,
            app_req: None,
        }
    }
}

/// Print a JSON object, skipping it when empty.
fn say_json(ui: &mut dyn UserInterface, value: &Map<String, Value>) -> Result<()> {
    if value.is_empty() {
        return Ok(());
    }
    ui.say(&serde_json::to_string_pretty(value)?);
    ui.say("");
    Ok(())
}

/// Print `KEY: value` lines sorted by key, or `empty` when there are none.
fn say_variables(ui: &mut dyn UserInterface, variables: &Map<String, Value>, empty: &str) {
    if variables.is_empty() {
        ui.say(empty);
        ui.say("");
        return;
    }
    let mut names: Vec<&String> = variables.keys().collect();
    names.sort();
    for name in names {
        ui.say(&format!("{}: {}", name, display_value(&variables[name.as_str()])));
    }
    ui.say("");
}

impl Command for EnvCommand {
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

        let app_req = factory.new_application_requirement(&flags.args()[0]);
        self.app_req = Some(app_req.clone());

        let mut reqs = vec![
            factory.new_login_requirement(),
            factory.new_targeted_space_requirement(),
        ];
        reqs.push(app_req);
        Ok(reqs)
    }

    fn execute(&mut self, flags: &FlagContext) -> Result<()> {
        let app = match &self.app_req {
            Some(req) => req.application()?,
            None => return Err(CfError::usage(arity_message(1), Self::meta().usage)),
        };
        let (org, space) = {
            let config = self.config.borrow();
            (config.organization_fields(), config.space_fields())
        };

        self.ui.borrow_mut().say(&format!(
            "Getting env variables for app {} in org {} / space {} as {}...",
            flags.args()[0],
            org.name,
            space.name,
            current_user(&self.config)
        ));
        let env = self.locator.application_repository().read_env(&app.guid)?;

        let mut ui = self.ui.borrow_mut();
        ui.ok();
        ui.say("");

        if !env.system_env_json.is_empty() || !env.application_env_json.is_empty() {
            ui.say("System-Provided:");
            say_json(&mut *ui, &env.system_env_json)?;
            say_json(&mut *ui, &env.application_env_json)?;
        }

        ui.say("User-Provided:");
        say_variables(&mut *ui, &env.environment_json, "No user-defined env variables have been set");

        ui.say("Running Environment Variable Groups:");
        say_variables(&mut *ui, &env.running_env_json, "No running env variables have been set");

        ui.say("Staging Environment Variable Groups:");
        say_variables(&mut *ui, &env.staging_env_json, "No staging env variables have been set");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map, Value};

    use crate::cli::commands::test_support::{logged_in_config, Harness};
    use crate::config::SpaceFields;
    use crate::models::{Application, ApplicationEnv};

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    fn harness_with_app() -> Harness {
        let h = Harness::new();
        h.fakes.applications.applications.borrow_mut().push(Application {
            guid: "my-app-guid".into(),
            name: "my-app".into(),
            ..Application::default()
        });
        h
    }

    #[test]
    fn prints_every_section() {
        let h = harness_with_app();
        h.fakes.applications.environments.borrow_mut().insert(
            "my-app-guid".into(),
            ApplicationEnv {
                system_env_json: object(json!({"VCAP_SERVICES": {"pump-yer-brakes": "drive-slow"}})),
                application_env_json: object(json!({"VCAP_APPLICATION": {"name": "my-app"}})),
                environment_json: object(json!({"key": "value", "another": 42})),
                running_env_json: object(json!({"running-key": "running-value"})),
                staging_env_json: Map::new(),
            },
        );

        h.run("env", &["my-app"]).unwrap();

        assert!(h.has_outputs_in_order(&[
            "Getting env variables for app my-app in org my-org / space my-space as my-user...",
            "OK",
            "System-Provided:",
            "\"VCAP_SERVICES\"",
            "\"pump-yer-brakes\": \"drive-slow\"",
            "\"VCAP_APPLICATION\"",
            "User-Provided:",
            "another: 42",
            "key: value",
            "Running Environment Variable Groups:",
            "running-key: running-value",
            "Staging Environment Variable Groups:",
            "No staging env variables have been set",
        ]));
    }

    #[test]
    fn empty_environment() {
        let h = harness_with_app();

        h.run("e", &["my-app"]).unwrap();

        assert!(!h.has_output("System-Provided:"));
        assert!(h.has_output("No user-defined env variables have been set"));
        assert!(h.has_output("No running env variables have been set"));
    }

    #[test]
    fn looks_the_app_up_in_the_targeted_space() {
        let h = harness_with_app();
        h.run("env", &["my-app"]).unwrap();

        assert_eq!(
            *h.fakes.applications.lookups.borrow(),
            vec![("my-app".to_string(), "my-space-guid".to_string())]
        );
    }

    #[test]
    fn missing_app_fails() {
        let h = Harness::new();
        assert!(h.run("env", &["ghost"]).is_err());
        assert!(h.has_output("App ghost not found"));
    }

    #[test]
    fn requires_a_targeted_space() {
        let mut config = logged_in_config();
        config.set_space_fields(SpaceFields::default());
        let h = Harness::with_config(config);
        h.fakes.applications.applications.borrow_mut().push(Application {
            name: "my-app".into(),
            ..Application::default()
        });

        assert!(h.run("env", &["my-app"]).is_err());
        assert!(h.has_output("No space targeted"));
        assert!(h.fakes.applications.lookups.borrow().is_empty());
    }
}
