//! Integration tests for the registry and runner public API.

use std::cell::RefCell;
use std::rc::Rc;

use cf::api::fakes::FakeRepositories;
use cf::cli::{Command, CommandMetadata, CommandRegistry, CommandRunner, Dependency, FlagContext};
use cf::config::{ConfigRepository, OrganizationFields};
use cf::error::Result;
use cf::models::QuotaFields;
use cf::requirements::{Failing, Factory, Passing, Requirement, RequirementFactory};
use cf::ui::{MockUI, SharedUi};
use cf::CfError;

struct Session {
    ui: Rc<RefCell<MockUI>>,
    config: Rc<RefCell<ConfigRepository>>,
    fakes: FakeRepositories,
}

impl Session {
    fn logged_in() -> Self {
        let mut config = ConfigRepository::in_memory();
        config.set_api_endpoint("https://api.example.com");
        config.set_api_version("2.100.0");
        config.set_access_token("bearer token");
        config.set_username("admin");
        config.set_organization_fields(OrganizationFields::new("org-guid", "my-org"));
        Self {
            ui: Rc::new(RefCell::new(MockUI::new())),
            config: Rc::new(RefCell::new(config)),
            fakes: FakeRepositories::new(),
        }
    }

    fn run(&self, registry: &CommandRegistry, name: &str, args: &[&str]) -> Result<()> {
        self.run_as(registry, name, args, false)
    }

    fn run_as(
        &self,
        registry: &CommandRegistry,
        name: &str,
        args: &[&str],
        plugin_call: bool,
    ) -> Result<()> {
        let locator = self.fakes.locator();
        let ui: SharedUi = self.ui.clone();
        let deps = Dependency {
            ui,
            config: self.config.clone(),
            repo_locator: locator.clone(),
            plugin_call,
        };
        let factory = Factory::new(self.config.clone(), locator);
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        CommandRunner::new(registry, &factory, deps).run_cmd_by_name(name, &args)
    }
}

/// Records which phase of the pipeline reached it.
struct Recorder {
    log: Rc<RefCell<Vec<String>>>,
    fail_requirements: bool,
}

impl Command for Recorder {
    fn metadata(&self) -> CommandMetadata {
        CommandMetadata::new("recorder", "Record the pipeline", "cf recorder")
    }

    fn requirements(
        &mut self,
        _factory: &dyn RequirementFactory,
        flags: &FlagContext,
    ) -> Result<Vec<Rc<dyn Requirement>>> {
        self.log.borrow_mut().push(format!("requirements {:?}", flags.args()));
        let mut reqs: Vec<Rc<dyn Requirement>> = vec![Rc::new(Passing)];
        if self.fail_requirements {
            reqs.push(Rc::new(Failing::new("stop here")));
        }
        Ok(reqs)
    }

    fn execute(&mut self, _flags: &FlagContext) -> Result<()> {
        self.log.borrow_mut().push("execute".to_string());
        Ok(())
    }
}

fn registry_with_recorder(log: &Rc<RefCell<Vec<String>>>, fail_requirements: bool) -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    let log = log.clone();
    registry.register_with(
        CommandMetadata::new("recorder", "Record the pipeline", "cf recorder").alias("r"),
        move |_deps| {
            Box::new(Recorder {
                log: log.clone(),
                fail_requirements,
            })
        },
    );
    registry
}

#[test]
fn custom_command_runs_after_its_requirements() {
    let session = Session::logged_in();
    let log = Rc::new(RefCell::new(Vec::new()));
    let registry = registry_with_recorder(&log, false);

    session.run(&registry, "r", &["one", "two"]).unwrap();

    assert_eq!(
        *log.borrow(),
        vec![
            "requirements [\"one\", \"two\"]".to_string(),
            "execute".to_string()
        ]
    );
}

#[test]
fn failing_requirement_stops_the_command() {
    let session = Session::logged_in();
    let log = Rc::new(RefCell::new(Vec::new()));
    let registry = registry_with_recorder(&log, true);

    let err = session.run(&registry, "recorder", &[]).unwrap_err();

    assert!(matches!(err, CfError::Requirement(_)));
    assert_eq!(log.borrow().len(), 1);
    assert!(session.ui.borrow().has_outputs_in_order(&["FAILED", "stop here"]));
}

#[test]
fn builtins_share_one_registry() {
    let registry = CommandRegistry::with_builtins();
    let names: Vec<String> = registry.metadatas().into_iter().map(|m| m.name).collect();

    for name in ["create-quota", "space-quotas", "security-group", "env", "help"] {
        assert!(names.iter().any(|n| n == name), "missing {}", name);
    }
    assert!(matches!(
        registry.find("frobnicate"),
        Err(CfError::CommandNotFound { .. })
    ));
}

#[test]
fn delete_quota_of_unknown_quota_is_a_warning() {
    let session = Session::logged_in();
    let registry = CommandRegistry::with_builtins();

    session
        .run(&registry, "delete-quota", &["-f", "my-quota"])
        .unwrap();

    let ui = session.ui.borrow();
    assert!(ui.has_warning("Quota my-quota does not exist"));
    assert!(session.fakes.quotas.deleted.borrow().is_empty());
}

#[test]
fn create_then_list_quotas_through_fakes() {
    let session = Session::logged_in();
    let registry = CommandRegistry::with_builtins();
    session.fakes.quotas.quotas.borrow_mut().push(QuotaFields {
        name: "existing".into(),
        memory_limit: 2048,
        ..QuotaFields::default()
    });

    session
        .run(&registry, "create-quota", &["fresh", "-m", "1G"])
        .unwrap();
    session.run(&registry, "quotas", &[]).unwrap();

    assert_eq!(session.fakes.quotas.created.borrow()[0].memory_limit, 1024);
    let ui = session.ui.borrow();
    assert_eq!(ui.tables()[0].rows()[0][0], "existing");
}

#[test]
fn plugin_invocations_reach_the_constructor_and_run_builtins_unchanged() {
    let session = Session::logged_in();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut registry = CommandRegistry::with_builtins();
    let record = seen.clone();
    registry.register_with(
        CommandMetadata::new("recorder", "Record the pipeline", "cf recorder"),
        move |deps| {
            record.borrow_mut().push(deps.plugin_call);
            Box::new(Recorder {
                log: Rc::new(RefCell::new(Vec::new())),
                fail_requirements: false,
            })
        },
    );

    session.run_as(&registry, "recorder", &[], true).unwrap();
    session.run_as(&registry, "recorder", &[], false).unwrap();
    assert_eq!(*seen.borrow(), [true, false]);

    session.run_as(&registry, "delete-quota", &["-f", "ghost"], true).unwrap();
    assert!(session.ui.borrow().has_warning("Quota ghost does not exist"));
}
