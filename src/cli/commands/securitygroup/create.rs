use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use serde_json::{Map, Value};

use crate::api::RepositoryLocator;
use crate::cli::commands::{current_user, BuiltinCommand, Command, CommandMetadata, Dependency};
use crate::cli::flags::FlagContext;
use crate::config::ConfigRepository;
use crate::error::{CfError, Result, SECURITY_GROUP_NAME_TAKEN};
use crate::requirements::{Requirement, RequirementFactory};
use crate::ui::SharedUi;

const RULES_FILE_EXAMPLE: &str = r#"Valid json file example:
[
  {
    "protocol": "tcp",
    "destination": "10.244.1.18",
    "ports": "3306"
  }
]"#;

/// `cf create-security-group SECURITY_GROUP PATH_TO_JSON_RULES_FILE`.
pub struct CreateSecurityGroup {
    ui: SharedUi,
    config: Rc<RefCell<ConfigRepository>>,
    locator: RepositoryLocator,
}

impl BuiltinCommand for CreateSecurityGroup {
    fn meta() -> CommandMetadata {
        CommandMetadata::new(
            "create-security-group",
            "Create a security group",
            "cf create-security-group SECURITY_GROUP PATH_TO_JSON_RULES_FILE",
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

/// Read a rules file: a JSON array of rule objects.
fn read_rules(path: &Path) -> Result<Vec<Map<String, Value>>> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|_| CfError::InvalidArgument {
        message: format!(
            "Incorrect json format: file: {}\n\n{}",
            path.display(),
            RULES_FILE_EXAMPLE
        ),
    })
}

impl Command for CreateSecurityGroup {
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
            factory.new_login_requirement(),
        ])
    }

    fn execute(&mut self, flags: &FlagContext) -> Result<()> {
        let name = &flags.args()[0];
        let rules = read_rules(Path::new(&flags.args()[1]))?;

        self.ui.borrow_mut().say(&format!(
            "Creating security group {} as {}",
            name,
            current_user(&self.config)
        ));

        match self.locator.security_group_repository().create(name, &rules) {
            Ok(()) => self.ui.borrow_mut().ok(),
            Err(err) if err.error_code() == Some(SECURITY_GROUP_NAME_TAKEN) => {
                let mut ui = self.ui.borrow_mut();
                ui.ok();
                ui.warn(&format!("Security group {} already exists", name));
            }
            Err(err) => return Err(err),
        }
        Ok(())
    }
}
