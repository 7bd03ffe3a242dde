use std::cell::RefCell;
use std::rc::Rc;

use crate::api::RepositoryLocator;
use crate::cli::commands::{current_user, BuiltinCommand, Command, CommandMetadata, Dependency};
use crate::cli::flags::{bool_flag, FlagContext};
use crate::config::ConfigRepository;
use crate::error::Result;
use crate::requirements::{Requirement, RequirementFactory};
use crate::ui::SharedUi;

/// `cf delete-security-group SECURITY_GROUP [-f]`.
pub struct DeleteSecurityGroup {
    ui: SharedUi,
    config: Rc<RefCell<ConfigRepository>>,
    locator: RepositoryLocator,
}

impl BuiltinCommand for DeleteSecurityGroup {
    fn meta() -> CommandMetadata {
        CommandMetadata::new(
            "delete-security-group",
            "Deletes a security group",
            "cf delete-security-group SECURITY_GROUP [-f]",
        )
        .flag(bool_flag("f", "Force deletion without confirmation"))
    }

    fn new(deps: Dependency) -> Self {
        Self {
            ui: deps.ui,
            config: deps.config,
            locator: deps.repo_locator,
        }
    }
}

impl Command for DeleteSecurityGroup {
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

        if !flags.bool("f") && !self.ui.borrow_mut().confirm_delete("security group", name)? {
            return Ok(());
        }

        self.ui.borrow_mut().say(&format!(
            "Deleting security group {} as {}",
            name,
            current_user(&self.config)
        ));

        let repo = self.locator.security_group_repository();
        let group = match repo.read(name) {
            Ok(group) => group,
            Err(err) if err.is_not_found() => {
                let mut ui = self.ui.borrow_mut();
                ui.ok();
                ui.warn(&format!("Security group {} does not exist", name));
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        repo.delete(&group.guid)?;
        self.ui.borrow_mut().ok();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::commands::test_support::Harness;
    use crate::models::SecurityGroup;

    #[test]
    fn deletes_after_confirmation() {
        let h = Harness::new();
        h.fakes.security_groups.groups.borrow_mut().push(SecurityGroup {
            guid: "web-guid".into(),
            name: "web".into(),
            ..SecurityGroup::default()
        });
        h.confirm_with(vec![true]);

        h.run("delete-security-group", &["web"]).unwrap();

        assert_eq!(
            h.ui.borrow().prompts_shown(),
            ["Really delete the security group web?"]
        );
        assert_eq!(*h.fakes.security_groups.deleted.borrow(), vec!["web-guid".to_string()]);
    }

    #[test]
    fn missing_group_is_a_warning() {
        let h = Harness::new();

        h.run("delete-security-group", &["-f", "web"]).unwrap();

        assert!(h.has_warning("Security group web does not exist"));
        assert!(h.fakes.security_groups.deleted.borrow().is_empty());
    }
}
