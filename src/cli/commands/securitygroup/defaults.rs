//! The platform-wide running and staging security group sets.
//!
//! Each command exists once per [`Phase`], which picks the lifecycle and
//! the command name.

use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::api::{Lifecycle, RepositoryLocator};
use crate::cli::commands::phase::Phase;
use crate::cli::commands::{current_user, BuiltinCommand, Command, CommandMetadata, Dependency};
use crate::cli::flags::FlagContext;
use crate::config::ConfigRepository;
use crate::error::Result;
use crate::requirements::{Requirement, RequirementFactory};
use crate::ui::SharedUi;

/// Shown after a bind or unbind.
fn restart_tip(lifecycle: Lifecycle) -> &'static str {
    match lifecycle {
        Lifecycle::Running => {
            "TIP: Changes will not apply to existing running applications until they are restarted."
        }
        Lifecycle::Staging => {
            "TIP: Changes will not apply to existing applications until they are restaged."
        }
    }
}

/// Fields every default-set command carries.
struct Context {
    ui: SharedUi,
    config: Rc<RefCell<ConfigRepository>>,
    locator: RepositoryLocator,
}

impl Context {
    fn new(deps: Dependency) -> Self {
        Self {
            ui: deps.ui,
            config: deps.config,
            locator: deps.repo_locator,
        }
    }
}

/// `cf running-security-groups` / `cf staging-security-groups`.
pub struct DefaultSecurityGroups<P> {
    ctx: Context,
    phase: PhantomData<P>,
}

impl<P: Phase> BuiltinCommand for DefaultSecurityGroups<P> {
    fn meta() -> CommandMetadata {
        let lifecycle = P::LIFECYCLE;
        CommandMetadata::new(
            &format!("{}-security-groups", lifecycle),
            &format!("List security groups in the {} set", lifecycle),
            &format!("cf {}-security-groups", lifecycle),
        )
    }

    fn new(deps: Dependency) -> Self {
        Self {
            ctx: Context::new(deps),
            phase: PhantomData,
        }
    }
}

impl<P: Phase> Command for DefaultSecurityGroups<P> {
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
        self.ctx.ui.borrow_mut().say(&format!(
            "Acquiring {} security groups as '{}'",
            lifecycle,
            current_user(&self.ctx.config)
        ));
        let groups = self
            .ctx
            .locator
            .default_security_groups_repository()
            .list(lifecycle)?;

        let mut ui = self.ctx.ui.borrow_mut();
        ui.ok();
        ui.say("");
        if groups.is_empty() {
            ui.say(&format!("No {} security groups set", lifecycle));
        }
        for group in &groups {
            ui.say(&group.name);
        }
        Ok(())
    }
}

/// `cf bind-running-security-group` / `cf bind-staging-security-group`.
pub struct BindDefaultSecurityGroup<P> {
    ctx: Context,
    phase: PhantomData<P>,
}

impl<P: Phase> BuiltinCommand for BindDefaultSecurityGroup<P> {
    fn meta() -> CommandMetadata {
        let lifecycle = P::LIFECYCLE;
        CommandMetadata::new(
            &format!("bind-{}-security-group", lifecycle),
            &format!(
                "Bind a security group to the list of security groups to be used for {} applications",
                lifecycle
            ),
            &format!("cf bind-{}-security-group SECURITY_GROUP", lifecycle),
        )
    }

    fn new(deps: Dependency) -> Self {
        Self {
            ctx: Context::new(deps),
            phase: PhantomData,
        }
    }
}

impl<P: Phase> Command for BindDefaultSecurityGroup<P> {
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
        let group = self.ctx.locator.security_group_repository().read(name)?;

        self.ctx.ui.borrow_mut().say(&format!(
            "Binding security group {} to defaults for {} as {}",
            group.name,
            P::LIFECYCLE,
            current_user(&self.ctx.config)
        ));
        self.ctx
            .locator
            .default_security_groups_repository()
            .bind(P::LIFECYCLE, &group.guid)?;

        let mut ui = self.ctx.ui.borrow_mut();
        ui.ok();
        ui.say("");
        ui.say(restart_tip(P::LIFECYCLE));
        Ok(())
    }
}

/// `cf unbind-running-security-group` / `cf unbind-staging-security-group`.
pub struct UnbindDefaultSecurityGroup<P> {
    ctx: Context,
    phase: PhantomData<P>,
}

impl<P: Phase> BuiltinCommand for UnbindDefaultSecurityGroup<P> {
    fn meta() -> CommandMetadata {
        let lifecycle = P::LIFECYCLE;
        CommandMetadata::new(
            &format!("unbind-{}-security-group", lifecycle),
            &format!(
                "Unbind a security group from the set of security groups for {} applications",
                lifecycle
            ),
            &format!("cf unbind-{}-security-group SECURITY_GROUP", lifecycle),
        )
    }

    fn new(deps: Dependency) -> Self {
        Self {
            ctx: Context::new(deps),
            phase: PhantomData,
        }
    }
}

impl<P: Phase> Command for UnbindDefaultSecurityGroup<P> {
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
        self.ctx.ui.borrow_mut().say(&format!(
            "Unbinding security group {} from defaults for {} as {}",
            name,
            P::LIFECYCLE,
            current_user(&self.ctx.config)
        ));

        let group = match self.ctx.locator.security_group_repository().read(name) {
            Ok(group) => group,
            Err(err) if err.is_not_found() => {
                let mut ui = self.ctx.ui.borrow_mut();
                ui.ok();
                ui.warn(&format!("Security group {} does not exist", name));
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        self.ctx
            .locator
            .default_security_groups_repository()
            .unbind(P::LIFECYCLE, &group.guid)?;

        let mut ui = self.ctx.ui.borrow_mut();
        ui.ok();
        ui.say("");
        ui.say(restart_tip(P::LIFECYCLE));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::api::Lifecycle;
    use crate::cli::commands::test_support::Harness;
    use crate::models::SecurityGroup;

    fn group(name: &str) -> SecurityGroup {
        SecurityGroup {
            guid: format!("{}-guid", name),
            name: name.into(),
            ..SecurityGroup::default()
        }
    }

    #[test]
    fn lists_running_set_by_name() {
        let h = Harness::new();
        h.fakes
            .default_security_groups
            .running
            .borrow_mut()
            .extend([group("public_networks"), group("dns")]);

        h.run("running-security-groups", &[]).unwrap();

        assert!(h.has_outputs_in_order(&[
            "Acquiring running security groups as 'my-user'",
            "OK",
            "public_networks",
            "dns",
        ]));
    }

    #[test]
    fn empty_staging_set() {
        let h = Harness::new();
        h.run("staging-security-groups", &[]).unwrap();
        assert!(h.has_output("No staging security groups set"));
    }

    #[test]
    fn binds_to_the_matching_lifecycle() {
        let h = Harness::new();
        h.fakes.security_groups.groups.borrow_mut().push(group("web"));

        h.run("bind-staging-security-group", &["web"]).unwrap();
        h.run("bind-running-security-group", &["web"]).unwrap();

        assert_eq!(
            *h.fakes.default_security_groups.bound.borrow(),
            vec![
                (Lifecycle::Staging, "web-guid".to_string()),
                (Lifecycle::Running, "web-guid".to_string()),
            ]
        );
        assert!(h.has_output("Binding security group web to defaults for staging as my-user"));
        assert!(h.has_output("TIP: Changes will not apply to existing running applications"));
    }

    #[test]
    fn binding_a_missing_group_fails() {
        let h = Harness::new();
        assert!(h.run("bind-running-security-group", &["ghost"]).is_err());
        assert!(h.has_output("Security group ghost not found"));
        assert!(h.fakes.default_security_groups.bound.borrow().is_empty());
    }

    #[test]
    fn unbinds_existing_group() {
        let h = Harness::new();
        h.fakes.security_groups.groups.borrow_mut().push(group("web"));

        h.run("unbind-running-security-group", &["web"]).unwrap();

        assert_eq!(
            *h.fakes.default_security_groups.unbound.borrow(),
            vec![(Lifecycle::Running, "web-guid".to_string())]
        );
    }

    #[test]
    fn unbinding_a_missing_group_warns() {
        let h = Harness::new();

        h.run("unbind-staging-security-group", &["ghost"]).unwrap();

        assert!(h.has_warning("Security group ghost does not exist"));
        assert!(h.fakes.default_security_groups.unbound.borrow().is_empty());
    }
}
