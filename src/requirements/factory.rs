//! Builds requirements bound to the current session.

use std::cell::RefCell;
use std::rc::Rc;

use crate::api::RepositoryLocator;
use crate::config::ConfigRepository;

use super::*;

/// Constructors for every requirement kind.
///
/// Requirements that resolve data come back as their concrete type so the
/// command can keep a handle and read the value after the runner executed it.
pub trait RequirementFactory {
    fn new_api_endpoint_requirement(&self) -> Rc<dyn Requirement>;

    fn new_login_requirement(&self) -> Rc<dyn Requirement>;

    fn new_targeted_org_requirement(&self) -> Rc<TargetedOrgRequirement>;

    fn new_targeted_space_requirement(&self) -> Rc<dyn Requirement>;

    fn new_application_requirement(&self, name: &str) -> Rc<ApplicationRequirement>;

    fn new_organization_requirement(&self, name: &str) -> Rc<OrganizationRequirement>;

    fn new_min_api_version_requirement(
        &self,
        feature: &str,
        required: ApiVersion,
    ) -> Rc<dyn Requirement>;

    fn new_max_api_version_requirement(
        &self,
        feature: &str,
        maximum: ApiVersion,
    ) -> Rc<dyn Requirement>;

    fn new_number_of_arguments_requirement(
        &self,
        args: &[String],
        expected: usize,
        usage: &str,
    ) -> Rc<dyn Requirement>;

    fn new_usage_requirement(
        &self,
        usage: &str,
        message: &str,
        predicate: Box<dyn Fn() -> bool>,
    ) -> Rc<dyn Requirement>;
}

/// The factory used by the CLI: session from `config`, lookups through `locator`.
#[derive(Clone)]
pub struct Factory {
    config: Rc<RefCell<ConfigRepository>>,
    locator: RepositoryLocator,
}

impl Factory {
    pub fn new(config: Rc<RefCell<ConfigRepository>>, locator: RepositoryLocator) -> Self {
        Self { config, locator }
    }
}

impl RequirementFactory for Factory {
    fn new_api_endpoint_requirement(&self) -> Rc<dyn Requirement> {
        Rc::new(ApiEndpointRequirement::new(self.config.clone()))
    }

    fn new_login_requirement(&self) -> Rc<dyn Requirement> {
        Rc::new(LoginRequirement::new(self.config.clone()))
    }

    fn new_targeted_org_requirement(&self) -> Rc<TargetedOrgRequirement> {
        Rc::new(TargetedOrgRequirement::new(self.config.clone()))
    }

    fn new_targeted_space_requirement(&self) -> Rc<dyn Requirement> {
        Rc::new(TargetedSpaceRequirement::new(self.config.clone()))
    }

    fn new_application_requirement(&self, name: &str) -> Rc<ApplicationRequirement> {
        Rc::new(ApplicationRequirement::new(
            name,
            self.config.clone(),
            self.locator.application_repository(),
        ))
    }

    fn new_organization_requirement(&self, name: &str) -> Rc<OrganizationRequirement> {
        Rc::new(OrganizationRequirement::new(
            name,
            self.locator.organization_repository(),
        ))
    }

    fn new_min_api_version_requirement(
        &self,
        feature: &str,
        required: ApiVersion,
    ) -> Rc<dyn Requirement> {
        Rc::new(MinApiVersionRequirement::new(
            self.config.clone(),
            feature,
            required,
        ))
    }

    fn new_max_api_version_requirement(
        &self,
        feature: &str,
        maximum: ApiVersion,
    ) -> Rc<dyn Requirement> {
        Rc::new(MaxApiVersionRequirement::new(
            self.config.clone(),
            feature,
            maximum,
        ))
    }

    fn new_number_of_arguments_requirement(
        &self,
        args: &[String],
        expected: usize,
        usage: &str,
    ) -> Rc<dyn Requirement> {
        Rc::new(NumberOfArgumentsRequirement::new(args, expected, usage))
    }

    fn new_usage_requirement(
        &self,
        usage: &str,
        message: &str,
        predicate: Box<dyn Fn() -> bool>,
    ) -> Rc<dyn Requirement> {
        Rc::new(UsageRequirement::new(usage, message, predicate))
    }
}
