//! The bundle of repositories handed to commands and requirements.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::config::ConfigRepository;

use super::*;

/// Cheap to clone: every repository sits behind an `Rc`.
///
/// Tests start from [`RepositoryLocator::new`] (or any locator) and swap in
/// fakes with the `with_*` builders.
#[derive(Clone)]
pub struct RepositoryLocator {
    endpoints: Rc<dyn EndpointRepository>,
    authentication: Rc<dyn AuthenticationRepository>,
    organizations: Rc<dyn OrganizationRepository>,
    spaces: Rc<dyn SpaceRepository>,
    applications: Rc<dyn ApplicationRepository>,
    quotas: Rc<dyn QuotaRepository>,
    space_quotas: Rc<dyn SpaceQuotaRepository>,
    security_groups: Rc<dyn SecurityGroupRepository>,
    default_security_groups: Rc<dyn DefaultSecurityGroupsRepository>,
    environment_variable_groups: Rc<dyn EnvironmentVariableGroupsRepository>,
}

impl RepositoryLocator {
    /// Cloud Controller repositories sharing one gateway over `config`.
    pub fn new(config: Rc<RefCell<ConfigRepository>>, timeout: Duration) -> Self {
        let gateway = Rc::new(CloudControllerGateway::new(config, timeout));
        Self {
            endpoints: Rc::new(CloudControllerEndpointRepository::new(gateway.clone())),
            authentication: Rc::new(UaaAuthenticationRepository::new(gateway.clone())),
            organizations: Rc::new(CloudControllerOrganizationRepository::new(gateway.clone())),
            spaces: Rc::new(CloudControllerSpaceRepository::new(gateway.clone())),
            applications: Rc::new(CloudControllerApplicationRepository::new(gateway.clone())),
            quotas: Rc::new(CloudControllerQuotaRepository::new(gateway.clone())),
            space_quotas: Rc::new(CloudControllerSpaceQuotaRepository::new(gateway.clone())),
            security_groups: Rc::new(CloudControllerSecurityGroupRepository::new(gateway.clone())),
            default_security_groups: Rc::new(CloudControllerDefaultSecurityGroupsRepository::new(
                gateway.clone(),
            )),
            environment_variable_groups: Rc::new(
                CloudControllerEnvironmentVariableGroupsRepository::new(gateway),
            ),
        }
    }

    pub fn endpoint_repository(&self) -> Rc<dyn EndpointRepository> {
        self.endpoints.clone()
    }

    pub fn authentication_repository(&self) -> Rc<dyn AuthenticationRepository> {
        self.authentication.clone()
    }

    pub fn organization_repository(&self) -> Rc<dyn OrganizationRepository> {
        self.organizations.clone()
    }

    pub fn space_repository(&self) -> Rc<dyn SpaceRepository> {
        self.spaces.clone()
    }

    pub fn application_repository(&self) -> Rc<dyn ApplicationRepository> {
        self.applications.clone()
    }

    pub fn quota_repository(&self) -> Rc<dyn QuotaRepository> {
        self.quotas.clone()
    }

    pub fn space_quota_repository(&self) -> Rc<dyn SpaceQuotaRepository> {
        self.space_quotas.clone()
    }

    pub fn security_group_repository(&self) -> Rc<dyn SecurityGroupRepository> {
        self.security_groups.clone()
    }

    pub fn default_security_groups_repository(&self) -> Rc<dyn DefaultSecurityGroupsRepository> {
        self.default_security_groups.clone()
    }

    pub fn environment_variable_groups_repository(
        &self,
    ) -> Rc<dyn EnvironmentVariableGroupsRepository> {
        self.environment_variable_groups.clone()
    }

    pub fn with_endpoint_repository(mut self, repo: Rc<dyn EndpointRepository>) -> Self {
        self.endpoints = repo;
        self
    }

    pub fn with_authentication_repository(
        mut self,
        repo: Rc<dyn AuthenticationRepository>,
    ) -> Self {
        self.authentication = repo;
        self
    }

    pub fn with_organization_repository(mut self, repo: Rc<dyn OrganizationRepository>) -> Self {
        self.organizations = repo;
        self
    }

    pub fn with_space_repository(mut self, repo: Rc<dyn SpaceRepository>) -> Self {
        self.spaces = repo;
        self
    }

    pub fn with_application_repository(mut self, repo: Rc<dyn ApplicationRepository>) -> Self {
        self.applications = repo;
        self
    }

    pub fn with_quota_repository(mut self, repo: Rc<dyn QuotaRepository>) -> Self {
        self.quotas = repo;
        self
    }

    pub fn with_space_quota_repository(mut self, repo: Rc<dyn SpaceQuotaRepository>) -> Self {
        self.space_quotas = repo;
        self
    }

    pub fn with_security_group_repository(
        mut self,
        repo: Rc<dyn SecurityGroupRepository>,
    ) -> Self {
        self.security_groups = repo;
        self
    }

    pub fn with_default_security_groups_repository(
        mut self,
        repo: Rc<dyn DefaultSecurityGroupsRepository>,
    ) -> Self {
        self.default_security_groups = repo;
        self
    }

    pub fn with_environment_variable_groups_repository(
        mut self,
        repo: Rc<dyn EnvironmentVariableGroupsRepository>,
    ) -> Self {
        self.environment_variable_groups = repo;
        self
    }
}
