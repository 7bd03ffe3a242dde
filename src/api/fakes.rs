//! In-memory repositories that record what commands asked of them.
//!
//! Every fake keeps its data in `RefCell`s so tests can seed it before a run
//! and inspect the recorded calls afterwards. Errors are injected per method
//! through [`Failures`] and fire once.

use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use crate::config::ConfigRepository;
use crate::error::{CfError, Result};
use crate::models::{
    ApiInfo, Application, ApplicationEnv, EnvironmentVariable, Organization, QuotaFields,
    SecurityGroup, Space, SpaceQuota, TokenGrant,
};

use super::*;

/// One-shot errors keyed by method name.
#[derive(Default)]
pub struct Failures(RefCell<HashMap<&'static str, CfError>>);

impl Failures {
    /// Make the next call to `method` fail with `error`.
    pub fn set(&self, method: &'static str, error: CfError) {
        self.0.borrow_mut().insert(method, error);
    }

    fn check(&self, method: &'static str) -> Result<()> {
        match self.0.borrow_mut().remove(method) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct FakeEndpointRepository {
    pub info: RefCell<ApiInfo>,
    pub requested: RefCell<Vec<String>>,
    pub failures: Failures,
}

impl EndpointRepository for FakeEndpointRepository {
    fn get_info(&self, endpoint: &str) -> Result<ApiInfo> {
        self.requested.borrow_mut().push(endpoint.to_string());
        self.failures.check("get_info")?;
        Ok(self.info.borrow().clone())
    }
}

#[derive(Default)]
pub struct FakeAuthenticationRepository {
    pub grant: RefCell<TokenGrant>,
    pub credentials: RefCell<Vec<(String, String)>>,
    pub failures: Failures,
}

impl AuthenticationRepository for FakeAuthenticationRepository {
    fn authenticate(&self, username: &str, password: &str) -> Result<TokenGrant> {
        self.credentials
            .borrow_mut()
            .push((username.to_string(), password.to_string()));
        self.failures.check("authenticate")?;
        Ok(self.grant.borrow().clone())
    }
}

#[derive(Default)]
pub struct FakeOrganizationRepository {
    pub organizations: RefCell<Vec<Organization>>,
    pub lookups: RefCell<Vec<String>>,
    pub failures: Failures,
}

impl OrganizationRepository for FakeOrganizationRepository {
    fn find_by_name(&self, name: &str) -> Result<Organization> {
        self.lookups.borrow_mut().push(name.to_string());
        self.failures.check("find_by_name")?;
        self.organizations
            .borrow()
            .iter()
            .find(|org| org.name.eq_ignore_ascii_case(name))
            .cloned()
            .ok_or_else(|| CfError::not_found("Org", name))
    }
}

#[derive(Default)]
pub struct FakeSpaceRepository {
    pub spaces: RefCell<Vec<Space>>,
    pub failures: Failures,
}

impl SpaceRepository for FakeSpaceRepository {
    fn find_by_name_in_org(&self, name: &str, org_guid: &str) -> Result<Space> {
        self.failures.check("find_by_name_in_org")?;
        self.spaces
            .borrow()
            .iter()
            .find(|space| space.name.eq_ignore_ascii_case(name) && space.organization_guid == org_guid)
            .cloned()
            .ok_or_else(|| CfError::not_found("Space", name))
    }
}

#[derive(Default)]
pub struct FakeApplicationRepository {
    pub applications: RefCell<Vec<Application>>,
    pub environments: RefCell<HashMap<String, ApplicationEnv>>,
    pub lookups: RefCell<Vec<(String, String)>>,
    pub failures: Failures,
}

impl ApplicationRepository for FakeApplicationRepository {
    fn read(&self, name: &str, space_guid: &str) -> Result<Application> {
        self.lookups
            .borrow_mut()
            .push((name.to_string(), space_guid.to_string()));
        self.failures.check("read")?;
        self.applications
            .borrow()
            .iter()
            .find(|app| app.name == name)
            .cloned()
            .ok_or_else(|| CfError::not_found("App", name))
    }

    fn read_env(&self, app_guid: &str) -> Result<ApplicationEnv> {
        self.failures.check("read_env")?;
        Ok(self
            .environments
            .borrow()
            .get(app_guid)
            .cloned()
            .unwrap_or_default())
    }
}

#[derive(Default)]
pub struct FakeQuotaRepository {
    pub quotas: RefCell<Vec<QuotaFields>>,
    pub created: RefCell<Vec<QuotaFields>>,
    pub updated: RefCell<Vec<QuotaFields>>,
    pub assigned: RefCell<Vec<(String, String)>>,
    pub deleted: RefCell<Vec<String>>,
    pub failures: Failures,
}

impl QuotaRepository for FakeQuotaRepository {
    fn find_all(&self) -> Result<Vec<QuotaFields>> {
        self.failures.check("find_all")?;
        Ok(self.quotas.borrow().clone())
    }

    fn find_by_name(&self, name: &str) -> Result<QuotaFields> {
        self.failures.check("find_by_name")?;
        self.quotas
            .borrow()
            .iter()
            .find(|quota| quota.name == name)
            .cloned()
            .ok_or_else(|| CfError::not_found("Quota", name))
    }

    fn create(&self, quota: &QuotaFields) -> Result<()> {
        self.failures.check("create")?;
        self.created.borrow_mut().push(quota.clone());
        Ok(())
    }

    fn update(&self, quota: &QuotaFields) -> Result<()> {
        self.failures.check("update")?;
        self.updated.borrow_mut().push(quota.clone());
        Ok(())
    }

    fn assign_quota_to_org(&self, org_guid: &str, quota_guid: &str) -> Result<()> {
        self.failures.check("assign_quota_to_org")?;
        self.assigned
            .borrow_mut()
            .push((org_guid.to_string(), quota_guid.to_string()));
        Ok(())
    }

    fn delete(&self, quota_guid: &str) -> Result<()> {
        self.failures.check("delete")?;
        self.deleted.borrow_mut().push(quota_guid.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeSpaceQuotaRepository {
    pub quotas: RefCell<Vec<SpaceQuota>>,
    pub created: RefCell<Vec<SpaceQuota>>,
    pub associated: RefCell<Vec<(String, String)>>,
    pub deleted: RefCell<Vec<String>>,
    pub failures: Failures,
}

impl SpaceQuotaRepository for FakeSpaceQuotaRepository {
    fn find_by_org(&self, org_guid: &str) -> Result<Vec<SpaceQuota>> {
        self.failures.check("find_by_org")?;
        Ok(self
            .quotas
            .borrow()
            .iter()
            .filter(|quota| quota.organization_guid == org_guid)
            .cloned()
            .collect())
    }

    fn find_by_name_and_org_guid(&self, name: &str, org_guid: &str) -> Result<SpaceQuota> {
        self.failures.check("find_by_name_and_org_guid")?;
        self.quotas
            .borrow()
            .iter()
            .find(|quota| quota.organization_guid == org_guid && quota.name.eq_ignore_ascii_case(name))
            .cloned()
            .ok_or_else(|| CfError::not_found("Space Quota", name))
    }

    fn create(&self, quota: &SpaceQuota) -> Result<()> {
        self.failures.check("create")?;
        self.created.borrow_mut().push(quota.clone());
        Ok(())
    }

    fn associate_space_with_quota(&self, space_guid: &str, quota_guid: &str) -> Result<()> {
        self.failures.check("associate_space_with_quota")?;
        self.associated
            .borrow_mut()
            .push((space_guid.to_string(), quota_guid.to_string()));
        Ok(())
    }

    fn delete(&self, quota_guid: &str) -> Result<()> {
        self.failures.check("delete")?;
        self.deleted.borrow_mut().push(quota_guid.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeSecurityGroupRepository {
    pub groups: RefCell<Vec<SecurityGroup>>,
    pub created: RefCell<Vec<(String, Vec<Map<String, Value>>)>>,
    pub deleted: RefCell<Vec<String>>,
    pub failures: Failures,
}

impl SecurityGroupRepository for FakeSecurityGroupRepository {
    fn create(&self, name: &str, rules: &[Map<String, Value>]) -> Result<()> {
        self.failures.check("create")?;
        self.created
            .borrow_mut()
            .push((name.to_string(), rules.to_vec()));
        Ok(())
    }

    fn read(&self, name: &str) -> Result<SecurityGroup> {
        self.failures.check("read")?;
        self.groups
            .borrow()
            .iter()
            .find(|group| group.name == name)
            .cloned()
            .ok_or_else(|| CfError::not_found("Security group", name))
    }

    fn find_all(&self) -> Result<Vec<SecurityGroup>> {
        self.failures.check("find_all")?;
        Ok(self.groups.borrow().clone())
    }

    fn delete(&self, guid: &str) -> Result<()> {
        self.failures.check("delete")?;
        self.deleted.borrow_mut().push(guid.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeDefaultSecurityGroupsRepository {
    pub running: RefCell<Vec<SecurityGroup>>,
    pub staging: RefCell<Vec<SecurityGroup>>,
    pub bound: RefCell<Vec<(Lifecycle, String)>>,
    pub unbound: RefCell<Vec<(Lifecycle, String)>>,
    pub failures: Failures,
}

impl DefaultSecurityGroupsRepository for FakeDefaultSecurityGroupsRepository {
    fn bind(&self, lifecycle: Lifecycle, guid: &str) -> Result<()> {
        self.failures.check("bind")?;
        self.bound.borrow_mut().push((lifecycle, guid.to_string()));
        Ok(())
    }

    fn unbind(&self, lifecycle: Lifecycle, guid: &str) -> Result<()> {
        self.failures.check("unbind")?;
        self.unbound.borrow_mut().push((lifecycle, guid.to_string()));
        Ok(())
    }

    fn list(&self, lifecycle: Lifecycle) -> Result<Vec<SecurityGroup>> {
        self.failures.check("list")?;
        Ok(match lifecycle {
            Lifecycle::Running => self.running.borrow().clone(),
            Lifecycle::Staging => self.staging.borrow().clone(),
        })
    }
}

#[derive(Default)]
pub struct FakeEnvironmentVariableGroupsRepository {
    pub running: RefCell<Vec<EnvironmentVariable>>,
    pub staging: RefCell<Vec<EnvironmentVariable>>,
    pub set_calls: RefCell<Vec<(Lifecycle, Map<String, Value>)>>,
    pub failures: Failures,
}

impl EnvironmentVariableGroupsRepository for FakeEnvironmentVariableGroupsRepository {
    fn list(&self, lifecycle: Lifecycle) -> Result<Vec<EnvironmentVariable>> {
        self.failures.check("list")?;
        Ok(match lifecycle {
            Lifecycle::Running => self.running.borrow().clone(),
            Lifecycle::Staging => self.staging.borrow().clone(),
        })
    }

    fn set(&self, lifecycle: Lifecycle, variables: &Map<String, Value>) -> Result<()> {
        self.failures.check("set")?;
        self.set_calls
            .borrow_mut()
            .push((lifecycle, variables.clone()));
        Ok(())
    }
}

/// One fake of every repository, wired into a [`RepositoryLocator`] on demand.
#[derive(Default, Clone)]
pub struct FakeRepositories {
    pub endpoints: Rc<FakeEndpointRepository>,
    pub authentication: Rc<FakeAuthenticationRepository>,
    pub organizations: Rc<FakeOrganizationRepository>,
    pub spaces: Rc<FakeSpaceRepository>,
    pub applications: Rc<FakeApplicationRepository>,
    pub quotas: Rc<FakeQuotaRepository>,
    pub space_quotas: Rc<FakeSpaceQuotaRepository>,
    pub security_groups: Rc<FakeSecurityGroupRepository>,
    pub default_security_groups: Rc<FakeDefaultSecurityGroupsRepository>,
    pub environment_variable_groups: Rc<FakeEnvironmentVariableGroupsRepository>,
}

impl FakeRepositories {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locator(&self) -> RepositoryLocator {
        let config = Rc::new(RefCell::new(ConfigRepository::in_memory()));
        RepositoryLocator::new(config, Duration::from_secs(1))
            .with_endpoint_repository(self.endpoints.clone())
            .with_authentication_repository(self.authentication.clone())
            .with_organization_repository(self.organizations.clone())
            .with_space_repository(self.spaces.clone())
            .with_application_repository(self.applications.clone())
            .with_quota_repository(self.quotas.clone())
            .with_space_quota_repository(self.space_quotas.clone())
            .with_security_group_repository(self.security_groups.clone())
            .with_default_security_groups_repository(self.default_security_groups.clone())
            .with_environment_variable_groups_repository(
                self.environment_variable_groups.clone(),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injected_failure_fires_once() {
        let fakes = FakeRepositories::new();
        fakes
            .quotas
            .failures
            .set("find_all", CfError::InvalidArgument {
                message: "boom".into(),
            });

        let locator = fakes.locator();
        let repo = locator.quota_repository();
        assert!(repo.find_all().is_err());
        assert!(repo.find_all().is_ok());
    }

    #[test]
    fn locator_hands_out_the_same_fake() {
        let fakes = FakeRepositories::new();
        let locator = fakes.locator();

        locator.quota_repository().delete("quota-guid").unwrap();

        assert_eq!(*fakes.quotas.deleted.borrow(), vec!["quota-guid".to_string()]);
    }
}
