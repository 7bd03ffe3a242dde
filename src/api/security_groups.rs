//! Application security groups (`/v2/security_groups`) and the platform
//! default sets (`/v2/config/{running,staging}_security_groups`).

use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::rc::Rc;

use crate::error::{CfError, Result};
use crate::models::{Model, Resource, SecurityGroup, SecurityGroupSpace};

use super::{CloudControllerGateway, Lifecycle};

#[derive(Debug, Deserialize)]
struct OrganizationEntity {
    name: String,
}

#[derive(Debug, Deserialize)]
struct SpaceEntity {
    name: String,
    #[serde(default)]
    organization: Option<Resource<OrganizationEntity>>,
}

/// Security group as returned with `inline-relations-depth=2`.
#[derive(Debug, Deserialize)]
struct SecurityGroupEntity {
    #[serde(skip)]
    guid: String,
    name: String,
    #[serde(default)]
    rules: Vec<Map<String, Value>>,
    #[serde(default)]
    spaces: Vec<Resource<SpaceEntity>>,
}

impl Model for SecurityGroupEntity {
    fn set_guid(&mut self, guid: String) {
        self.guid = guid;
    }
}

impl From<SecurityGroupEntity> for SecurityGroup {
    fn from(entity: SecurityGroupEntity) -> Self {
        let spaces = entity
            .spaces
            .into_iter()
            .map(|space| SecurityGroupSpace {
                guid: space.metadata.guid,
                organization_name: space
                    .entity
                    .organization
                    .map(|org| org.entity.name)
                    .unwrap_or_default(),
                name: space.entity.name,
            })
            .collect();

        SecurityGroup {
            guid: entity.guid,
            name: entity.name,
            rules: entity.rules,
            spaces,
        }
    }
}

/// Access to security groups.
pub trait SecurityGroupRepository {
    fn create(&self, name: &str, rules: &[Map<String, Value>]) -> Result<()>;

    /// Fails with [`CfError::ModelNotFound`] when no group has this name.
    fn read(&self, name: &str) -> Result<SecurityGroup>;

    fn find_all(&self) -> Result<Vec<SecurityGroup>>;

    fn delete(&self, guid: &str) -> Result<()>;
}

/// Access to the groups applied to every running or staging application.
pub trait DefaultSecurityGroupsRepository {
    fn bind(&self, lifecycle: Lifecycle, guid: &str) -> Result<()>;

    fn unbind(&self, lifecycle: Lifecycle, guid: &str) -> Result<()>;

    fn list(&self, lifecycle: Lifecycle) -> Result<Vec<SecurityGroup>>;
}

pub struct CloudControllerSecurityGroupRepository {
    gateway: Rc<CloudControllerGateway>,
}

impl CloudControllerSecurityGroupRepository {
    pub fn new(gateway: Rc<CloudControllerGateway>) -> Self {
        Self { gateway }
    }
}

impl SecurityGroupRepository for CloudControllerSecurityGroupRepository {
    fn create(&self, name: &str, rules: &[Map<String, Value>]) -> Result<()> {
        self.gateway
            .create_resource("/v2/security_groups", &json!({ "name": name, "rules": rules }))
    }

    fn read(&self, name: &str) -> Result<SecurityGroup> {
        let filter = format!("name:{}", name);
        self.gateway
            .list_resources_matching::<SecurityGroupEntity>(
                "/v2/security_groups",
                &[("q", filter.as_str()), ("inline-relations-depth", "2")],
            )?
            .into_iter()
            .next()
            .map(SecurityGroup::from)
            .ok_or_else(|| CfError::not_found("Security group", name))
    }

    fn find_all(&self) -> Result<Vec<SecurityGroup>> {
        let groups: Vec<SecurityGroupEntity> = self
            .gateway
            .list_resources_matching("/v2/security_groups", &[("inline-relations-depth", "2")])?;
        Ok(groups.into_iter().map(SecurityGroup::from).collect())
    }

    fn delete(&self, guid: &str) -> Result<()> {
        let path = format!("/v2/security_groups/{}", guid);
        self.gateway.delete_resource(&path)
    }
}

pub struct CloudControllerDefaultSecurityGroupsRepository {
    gateway: Rc<CloudControllerGateway>,
}

impl CloudControllerDefaultSecurityGroupsRepository {
    pub fn new(gateway: Rc<CloudControllerGateway>) -> Self {
        Self { gateway }
    }

    fn path(lifecycle: Lifecycle) -> String {
        format!("/v2/config/{}_security_groups", lifecycle)
    }
}

impl DefaultSecurityGroupsRepository for CloudControllerDefaultSecurityGroupsRepository {
    fn bind(&self, lifecycle: Lifecycle, guid: &str) -> Result<()> {
        self.gateway
            .associate(&format!("{}/{}", Self::path(lifecycle), guid))
    }

    fn unbind(&self, lifecycle: Lifecycle, guid: &str) -> Result<()> {
        self.gateway
            .delete_resource(&format!("{}/{}", Self::path(lifecycle), guid))
    }

    fn list(&self, lifecycle: Lifecycle) -> Result<Vec<SecurityGroup>> {
        let groups: Vec<SecurityGroupEntity> =
            self.gateway.list_all_resources(&Self::path(lifecycle))?;
        Ok(groups.into_iter().map(SecurityGroup::from).collect())
    }
}
