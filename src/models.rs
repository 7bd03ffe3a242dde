//! Cloud Controller resource models.
//!
//! The v2 API wraps every entity as `{"metadata": {"guid": ...}, "entity": {...}}`.
//! Models deserialize from the entity and pick up their GUID through
//! [`Model::set_guid`] when a [`Resource`] is unwrapped.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata block shared by every v2 resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceMetadata {
    pub guid: String,
    #[serde(default)]
    pub url: String,
}

/// One v2 resource.
#[derive(Debug, Clone, Deserialize)]
pub struct Resource<T> {
    pub metadata: ResourceMetadata,
    pub entity: T,
}

/// One page of a v2 list response.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResources<T> {
    #[serde(default)]
    pub next_url: Option<String>,
    #[serde(default = "Vec::new")]
    pub resources: Vec<Resource<T>>,
}

/// An entity that carries the GUID of its resource.
pub trait Model: DeserializeOwned {
    fn set_guid(&mut self, guid: String);
}

impl<T: Model> Resource<T> {
    /// Unwrap the entity, copying the GUID from the metadata.
    pub fn into_model(self) -> T {
        let mut model = self.entity;
        model.set_guid(self.metadata.guid);
        model
    }
}

/// An organization quota definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotaFields {
    #[serde(skip)]
    pub guid: String,
    pub name: String,
    /// Total memory in megabytes.
    #[serde(default)]
    pub memory_limit: i64,
    /// Per-instance memory in megabytes, `-1` for unlimited.
    #[serde(default = "unlimited")]
    pub instance_memory_limit: i64,
    #[serde(rename = "total_routes", default)]
    pub routes_limit: i64,
    #[serde(rename = "total_services", default)]
    pub services_limit: i64,
    #[serde(default)]
    pub non_basic_services_allowed: bool,
    #[serde(default = "unlimited")]
    pub app_instance_limit: i64,
    #[serde(
        rename = "total_reserved_route_ports",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub reserved_route_ports: Option<i64>,
}

impl Default for QuotaFields {
    fn default() -> Self {
        Self {
            guid: String::new(),
            name: String::new(),
            memory_limit: 0,
            instance_memory_limit: -1,
            routes_limit: 0,
            services_limit: 0,
            non_basic_services_allowed: false,
            app_instance_limit: -1,
            reserved_route_ports: None,
        }
    }
}

impl Model for QuotaFields {
    fn set_guid(&mut self, guid: String) {
        self.guid = guid;
    }
}

/// A space quota definition, owned by one organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceQuota {
    #[serde(skip)]
    pub guid: String,
    pub name: String,
    #[serde(default)]
    pub memory_limit: i64,
    #[serde(default = "unlimited")]
    pub instance_memory_limit: i64,
    #[serde(rename = "total_routes", default)]
    pub routes_limit: i64,
    #[serde(rename = "total_services", default)]
    pub services_limit: i64,
    #[serde(default)]
    pub non_basic_services_allowed: bool,
    #[serde(default)]
    pub organization_guid: String,
    #[serde(default = "unlimited")]
    pub app_instance_limit: i64,
    #[serde(
        rename = "total_reserved_route_ports",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub reserved_route_ports: Option<i64>,
}

impl Default for SpaceQuota {
    fn default() -> Self {
        Self {
            guid: String::new(),
            name: String::new(),
            memory_limit: 0,
            instance_memory_limit: -1,
            routes_limit: 0,
            services_limit: 0,
            non_basic_services_allowed: false,
            organization_guid: String::new(),
            app_instance_limit: -1,
            reserved_route_ports: None,
        }
    }
}

impl Model for SpaceQuota {
    fn set_guid(&mut self, guid: String) {
        self.guid = guid;
    }
}

fn unlimited() -> i64 {
    -1
}

/// An organization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Organization {
    #[serde(skip)]
    pub guid: String,
    pub name: String,
    #[serde(default)]
    pub quota_definition_guid: Option<String>,
}

impl Model for Organization {
    fn set_guid(&mut self, guid: String) {
        self.guid = guid;
    }
}

/// A space inside an organization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Space {
    #[serde(skip)]
    pub guid: String,
    pub name: String,
    #[serde(default)]
    pub organization_guid: String,
    #[serde(default)]
    pub space_quota_definition_guid: Option<String>,
}

impl Model for Space {
    fn set_guid(&mut self, guid: String) {
        self.guid = guid;
    }
}

/// An application.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Application {
    #[serde(skip)]
    pub guid: String,
    pub name: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub instances: i64,
    #[serde(default)]
    pub memory: i64,
}

impl Model for Application {
    fn set_guid(&mut self, guid: String) {
        self.guid = guid;
    }
}

/// The environment of an application as reported by `/v2/apps/:guid/env`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApplicationEnv {
    pub system_env_json: Map<String, Value>,
    pub application_env_json: Map<String, Value>,
    pub environment_json: Map<String, Value>,
    pub running_env_json: Map<String, Value>,
    pub staging_env_json: Map<String, Value>,
}

/// A space a security group is bound to, with its organization's name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecurityGroupSpace {
    pub guid: String,
    pub name: String,
    pub organization_name: String,
}

/// A security group and the spaces it is bound to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecurityGroup {
    pub guid: String,
    pub name: String,
    pub rules: Vec<Map<String, Value>>,
    pub spaces: Vec<SecurityGroupSpace>,
}

/// One variable of an environment variable group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentVariable {
    pub name: String,
    pub value: String,
}

/// The answer of `/v2/info`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiInfo {
    pub api_version: String,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub name: String,
}

/// Tokens granted by the UAA.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default = "bearer")]
    pub token_type: String,
}

impl TokenGrant {
    /// The value stored in the session, e.g. `bearer abc`.
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

fn bearer() -> String {
    "bearer".to_string()
}
