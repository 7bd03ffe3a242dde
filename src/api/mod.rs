//! Cloud Controller API access.
//!
//! Each resource type gets a repository trait with one Cloud Controller
//! implementation and one in-memory fake in [`fakes`]. Commands and
//! requirements reach repositories only through the [`RepositoryLocator`].
//!
//! # Modules
//!
//! - [`gateway`] - HTTP transport, pagination and error decoding
//! - [`locator`] - The bundle of repositories handed to commands
//! - [`fakes`] - Recording fakes for tests

pub mod applications;
pub mod authentication;
pub mod endpoints;
pub mod environment_variable_groups;
pub mod fakes;
pub mod gateway;
pub mod locator;
pub mod organizations;
pub mod quotas;
pub mod security_groups;
pub mod space_quotas;
pub mod spaces;

pub use applications::{ApplicationRepository, CloudControllerApplicationRepository};
pub use authentication::{AuthenticationRepository, UaaAuthenticationRepository};
pub use endpoints::{CloudControllerEndpointRepository, EndpointRepository};
pub use environment_variable_groups::{
    CloudControllerEnvironmentVariableGroupsRepository, EnvironmentVariableGroupsRepository,
};
pub use gateway::CloudControllerGateway;
pub use locator::RepositoryLocator;
pub use organizations::{CloudControllerOrganizationRepository, OrganizationRepository};
pub use quotas::{CloudControllerQuotaRepository, QuotaRepository};
pub use security_groups::{
    CloudControllerDefaultSecurityGroupsRepository, CloudControllerSecurityGroupRepository,
    DefaultSecurityGroupsRepository, SecurityGroupRepository,
};
pub use space_quotas::{CloudControllerSpaceQuotaRepository, SpaceQuotaRepository};
pub use spaces::{CloudControllerSpaceRepository, SpaceRepository};

use std::fmt;

/// The two platform-wide defaults: what applies while running and while staging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Running,
    Staging,
}

impl Lifecycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Staging => "staging",
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
