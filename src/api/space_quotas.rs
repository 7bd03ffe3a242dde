//! Space quota definitions (`/v2/space_quota_definitions`).

use std::rc::Rc;

use crate::error::{CfError, Result};
use crate::models::SpaceQuota;

use super::CloudControllerGateway;

/// Access to the space quotas of an organization.
pub trait SpaceQuotaRepository {
    fn find_by_org(&self, org_guid: &str) -> Result<Vec<SpaceQuota>>;

    /// Fails with [`CfError::ModelNotFound`] when the org has no quota with this name.
    fn find_by_name_and_org_guid(&self, name: &str, org_guid: &str) -> Result<SpaceQuota>;

    fn create(&self, quota: &SpaceQuota) -> Result<()>;

    fn associate_space_with_quota(&self, space_guid: &str, quota_guid: &str) -> Result<()>;

    fn delete(&self, quota_guid: &str) -> Result<()>;
}

pub struct CloudControllerSpaceQuotaRepository {
    gateway: Rc<CloudControllerGateway>,
}

impl CloudControllerSpaceQuotaRepository {
    pub fn new(gateway: Rc<CloudControllerGateway>) -> Self {
        Self { gateway }
    }
}

impl SpaceQuotaRepository for CloudControllerSpaceQuotaRepository {
    fn find_by_org(&self, org_guid: &str) -> Result<Vec<SpaceQuota>> {
        let path = format!("/v2/organizations/{}/space_quota_definitions", org_guid);
        self.gateway.list_all_resources(&path)
    }

    fn find_by_name_and_org_guid(&self, name: &str, org_guid: &str) -> Result<SpaceQuota> {
        self.find_by_org(org_guid)?
            .into_iter()
            .find(|quota| quota.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| CfError::not_found("Space Quota", name))
    }

    fn create(&self, quota: &SpaceQuota) -> Result<()> {
        self.gateway
            .create_resource("/v2/space_quota_definitions", quota)
    }

    fn associate_space_with_quota(&self, space_guid: &str, quota_guid: &str) -> Result<()> {
        let path = format!(
            "/v2/space_quota_definitions/{}/spaces/{}",
            quota_guid, space_guid
        );
        self.gateway.associate(&path)
    }

    fn delete(&self, quota_guid: &str) -> Result<()> {
        let path = format!("/v2/space_quota_definitions/{}", quota_guid);
        self.gateway.delete_resource(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::gateway_for;
    use httpmock::prelude::*;
    use serde_json::json;

    fn mock_org_quotas(server: &MockServer) {
        server.mock(|when, then| {
            when.method(GET)
                .path("/v2/organizations/org-guid/space_quota_definitions");
            then.status(200).json_body(json!({
                "resources": [
                    {"metadata": {"guid": "q1"}, "entity": {"name": "small", "memory_limit": 512,
                     "organization_guid": "org-guid"}},
                    {"metadata": {"guid": "q2"}, "entity": {"name": "large", "memory_limit": 10240,
                     "organization_guid": "org-guid", "total_reserved_route_ports": 4}}
                ]
            }));
        });
    }

    #[test]
    fn find_by_org_lists_quotas_in_order() {
        let server = MockServer::start();
        mock_org_quotas(&server);

        let repo = CloudControllerSpaceQuotaRepository::new(gateway_for(&server));
        let quotas = repo.find_by_org("org-guid").unwrap();

        assert_eq!(quotas.len(), 2);
        assert_eq!(quotas[0].name, "small");
        assert_eq!(quotas[1].reserved_route_ports, Some(4));
    }

    #[test]
    fn find_by_name_matches_case_insensitively() {
        let server = MockServer::start();
        mock_org_quotas(&server);

        let repo = CloudControllerSpaceQuotaRepository::new(gateway_for(&server));
        let quota = repo.find_by_name_and_org_guid("LARGE", "org-guid").unwrap();
        assert_eq!(quota.guid, "q2");

        let err = repo
            .find_by_name_and_org_guid("medium", "org-guid")
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn associate_puts_the_space_under_the_quota() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PUT)
                .path("/v2/space_quota_definitions/q1/spaces/space-guid");
            then.status(201).json_body(json!({}));
        });

        let repo = CloudControllerSpaceQuotaRepository::new(gateway_for(&server));
        repo.associate_space_with_quota("space-guid", "q1").unwrap();

        mock.assert_calls(1);
    }

    #[test]
    fn create_posts_with_org_guid() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v2/space_quota_definitions")
                .json_body(json!({
                    "name": "small",
                    "memory_limit": 512,
                    "instance_memory_limit": -1,
                    "total_routes": 0,
                    "total_services": 0,
                    "non_basic_services_allowed": false,
                    "organization_guid": "org-guid",
                    "app_instance_limit": -1
                }));
            then.status(201).json_body(json!({}));
        });

        let repo = CloudControllerSpaceQuotaRepository::new(gateway_for(&server));
        let quota = SpaceQuota {
            name: "small".into(),
            memory_limit: 512,
            organization_guid: "org-guid".into(),
            ..SpaceQuota::default()
        };
        repo.create(&quota).unwrap();

        mock.assert_calls(1);
    }
}
