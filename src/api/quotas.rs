//! Organization quota definitions (`/v2/quota_definitions`).

use serde_json::json;
use std::rc::Rc;

use crate::error::{CfError, Result};
use crate::models::QuotaFields;

use super::{CloudControllerGateway};

/// Access to organization quotas.
pub trait QuotaRepository {
    fn find_all(&self) -> Result<Vec<QuotaFields>>;

    /// Fails with [`CfError::ModelNotFound`] when no quota has this name.
    fn find_by_name(&self, name: &str) -> Result<QuotaFields>;

    fn create(&self, quota: &QuotaFields) -> Result<()>;

    fn update(&self, quota: &QuotaFields) -> Result<()>;

    fn assign_quota_to_org(&self, org_guid: &str, quota_guid: &str) -> Result<()>;

    fn delete(&self, quota_guid: &str) -> Result<()>;
}

pub struct CloudControllerQuotaRepository {
    gateway: Rc<CloudControllerGateway>,
}

impl CloudControllerQuotaRepository {
    pub fn new(gateway: Rc<CloudControllerGateway>) -> Self {
        Self { gateway }
    }
}

impl QuotaRepository for CloudControllerQuotaRepository {
    fn find_all(&self) -> Result<Vec<QuotaFields>> {
        self.gateway.list_all_resources("/v2/quota_definitions")
    }

    fn find_by_name(&self, name: &str) -> Result<QuotaFields> {
        let filter = format!("name:{}", name);
        self.gateway
            .list_resources_matching::<QuotaFields>(
                "/v2/quota_definitions",
                &[("q", filter.as_str())],
            )?
            .into_iter()
            .next()
            .ok_or_else(|| CfError::not_found("Quota", name))
    }

    fn create(&self, quota: &QuotaFields) -> Result<()> {
        self.gateway.create_resource("/v2/quota_definitions", quota)
    }

    fn update(&self, quota: &QuotaFields) -> Result<()> {
        let path = format!("/v2/quota_definitions/{}", quota.guid);
        self.gateway.update_resource(&path, quota)
    }

    fn assign_quota_to_org(&self, org_guid: &str, quota_guid: &str) -> Result<()> {
        let path = format!("/v2/organizations/{}", org_guid);
        self.gateway
            .update_resource(&path, &json!({ "quota_definition_guid": quota_guid }))
    }

    fn delete(&self, quota_guid: &str) -> Result<()> {
        let path = format!("/v2/quota_definitions/{}", quota_guid);
        self.gateway.delete_resource(&path)
    }
}
