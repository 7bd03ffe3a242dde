//! Organizations (`/v2/organizations`).

use std::rc::Rc;

use crate::error::{CfError, Result};
use crate::models::Organization;

use super::{CloudControllerGateway};

pub trait OrganizationRepository {
    /// Fails with [`CfError::ModelNotFound`] when no org has this name.
    fn find_by_name(&self, name: &str) -> Result<Organization>;
}

pub struct CloudControllerOrganizationRepository {
    gateway: Rc<CloudControllerGateway>,
}

impl CloudControllerOrganizationRepository {
    pub fn new(gateway: Rc<CloudControllerGateway>) -> Self {
        Self { gateway }
    }
}

impl OrganizationRepository for CloudControllerOrganizationRepository {
    fn find_by_name(&self, name: &str) -> Result<Organization> {
        let filter = format!("name:{}", name.to_lowercase());
        self.gateway
            .list_resources_matching::<Organization>(
                "/v2/organizations",
                &[("q", filter.as_str()), ("inline-relations-depth", "1")],
            )?
            .into_iter()
            .next()
            .ok_or_else(|| CfError::not_found("Org", name))
    }
}
