//! Spaces of an organization (`/v2/organizations/:guid/spaces`).

use std::rc::Rc;

use crate::error::{CfError, Result};
use crate::models::Space;

use super::{CloudControllerGateway};

pub trait SpaceRepository {
    /// Fails with [`CfError::ModelNotFound`] when the org has no space with this name.
    fn find_by_name_in_org(&self, name: &str, org_guid: &str) -> Result<Space>;
}

pub struct CloudControllerSpaceRepository {
    gateway: Rc<CloudControllerGateway>,
}

impl CloudControllerSpaceRepository {
    pub fn new(gateway: Rc<CloudControllerGateway>) -> Self {
        Self { gateway }
    }
}

impl SpaceRepository for CloudControllerSpaceRepository {
    fn find_by_name_in_org(&self, name: &str, org_guid: &str) -> Result<Space> {
        let path = format!("/v2/organizations/{}/spaces", org_guid);
        let filter = format!("name:{}", name.to_lowercase());
        self.gateway
            .list_resources_matching::<Space>(
                &path,
                &[("q", filter.as_str()), ("inline-relations-depth", "1")],
            )?
            .into_iter()
            .next()
            .ok_or_else(|| CfError::not_found("Space", name))
    }
}
