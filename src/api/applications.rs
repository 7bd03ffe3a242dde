//! Applications of a space (`/v2/spaces/:guid/apps`, `/v2/apps/:guid/env`).

use std::rc::Rc;

use crate::error::{CfError, Result};
use crate::models::{Application, ApplicationEnv};

use super::{CloudControllerGateway};

pub trait ApplicationRepository {
    /// Fails with [`CfError::ModelNotFound`] when the space has no app with this name.
    fn read(&self, name: &str, space_guid: &str) -> Result<Application>;

    fn read_env(&self, app_guid: &str) -> Result<ApplicationEnv>;
}

pub struct CloudControllerApplicationRepository {
    gateway: Rc<CloudControllerGateway>,
}

impl CloudControllerApplicationRepository {
    pub fn new(gateway: Rc<CloudControllerGateway>) -> Self {
        Self { gateway }
    }
}

impl ApplicationRepository for CloudControllerApplicationRepository {
    fn read(&self, name: &str, space_guid: &str) -> Result<Application> {
        let path = format!("/v2/spaces/{}/apps", space_guid);
        let filter = format!("name:{}", name);
        self.gateway
            .list_resources_matching::<Application>(
                &path,
                &[("q", filter.as_str()), ("inline-relations-depth", "1")],
            )?
            .into_iter()
            .next()
            .ok_or_else(|| CfError::not_found("App", name))
    }

    fn read_env(&self, app_guid: &str) -> Result<ApplicationEnv> {
        self.gateway
            .get_resource(&format!("/v2/apps/{}/env", app_guid))
    }
}
