//! API endpoint discovery (`/v2/info`).

use std::rc::Rc;

use crate::error::Result;
use crate::models::ApiInfo;

use super::CloudControllerGateway;

pub trait EndpointRepository {
    /// Read version and UAA location from an endpoint that is not targeted yet.
    fn get_info(&self, endpoint: &str) -> Result<ApiInfo>;
}

pub struct CloudControllerEndpointRepository {
    gateway: Rc<CloudControllerGateway>,
}

impl CloudControllerEndpointRepository {
    pub fn new(gateway: Rc<CloudControllerGateway>) -> Self {
        Self { gateway }
    }
}

impl EndpointRepository for CloudControllerEndpointRepository {
    fn get_info(&self, endpoint: &str) -> Result<ApiInfo> {
        self.gateway.get_info(endpoint)
    }
}
