//! Password login against the UAA.

use std::rc::Rc;

use crate::error::Result;
use crate::models::TokenGrant;

use super::CloudControllerGateway;

pub trait AuthenticationRepository {
    fn authenticate(&self, username: &str, password: &str) -> Result<TokenGrant>;
}

pub struct UaaAuthenticationRepository {
    gateway: Rc<CloudControllerGateway>,
}

impl UaaAuthenticationRepository {
    pub fn new(gateway: Rc<CloudControllerGateway>) -> Self {
        Self { gateway }
    }
}

impl AuthenticationRepository for UaaAuthenticationRepository {
    fn authenticate(&self, username: &str, password: &str) -> Result<TokenGrant> {
        tracing::debug!("Requesting token for {}", username);
        self.gateway.request_token(username, password)
    }
}
