//! Checks against the persisted session: endpoint, login and target.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::{ConfigRepository, OrganizationFields};

use super::{Requirement, RequirementError};

/// Passes when an API endpoint is set.
pub struct ApiEndpointRequirement {
    config: Rc<RefCell<ConfigRepository>>,
}

impl ApiEndpointRequirement {
    pub fn new(config: Rc<RefCell<ConfigRepository>>) -> Self {
        Self { config }
    }
}

impl Requirement for ApiEndpointRequirement {
    fn execute(&self) -> Result<(), RequirementError> {
        if self.config.borrow().has_api_endpoint() {
            Ok(())
        } else {
            Err(RequirementError::NoApiEndpoint)
        }
    }
}

/// Passes when an endpoint is set and the session holds an access token.
pub struct LoginRequirement {
    config: Rc<RefCell<ConfigRepository>>,
}

impl LoginRequirement {
    pub fn new(config: Rc<RefCell<ConfigRepository>>) -> Self {
        Self { config }
    }
}

impl Requirement for LoginRequirement {
    fn execute(&self) -> Result<(), RequirementError> {
        let config = self.config.borrow();
        if !config.has_api_endpoint() {
            return Err(RequirementError::NoApiEndpoint);
        }
        if !config.is_logged_in() {
            return Err(RequirementError::NotLoggedIn);
        }
        Ok(())
    }
}

/// Passes when an org is targeted and exposes its fields afterwards.
pub struct TargetedOrgRequirement {
    config: Rc<RefCell<ConfigRepository>>,
    organization: RefCell<Option<OrganizationFields>>,
}

impl TargetedOrgRequirement {
    pub fn new(config: Rc<RefCell<ConfigRepository>>) -> Self {
        Self {
            config,
            organization: RefCell::new(None),
        }
    }

    /// The targeted org, available once [`Requirement::execute`] passed.
    pub fn organization_fields(&self) -> Result<OrganizationFields, RequirementError> {
        self.organization
            .borrow()
            .clone()
            .ok_or(RequirementError::NotResolved("Targeted org"))
    }
}

impl Requirement for TargetedOrgRequirement {
    fn execute(&self) -> Result<(), RequirementError> {
        let config = self.config.borrow();
        if !config.has_organization() {
            return Err(RequirementError::NoOrgTargeted);
        }
        *self.organization.borrow_mut() = Some(config.organization_fields());
        Ok(())
    }
}

/// Passes when both an org and a space are targeted.
pub struct TargetedSpaceRequirement {
    config: Rc<RefCell<ConfigRepository>>,
}

impl TargetedSpaceRequirement {
    pub fn new(config: Rc<RefCell<ConfigRepository>>) -> Self {
        Self { config }
    }
}

impl Requirement for TargetedSpaceRequirement {
    fn execute(&self) -> Result<(), RequirementError> {
        let config = self.config.borrow();
        if !config.has_organization() {
            return Err(RequirementError::NoOrgAndSpaceTargeted);
        }
        if !config.has_space() {
            return Err(RequirementError::NoSpaceTargeted);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpaceFields;

    fn config() -> Rc<RefCell<ConfigRepository>> {
        Rc::new(RefCell::new(ConfigRepository::in_memory()))
    }

    #[test]
    fn login_needs_endpoint_before_token() {
        let config = config();
        let req = LoginRequirement::new(config.clone());
        assert!(matches!(req.execute(), Err(RequirementError::NoApiEndpoint)));

        config.borrow_mut().set_api_endpoint("https://api.example.com");
        assert!(matches!(req.execute(), Err(RequirementError::NotLoggedIn)));

        config.borrow_mut().set_access_token("bearer token");
        assert!(req.execute().is_ok());
    }

    #[test]
    fn api_endpoint_ignores_login_state() {
        let config = config();
        config.borrow_mut().set_api_endpoint("https://api.example.com");
        assert!(ApiEndpointRequirement::new(config).execute().is_ok());
    }

    #[test]
    fn targeted_org_exposes_fields_only_after_execute() {
        let config = config();
        config
            .borrow_mut()
            .set_organization_fields(OrganizationFields::new("org-guid", "my-org"));
        let req = TargetedOrgRequirement::new(config);

        assert!(matches!(
            req.organization_fields(),
            Err(RequirementError::NotResolved(_))
        ));
        req.execute().unwrap();
        assert_eq!(req.organization_fields().unwrap().name, "my-org");
    }

    #[test]
    fn targeted_org_fails_without_org() {
        let req = TargetedOrgRequirement::new(config());
        let err = req.execute().unwrap_err();
        assert_eq!(
            err.to_string(),
            "No org targeted, use 'cf target -o ORG' to target an org."
        );
        assert!(req.organization_fields().is_err());
    }

    #[test]
    fn targeted_space_distinguishes_missing_org_and_space() {
        let config = config();
        let req = TargetedSpaceRequirement::new(config.clone());
        assert!(matches!(
            req.execute(),
            Err(RequirementError::NoOrgAndSpaceTargeted)
        ));

        config
            .borrow_mut()
            .set_organization_fields(OrganizationFields::new("org-guid", "my-org"));
        assert!(matches!(req.execute(), Err(RequirementError::NoSpaceTargeted)));

        config
            .borrow_mut()
            .set_space_fields(SpaceFields::new("space-guid", "dev"));
        assert!(req.execute().is_ok());
    }
}
