//! Requirements that resolve a named resource and keep it for the command.

use std::cell::RefCell;
use std::rc::Rc;

use crate::api::{ApplicationRepository, OrganizationRepository};
use crate::config::ConfigRepository;
use crate::models::{Application, Organization};

use super::{Requirement, RequirementError};

/// Passes when the targeted space has an app with this name.
pub struct ApplicationRequirement {
    name: String,
    config: Rc<RefCell<ConfigRepository>>,
    repo: Rc<dyn ApplicationRepository>,
    application: RefCell<Option<Application>>,
}

impl ApplicationRequirement {
    pub fn new(
        name: impl Into<String>,
        config: Rc<RefCell<ConfigRepository>>,
        repo: Rc<dyn ApplicationRepository>,
    ) -> Self {
        Self {
            name: name.into(),
            config,
            repo,
            application: RefCell::new(None),
        }
    }

    /// The resolved app, available once [`Requirement::execute`] passed.
    pub fn application(&self) -> Result<Application, RequirementError> {
        self.application
            .borrow()
            .clone()
            .ok_or(RequirementError::NotResolved("Application"))
    }
}

impl Requirement for ApplicationRequirement {
    fn execute(&self) -> Result<(), RequirementError> {
        let space_guid = self.config.borrow().space_fields().guid;
        let app = self.repo.read(&self.name, &space_guid)?;
        *self.application.borrow_mut() = Some(app);
        Ok(())
    }
}

/// Passes when an org with this name exists.
pub struct OrganizationRequirement {
    name: String,
    repo: Rc<dyn OrganizationRepository>,
    organization: RefCell<Option<Organization>>,
}

impl OrganizationRequirement {
    pub fn new(name: impl Into<String>, repo: Rc<dyn OrganizationRepository>) -> Self {
        Self {
            name: name.into(),
            repo,
            organization: RefCell::new(None),
        }
    }

    /// The resolved org, available once [`Requirement::execute`] passed.
    pub fn organization(&self) -> Result<Organization, RequirementError> {
        self.organization
            .borrow()
            .clone()
            .ok_or(RequirementError::NotResolved("Organization"))
    }
}

impl Requirement for OrganizationRequirement {
    fn execute(&self) -> Result<(), RequirementError> {
        let org = self.repo.find_by_name(&self.name)?;
        *self.organization.borrow_mut() = Some(org);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fakes::{FakeApplicationRepository, FakeOrganizationRepository};
    use crate::config::SpaceFields;

    #[test]
    fn application_is_looked_up_in_the_targeted_space() {
        let repo = Rc::new(FakeApplicationRepository::default());
        repo.applications.borrow_mut().push(Application {
            guid: "app-guid".into(),
            name: "web".into(),
            ..Application::default()
        });
        let mut config = ConfigRepository::in_memory();
        config.set_space_fields(SpaceFields::new("space-guid", "dev"));

        let req = ApplicationRequirement::new("web", Rc::new(RefCell::new(config)), repo.clone());
        assert!(req.application().is_err());
        req.execute().unwrap();

        assert_eq!(req.application().unwrap().guid, "app-guid");
        assert_eq!(
            *repo.lookups.borrow(),
            vec![("web".to_string(), "space-guid".to_string())]
        );
    }

    #[test]
    fn missing_application_fails_with_not_found() {
        let req = ApplicationRequirement::new(
            "ghost",
            Rc::new(RefCell::new(ConfigRepository::in_memory())),
            Rc::new(FakeApplicationRepository::default()),
        );
        let err = req.execute().unwrap_err();
        assert_eq!(err.to_string(), "App ghost not found");
        assert!(req.application().is_err());
    }

    #[test]
    fn organization_is_cached_after_execute() {
        let repo = Rc::new(FakeOrganizationRepository::default());
        repo.organizations.borrow_mut().push(Organization {
            guid: "org-guid".into(),
            name: "my-org".into(),
            quota_definition_guid: None,
        });

        let req = OrganizationRequirement::new("my-org", repo);
        req.execute().unwrap();
        assert_eq!(req.organization().unwrap().guid, "org-guid");
    }
}
