//! The persisted CLI session.
//!
//! [`ConfigRepository`] owns the session data (API target, tokens, targeted
//! org and space) and writes it back to `config.json` when asked. Requirements
//! and commands read it; only the session commands write it.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CfError, Result};

const CONFIG_VERSION: u32 = 3;

/// Name and GUID of the targeted organization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OrganizationFields {
    #[serde(rename = "GUID")]
    pub guid: String,
    pub name: String,
}

impl OrganizationFields {
    pub fn new(guid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            name: name.into(),
        }
    }
}

/// Name and GUID of the targeted space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SpaceFields {
    #[serde(rename = "GUID")]
    pub guid: String,
    pub name: String,
}

impl SpaceFields {
    pub fn new(guid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            name: name.into(),
        }
    }
}

/// On-disk shape of `config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SessionData {
    pub config_version: u32,
    pub target: String,
    #[serde(rename = "APIVersion")]
    pub api_version: String,
    pub authorization_endpoint: String,
    pub access_token: String,
    pub refresh_token: String,
    pub username: String,
    pub organization_fields: OrganizationFields,
    pub space_fields: SpaceFields,
    #[serde(rename = "SSLDisabled")]
    pub ssl_disabled: bool,
}

impl Default for SessionData {
    fn default() -> Self {
        Self {
            config_version: CONFIG_VERSION,
            target: String::new(),
            api_version: String::new(),
            authorization_endpoint: String::new(),
            access_token: String::new(),
            refresh_token: String::new(),
            username: String::new(),
            organization_fields: OrganizationFields::default(),
            space_fields: SpaceFields::default(),
            ssl_disabled: false,
        }
    }
}

/// Reader and writer for the session.
#[derive(Debug, Clone, Default)]
pub struct ConfigRepository {
    data: SessionData,
    path: Option<PathBuf>,
}

impl ConfigRepository {
    /// Load the session from `path`.
    ///
    /// A missing file yields an empty session bound to that path.
    pub fn load(path: &Path) -> Result<Self> {
        let data = if path.exists() {
            let content = fs::read_to_string(path)?;
            if content.trim().is_empty() {
                SessionData::default()
            } else {
                serde_json::from_str(&content).map_err(|e| CfError::ConfigParse {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?
            }
        } else {
            tracing::debug!("No session file at {}, starting fresh", path.display());
            SessionData::default()
        };

        Ok(Self {
            data,
            path: Some(path.to_path_buf()),
        })
    }

    /// A session that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// A session seeded with `data` that is never written to disk.
    pub fn from_data(data: SessionData) -> Self {
        Self { data, path: None }
    }

    /// Write the session back to its file, if it has one.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.data)?;
        fs::write(path, json)?;
        tracing::debug!("Saved session to {}", path.display());
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn data(&self) -> &SessionData {
        &self.data
    }

    pub fn api_endpoint(&self) -> &str {
        &self.data.target
    }

    pub fn has_api_endpoint(&self) -> bool {
        !self.data.target.is_empty()
    }

    pub fn api_version(&self) -> &str {
        &self.data.api_version
    }

    pub fn authorization_endpoint(&self) -> &str {
        &self.data.authorization_endpoint
    }

    pub fn access_token(&self) -> &str {
        &self.data.access_token
    }

    pub fn refresh_token(&self) -> &str {
        &self.data.refresh_token
    }

    pub fn username(&self) -> &str {
        &self.data.username
    }

    pub fn is_ssl_disabled(&self) -> bool {
        self.data.ssl_disabled
    }

    /// Logged in means holding an access token.
    pub fn is_logged_in(&self) -> bool {
        !self.data.access_token.is_empty()
    }

    pub fn has_organization(&self) -> bool {
        !self.data.organization_fields.guid.is_empty()
            && !self.data.organization_fields.name.is_empty()
    }

    pub fn has_space(&self) -> bool {
        !self.data.space_fields.guid.is_empty() && !self.data.space_fields.name.is_empty()
    }

    pub fn organization_fields(&self) -> OrganizationFields {
        self.data.organization_fields.clone()
    }

    pub fn space_fields(&self) -> SpaceFields {
        self.data.space_fields.clone()
    }

    pub fn set_api_endpoint(&mut self, endpoint: &str) {
        self.data.target = endpoint.trim_end_matches('/').to_string();
    }

    pub fn set_api_version(&mut self, version: &str) {
        self.data.api_version = version.to_string();
    }

    pub fn set_authorization_endpoint(&mut self, endpoint: &str) {
        self.data.authorization_endpoint = endpoint.to_string();
    }

    pub fn set_access_token(&mut self, token: &str) {
        self.data.access_token = token.to_string();
    }

    pub fn set_refresh_token(&mut self, token: &str) {
        self.data.refresh_token = token.to_string();
    }

    pub fn set_username(&mut self, username: &str) {
        self.data.username = username.to_string();
    }

    pub fn set_ssl_disabled(&mut self, disabled: bool) {
        self.data.ssl_disabled = disabled;
    }

    /// Target an organization. Any targeted space belongs to the old org,
    /// so it is cleared.
    pub fn set_organization_fields(&mut self, org: OrganizationFields) {
        if org.guid != self.data.organization_fields.guid {
            self.data.space_fields = SpaceFields::default();
        }
        self.data.organization_fields = org;
    }

    pub fn set_space_fields(&mut self, space: SpaceFields) {
        self.data.space_fields = space;
    }

    /// Forget the logged-in user and the target, keeping the API endpoint.
    pub fn clear_session(&mut self) {
        self.data.access_token.clear();
        self.data.refresh_token.clear();
        self.data.username.clear();
        self.data.organization_fields = OrganizationFields::default();
        self.data.space_fields = SpaceFields::default();
    }

    /// Forget everything, including the API endpoint.
    pub fn unset_api(&mut self) {
        let path = self.path.take();
        *self = Self {
            data: SessionData::default(),
            path,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_empty_session() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".cf").join("config.json");

        let config = ConfigRepository::load(&path).unwrap();
        assert!(!config.has_api_endpoint());
        assert!(!config.is_logged_in());
        assert_eq!(config.path(), Some(path.as_path()));
    }

    #[test]
    fn save_then_load_keeps_session() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".cf").join("config.json");

        let mut config = ConfigRepository::load(&path).unwrap();
        config.set_api_endpoint("https://api.example.com/");
        config.set_api_version("2.54.0");
        config.set_access_token("bearer token");
        config.set_username("admin");
        config.set_organization_fields(OrganizationFields::new("org-guid", "my-org"));
        config.set_space_fields(SpaceFields::new("space-guid", "dev"));
        config.save().unwrap();

        let loaded = ConfigRepository::load(&path).unwrap();
        assert_eq!(loaded.api_endpoint(), "https://api.example.com");
        assert_eq!(loaded.api_version(), "2.54.0");
        assert_eq!(loaded.username(), "admin");
        assert!(loaded.is_logged_in());
        assert!(loaded.has_space());
        assert_eq!(loaded.organization_fields().name, "my-org");
    }

    #[test]
    fn file_uses_pascal_case_keys() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");

        let mut config = ConfigRepository::load(&path).unwrap();
        config.set_api_version("2.54.0");
        config.set_organization_fields(OrganizationFields::new("org-guid", "my-org"));
        config.save().unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"APIVersion\""));
        assert!(raw.contains("\"OrganizationFields\""));
        assert!(raw.contains("\"GUID\": \"org-guid\""));
    }

    #[test]
    fn corrupt_file_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = ConfigRepository::load(&path).unwrap_err();
        assert!(matches!(err, CfError::ConfigParse { .. }));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, r#"{"Target": "https://api.example.com"}"#).unwrap();

        let config = ConfigRepository::load(&path).unwrap();
        assert_eq!(config.api_endpoint(), "https://api.example.com");
        assert!(!config.has_organization());
    }

    #[test]
    fn changing_org_clears_space() {
        let mut config = ConfigRepository::in_memory();
        config.set_organization_fields(OrganizationFields::new("org-1", "one"));
        config.set_space_fields(SpaceFields::new("space-1", "dev"));

        config.set_organization_fields(OrganizationFields::new("org-1", "one"));
        assert!(config.has_space());

        config.set_organization_fields(OrganizationFields::new("org-2", "two"));
        assert!(!config.has_space());
    }

    #[test]
    fn clear_session_keeps_endpoint() {
        let mut config = ConfigRepository::in_memory();
        config.set_api_endpoint("https://api.example.com");
        config.set_access_token("bearer token");
        config.set_organization_fields(OrganizationFields::new("org-1", "one"));

        config.clear_session();
        assert!(config.has_api_endpoint());
        assert!(!config.is_logged_in());
        assert!(!config.has_organization());
    }

    #[test]
    fn unset_api_keeps_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        let mut config = ConfigRepository::load(&path).unwrap();
        config.set_api_endpoint("https://api.example.com");

        config.unset_api();
        assert!(!config.has_api_endpoint());
        assert_eq!(config.path(), Some(path.as_path()));
    }

    #[test]
    fn in_memory_save_is_noop() {
        let config = ConfigRepository::in_memory();
        assert!(config.save().is_ok());
        assert!(config.path().is_none());
    }
}
