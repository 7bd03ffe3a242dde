//! Session configuration for cf.
//!
//! This module handles the persisted CLI session:
//! - The JSON session file and its accessors in [`repository`]
//! - Process environment settings (`CF_HOME`, `CF_TRACE`, ...) in [`env`]
//!
//! # Example
//!
//! ```
//! use cf::config::{ConfigRepository, OrganizationFields};
//!
//! let mut config = ConfigRepository::in_memory();
//! config.set_api_endpoint("https://api.example.com");
//! config.set_access_token("bearer abc");
//! config.set_organization_fields(OrganizationFields::new("org-guid", "my-org"));
//!
//! assert!(config.is_logged_in());
//! assert!(config.has_organization());
//! assert!(!config.has_space());
//! ```
//!
//! # Session File Location
//!
//! The session is stored at `$CF_HOME/.cf/config.json`, falling back to the
//! user's home directory when `CF_HOME` is not set.

pub mod env;
pub mod repository;

pub use env::EnvSettings;
pub use repository::{ConfigRepository, OrganizationFields, SessionData, SpaceFields};
