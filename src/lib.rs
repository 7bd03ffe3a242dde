//! cf - A command line client for Cloud Foundry.
//!
//! Every command runs through the same pipeline: the registry instantiates
//! it, its flags are parsed, its requirements are checked in order, and
//! only then does its body execute against the Cloud Controller.
//!
//! # Modules
//!
//! - [`api`] - Cloud Controller and UAA repositories
//! - [`cli`] - Commands, the registry and the runner
//! - [`config`] - The session file and `CF_*` environment settings
//! - [`error`] - Error types and result aliases
//! - [`formatters`] - Byte quantities and limits
//! - [`models`] - Cloud Controller resources
//! - [`requirements`] - Preconditions checked before a command runs
//! - [`ui`] - Terminal output, tables and confirmations
//!
//! # Example
//!
//! ```
//! use cf::cli::CommandRegistry;
//!
//! let registry = CommandRegistry::with_builtins();
//! let meta = registry.find("delete-quota").unwrap();
//! assert_eq!(meta.usage, "cf delete-quota QUOTA [-f]");
//! assert!(registry.find("no-such-command").is_err());
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod formatters;
pub mod models;
pub mod requirements;
pub mod ui;

pub use error::{CfError, Result};
