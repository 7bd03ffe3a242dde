//! Preconditions checked before a command body runs.
//!
//! A command declares an ordered list of [`Requirement`]s; the runner
//! executes them in that order and stops at the first failure. Requirements
//! are built by a [`RequirementFactory`] and do no I/O until executed.
//!
//! # Modules
//!
//! - [`session`] - API endpoint, login and targeted org/space checks
//! - [`version`] - Cloud Controller API version bounds
//! - [`lookup`] - Named application and organization lookups
//! - [`usage`] - Argument arity and usage predicates
//! - [`factory`] - The factory commands build requirements from

pub mod factory;
pub mod lookup;
pub mod session;
pub mod usage;
pub mod version;

pub use factory::{Factory, RequirementFactory};
pub use lookup::{ApplicationRequirement, OrganizationRequirement};
pub use session::{
    ApiEndpointRequirement, LoginRequirement, TargetedOrgRequirement, TargetedSpaceRequirement,
};
pub use usage::{arity_message, NumberOfArgumentsRequirement, UsageRequirement};
pub use version::{ApiVersion, MaxApiVersionRequirement, MinApiVersionRequirement};

use thiserror::Error;

use crate::error::CfError;

/// Why a requirement did not pass.
#[derive(Debug, Error)]
pub enum RequirementError {
    #[error("No API endpoint set. Use 'cf login' or 'cf api' to target an endpoint.")]
    NoApiEndpoint,

    #[error("Not logged in. Use 'cf login' or 'cf auth' to log in.")]
    NotLoggedIn,

    #[error("No org targeted, use 'cf target -o ORG' to target an org.")]
    NoOrgTargeted,

    #[error("No org and space targeted, use 'cf target -o ORG -s SPACE' to target an org and space")]
    NoOrgAndSpaceTargeted,

    #[error("No space targeted, use 'cf target -s SPACE' to target a space.")]
    NoSpaceTargeted,

    #[error("{feature} requires CF API version {required}+. Your target is {current}.")]
    ApiVersionTooLow {
        feature: String,
        required: ApiVersion,
        current: ApiVersion,
    },

    #[error("{feature} only works up to CF API version {maximum}. Your target is {current}.")]
    ApiVersionTooHigh {
        feature: String,
        maximum: ApiVersion,
        current: ApiVersion,
    },

    #[error("Unable to parse CC API Version '{0}'")]
    UnparsableVersion(String),

    #[error("Incorrect Usage. {message}\n\n{usage}")]
    IncorrectUsage { message: String, usage: String },

    /// A named resource could not be resolved.
    #[error(transparent)]
    Lookup(Box<CfError>),

    #[error("{0}")]
    Failed(String),

    /// Resolved data was read before the requirement executed successfully.
    #[error("{0} was read before the requirement passed")]
    NotResolved(&'static str),
}

impl From<CfError> for RequirementError {
    fn from(err: CfError) -> Self {
        match err {
            CfError::Requirement(inner) => inner,
            other => Self::Lookup(Box::new(other)),
        }
    }
}

/// A single precondition of a command.
pub trait Requirement {
    /// Check the precondition. `Ok` means the command may proceed.
    fn execute(&self) -> Result<(), RequirementError>;

    /// Short name used in debug logs.
    fn name(&self) -> &'static str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }
}

/// Always passes.
#[derive(Debug, Default, Clone, Copy)]
pub struct Passing;

impl Requirement for Passing {
    fn execute(&self) -> Result<(), RequirementError> {
        Ok(())
    }
}

/// Always fails with its message.
#[derive(Debug, Clone)]
pub struct Failing {
    pub message: String,
}

impl Failing {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Requirement for Failing {
    fn execute(&self) -> Result<(), RequirementError> {
        Err(RequirementError::Failed(self.message.clone()))
    }
}
