//! Error types for cf operations.
//!
//! This module defines [`CfError`], the primary error type used throughout
//! the client, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Usage errors are raised before any requirement runs
//! - Precondition failures arrive as [`RequirementError`]
//! - Cloud Controller failures carry the HTTP status and CC error code so
//!   commands can downgrade "already exists" and "not found" to warnings
//! - `anyhow::Error` (via `CfError::Other`) covers everything unexpected

use std::path::PathBuf;
use thiserror::Error;

use crate::requirements::RequirementError;

/// Cloud Controller error code for a duplicate org quota name.
pub const QUOTA_DEFINITION_NAME_TAKEN: &str = "240002";

/// Cloud Controller error code for a duplicate security group name.
pub const SECURITY_GROUP_NAME_TAKEN: &str = "300005";

/// Cloud Controller error code for a duplicate space quota name.
pub const SPACE_QUOTA_DEFINITION_NAME_TAKEN: &str = "310001";

/// Core error type for cf operations.
#[derive(Debug, Error)]
pub enum CfError {
    /// No command is registered under this name or alias.
    #[error("'{name}' is not a registered command. See 'cf help'")]
    CommandNotFound { name: String },

    /// Arguments or flags do not match what the command accepts.
    #[error("Incorrect Usage. {message}\n\n{usage}")]
    IncorrectUsage { message: String, usage: String },

    /// A flag or argument value could not be interpreted.
    #[error("{message}")]
    InvalidArgument { message: String },

    /// A precondition of the command was not met.
    #[error(transparent)]
    Requirement(#[from] RequirementError),

    /// The named resource does not exist on the Cloud Controller.
    #[error("{model} {name} not found")]
    ModelNotFound { model: String, name: String },

    /// The Cloud Controller or UAA answered with an error status.
    #[error("Server error, status code: {status}, error code: {code}, message: {description}")]
    Http {
        status: u16,
        code: String,
        description: String,
    },

    /// The request never produced a response.
    #[error("Request error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The session file exists but cannot be read as JSON.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error wrapper.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CfError {
    /// Build an [`CfError::IncorrectUsage`] error.
    pub fn usage(message: impl Into<String>, usage: impl Into<String>) -> Self {
        Self::IncorrectUsage {
            message: message.into(),
            usage: usage.into(),
        }
    }

    /// Build a [`CfError::ModelNotFound`] error.
    pub fn not_found(model: impl Into<String>, name: impl Into<String>) -> Self {
        Self::ModelNotFound {
            model: model.into(),
            name: name.into(),
        }
    }

    /// The Cloud Controller error code, if this is an HTTP error.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Http { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Check whether this is a [`CfError::ModelNotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ModelNotFound { .. })
    }
}

/// Result type alias for cf operations.
pub type Result<T> = std::result::Result<T, CfError>;
