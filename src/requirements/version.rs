//! Cloud Controller API version bounds.

use regex::Regex;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::config::ConfigRepository;

use super::{Requirement, RequirementError};

/// A `major.minor.patch` API version as reported by `/v2/info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl ApiVersion {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*v?(\d+)\.(\d+)\.(\d+)(?:[-+].*)?\s*$").expect("valid version regex")
    })
}

impl FromStr for ApiVersion {
    type Err = RequirementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unparsable = || RequirementError::UnparsableVersion(s.to_string());
        let caps = version_pattern().captures(s).ok_or_else(unparsable)?;
        let part = |i: usize| caps[i].parse::<u64>().map_err(|_| unparsable());
        Ok(Self::new(part(1)?, part(2)?, part(3)?))
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Passes when the targeted API is at least `required`.
pub struct MinApiVersionRequirement {
    config: Rc<RefCell<ConfigRepository>>,
    feature: String,
    required: ApiVersion,
}

impl MinApiVersionRequirement {
    pub fn new(
        config: Rc<RefCell<ConfigRepository>>,
        feature: impl Into<String>,
        required: ApiVersion,
    ) -> Self {
        Self {
            config,
            feature: feature.into(),
            required,
        }
    }
}

impl Requirement for MinApiVersionRequirement {
    fn execute(&self) -> Result<(), RequirementError> {
        let current: ApiVersion = self.config.borrow().api_version().parse()?;
        if current < self.required {
            return Err(RequirementError::ApiVersionTooLow {
                feature: self.feature.clone(),
                required: self.required,
                current,
            });
        }
        Ok(())
    }
}

/// Passes when the targeted API is at most `maximum`.
pub struct MaxApiVersionRequirement {
    config: Rc<RefCell<ConfigRepository>>,
    feature: String,
    maximum: ApiVersion,
}

impl MaxApiVersionRequirement {
    pub fn new(
        config: Rc<RefCell<ConfigRepository>>,
        feature: impl Into<String>,
        maximum: ApiVersion,
    ) -> Self {
        Self {
            config,
            feature: feature.into(),
            maximum,
        }
    }
}

impl Requirement for MaxApiVersionRequirement {
    fn execute(&self) -> Result<(), RequirementError> {
        let current: ApiVersion = self.config.borrow().api_version().parse()?;
        if current > self.maximum {
            return Err(RequirementError::ApiVersionTooHigh {
                feature: self.feature.clone(),
                maximum: self.maximum,
                current,
            });
        }
        Ok(())
    }
}
