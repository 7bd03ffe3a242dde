//! Argument arity and usage checks.

use super::{Requirement, RequirementError};

/// The message shown when a command got the wrong number of arguments.
pub fn arity_message(expected: usize) -> String {
    match expected {
        0 => "No argument required".to_string(),
        1 => "Requires an argument".to_string(),
        n => format!("Requires {} arguments", n),
    }
}

/// Passes when exactly `expected` positional arguments were given.
pub struct NumberOfArgumentsRequirement {
    given: usize,
    expected: usize,
    usage: String,
}

impl NumberOfArgumentsRequirement {
    pub fn new(args: &[String], expected: usize, usage: impl Into<String>) -> Self {
        Self {
            given: args.len(),
            expected,
            usage: usage.into(),
        }
    }
}

impl Requirement for NumberOfArgumentsRequirement {
    fn execute(&self) -> Result<(), RequirementError> {
        if self.given == self.expected {
            return Ok(());
        }
        Err(RequirementError::IncorrectUsage {
            message: arity_message(self.expected),
            usage: self.usage.clone(),
        })
    }
}

/// Fails with `message` when `predicate` holds.
pub struct UsageRequirement {
    usage: String,
    message: String,
    predicate: Box<dyn Fn() -> bool>,
}

impl UsageRequirement {
    pub fn new(
        usage: impl Into<String>,
        message: impl Into<String>,
        predicate: impl Fn() -> bool + 'static,
    ) -> Self {
        Self {
            usage: usage.into(),
            message: message.into(),
            predicate: Box::new(predicate),
        }
    }
}

impl Requirement for UsageRequirement {
    fn execute(&self) -> Result<(), RequirementError> {
        if (self.predicate)() {
            return Err(RequirementError::IncorrectUsage {
                message: self.message.clone(),
                usage: self.usage.clone(),
            });
        }
        Ok(())
    }
}
