//! Security group commands.
//!
//! - `security-groups`, `security-group` - Read
//! - `create-security-group`, `delete-security-group` - Manage groups
//! - `running-security-groups`, `staging-security-groups` and the
//!   `bind-*`/`unbind-*` pairs - Platform-wide default sets

mod create;
mod defaults;
mod delete;
mod list;
mod show;

pub use create::CreateSecurityGroup;
pub use defaults::{BindDefaultSecurityGroup, DefaultSecurityGroups, UnbindDefaultSecurityGroup};
pub use delete::DeleteSecurityGroup;
pub use list::ListSecurityGroups;
pub use show::ShowSecurityGroup;

use super::phase::{Running, Staging};

pub type RunningSecurityGroups = DefaultSecurityGroups<Running>;
pub type StagingSecurityGroups = DefaultSecurityGroups<Staging>;
pub type BindRunningSecurityGroup = BindDefaultSecurityGroup<Running>;
pub type BindStagingSecurityGroup = BindDefaultSecurityGroup<Staging>;
pub type UnbindRunningSecurityGroup = UnbindDefaultSecurityGroup<Running>;
pub type UnbindStagingSecurityGroup = UnbindDefaultSecurityGroup<Staging>;
