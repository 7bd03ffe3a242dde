//! Space quota commands. Space quotas belong to the targeted org.
//!
//! - `space-quotas`, `space-quota` - Read
//! - `create-space-quota`, `delete-space-quota` - Manage definitions
//! - `set-space-quota` - Assign a definition to a space

mod create;
mod delete;
mod list;
mod set;
mod show;

pub use create::CreateSpaceQuota;
pub use delete::DeleteSpaceQuota;
pub use list::ListSpaceQuotas;
pub use set::SetSpaceQuota;
pub use show::ShowSpaceQuota;

use crate::requirements::ApiVersion;

/// First API version accepting an app instance limit on space quotas.
pub(crate) const SPACE_APP_INSTANCE_LIMIT_VERSION: ApiVersion = ApiVersion::new(2, 40, 0);
