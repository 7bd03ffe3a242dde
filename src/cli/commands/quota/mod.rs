//! Organization quota commands.
//!
//! - `quotas`, `quota` - Read
//! - `create-quota`, `update-quota`, `delete-quota` - Manage definitions
//! - `set-quota` - Assign a definition to an org

mod create;
mod delete;
mod list;
mod set;
mod show;
mod update;

pub use create::CreateQuota;
pub use delete::DeleteQuota;
pub use list::ListQuotas;
pub use set::SetQuota;
pub use show::ShowQuota;
pub use update::UpdateQuota;

use clap::Arg;

use crate::cli::flags::{bool_flag, int_flag, string_flag};
use crate::formatters::{limit_or_unlimited, memory_or_unlimited};
use crate::requirements::ApiVersion;

/// First API version accepting an app instance limit on org quotas.
pub(crate) const APP_INSTANCE_LIMIT_VERSION: ApiVersion = ApiVersion::new(2, 33, 0);

/// First API version accepting reserved route ports on any quota.
pub(crate) const RESERVED_ROUTE_PORTS_VERSION: ApiVersion = ApiVersion::new(2, 55, 0);

/// Flags shared by org and space quota creation and update.
pub(crate) fn limit_flags() -> Vec<Arg> {
    vec![
        string_flag(
            "m",
            "TOTAL_MEMORY",
            "Total amount of memory (e.g. 1024M, 1G, 10G)",
        ),
        string_flag(
            "i",
            "INSTANCE_MEMORY",
            "Maximum amount of memory an application instance can have (e.g. 1024M, 1G, 10G). -1 represents an unlimited amount.",
        ),
        int_flag("r", "ROUTES", "Total number of routes"),
        int_flag("s", "SERVICE_INSTANCES", "Total number of service instances"),
        int_flag(
            "a",
            "APP_INSTANCES",
            "Total number of application instances. -1 represents an unlimited amount. (Default: unlimited)",
        ),
        bool_flag(
            "allow-paid-service-plans",
            "Can provision instances of paid service plans",
        ),
        int_flag(
            "reserved-route-ports",
            "RESERVED_ROUTE_PORTS",
            "Maximum number of routes that may be created with reserved ports (Default: 0)",
        ),
    ]
}

pub(crate) fn paid_plans(allowed: bool) -> &'static str {
    if allowed {
        "allowed"
    } else {
        "disallowed"
    }
}

pub(crate) fn route_ports(reserved: Option<i64>) -> String {
    limit_or_unlimited(reserved.unwrap_or(0))
}

/// Limits as displayed in tables: memory, instance memory, routes, services,
/// paid plans, app instances, route ports.
pub(crate) fn limit_columns(
    memory: i64,
    instance_memory: i64,
    routes: i64,
    services: i64,
    paid_allowed: bool,
    app_instances: i64,
    reserved: Option<i64>,
) -> Vec<String> {
    vec![
        memory_or_unlimited(memory),
        memory_or_unlimited(instance_memory),
        limit_or_unlimited(routes),
        limit_or_unlimited(services),
        paid_plans(paid_allowed).to_string(),
        limit_or_unlimited(app_instances),
        route_ports(reserved),
    ]
}
