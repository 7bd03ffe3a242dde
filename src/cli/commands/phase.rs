//! Type-level choice between the running and staging defaults.
//!
//! Commands that exist once per lifecycle are generic over [`Phase`] and
//! registered as `Command<Running>` and `Command<Staging>`.

use crate::api::Lifecycle;

pub trait Phase: 'static {
    const LIFECYCLE: Lifecycle;
}

pub struct Running;

pub struct Staging;

impl Phase for Running {
    const LIFECYCLE: Lifecycle = Lifecycle::Running;
}

impl Phase for Staging {
    const LIFECYCLE: Lifecycle = Lifecycle::Staging;
}
