pub mod clock;
pub mod error;
pub mod money;
pub mod permissions;
pub mod timezone;
pub mod write_policy;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{AppError, Result};
pub use permissions::{Action, Module, PermissionMatrix, RoleRegistry};
pub use timezone::ReportingOffset;
pub use write_policy::WritePolicy;
