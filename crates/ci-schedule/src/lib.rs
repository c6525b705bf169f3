//! Periodic expiry of recent contacts
//!
//! Runs the cleanup job on a cron schedule so address books only show
//! people contacted within the retention window.

mod cleanup;
mod error;
mod scheduler;

pub use cleanup::CleanupJob;
pub use error::{Result, ScheduleError};
pub use scheduler::{Scheduler, SchedulerHandle};
