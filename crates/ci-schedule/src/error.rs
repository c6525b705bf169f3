//! Error types for ci-schedule

use thiserror::Error;

/// ci-schedule error type
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Invalid retention: {0}")]
    InvalidRetention(String),

    #[error("Core error: {0}")]
    Core(#[from] ci_core::Error),

    #[error("Cron error: {0}")]
    CronError(#[from] cron::error::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ScheduleError>;
