//! Removal of recent contacts past the retention window

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use ci_core::{CleanupConfig, RecentContactStore};
use tracing::info;

use crate::{Result, ScheduleError};

/// Deletes recent contacts not contacted within the retention window
#[derive(Clone)]
pub struct CleanupJob {
    store: Arc<dyn RecentContactStore>,
    retention: Duration,
}

impl CleanupJob {
    pub fn new(store: Arc<dyn RecentContactStore>, retention: Duration) -> Result<Self> {
        if retention <= Duration::zero() {
            return Err(ScheduleError::InvalidRetention(format!(
                "retention must be positive, got {}",
                retention
            )));
        }
        Ok(Self { store, retention })
    }

    /// Build the job from the `[cleanup]` configuration section
    pub fn from_config(store: Arc<dyn RecentContactStore>, config: &CleanupConfig) -> Result<Self> {
        Self::new(store, Duration::days(i64::from(config.retention_days)))
    }

    pub fn retention(&self) -> Duration {
        self.retention
    }

    /// Delete everything last contacted before `now - retention`
    pub fn run(&self, now: DateTime<Utc>) -> Result<usize> {
        let cutoff = now - self.retention;
        let deleted = self.store.cleanup(cutoff)?;
        info!(cutoff = %cutoff, deleted, "Recent contacts cleanup finished");
        Ok(deleted)
    }
}
