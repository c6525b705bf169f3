//! Scheduler
//!
//! Runs the cleanup job on every tick of a cron schedule.

use std::str::FromStr;
use std::time::Duration;

use chrono::Utc;
use cron::Schedule as CronSchedule;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::cleanup::CleanupJob;
use crate::Result;

/// Handle of a running scheduler
pub struct SchedulerHandle {
    shutdown_tx: broadcast::Sender<()>,
    handle: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Stop the scheduler and wait for it to finish
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(());
        let _ = self.handle.await;
    }
}

/// Cron-driven runner for the cleanup job
pub struct Scheduler {
    job: CleanupJob,
    schedule: CronSchedule,
}

impl Scheduler {
    /// Create a scheduler; fails on an invalid cron expression
    pub fn new(job: CleanupJob, cron_expr: &str) -> Result<Self> {
        let schedule = parse_cron(cron_expr)?;
        Ok(Self { job, schedule })
    }

    /// Start running in the background
    pub fn start(self) -> SchedulerHandle {
        let (shutdown_tx, mut shutdown_rx) = broadcast::channel::<()>(1);

        let handle = tokio::spawn(async move {
            info!("Cleanup scheduler started");
            self.run(&mut shutdown_rx).await;
            info!("Cleanup scheduler stopped");
        });

        SchedulerHandle {
            shutdown_tx,
            handle,
        }
    }

    async fn run(&self, shutdown_rx: &mut broadcast::Receiver<()>) {
        loop {
            let now = Utc::now();
            let next = match self.schedule.upcoming(Utc).next() {
                Some(t) => t,
                None => {
                    warn!("Cron schedule has no upcoming run");
                    break;
                }
            };

            let delay = (next - now).to_std().unwrap_or(Duration::ZERO);
            info!(next = %next.format("%Y-%m-%d %H:%M:%S"), "Waiting for next cleanup");

            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    let job = self.job.clone();
                    match tokio::task::spawn_blocking(move || job.run(Utc::now())).await {
                        Ok(Ok(deleted)) => info!(deleted, "Scheduled cleanup completed"),
                        Ok(Err(e)) => error!("Scheduled cleanup failed: {}", e),
                        Err(e) => error!("Scheduled cleanup panicked: {}", e),
                    }
                }
                _ = shutdown_rx.recv() => {
                    info!("Shutdown requested");
                    break;
                }
            }
        }
    }
}

/// Parse a cron expression: "sec min hour day month weekday [year]"
fn parse_cron(cron_expr: &str) -> Result<CronSchedule> {
    let schedule = CronSchedule::from_str(cron_expr)?;
    Ok(schedule)
}
