//! Periodic corpus refresh.

use crate::sync::SyncManager;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Handle to a running refresh task.
#[derive(Debug)]
pub struct SyncScheduler {
    handle: JoinHandle<()>,
    period: Duration,
}

impl SyncScheduler {
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Stop the task. A sync already in progress is cancelled with it.
    pub fn shutdown(self) {
        self.handle.abort();
        tracing::debug!("Sync scheduler stopped");
    }
}

/// Run `manager.sync()` every `period`, starting one period from now.
///
/// Must be called from within a Tokio runtime.
pub fn spawn_sync_scheduler(manager: Arc<SyncManager>, period: Duration) -> SyncScheduler {
    let period = period.max(Duration::from_secs(1));

    tracing::info!(
        "Starting sync scheduler (every {:.1} hours)",
        period.as_secs_f64() / 3600.0
    );

    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        interval.tick().await;

        loop {
            interval.tick().await;
            tracing::info!("Scheduled sync started");
            let report = manager.sync().await;
            tracing::info!(
                origin = report.origin.as_str(),
                documents = report.documents,
                "Scheduled sync finished"
            );
        }
    });

    SyncScheduler { handle, period }
}
