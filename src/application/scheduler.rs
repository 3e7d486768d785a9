// Refresh scheduler - periodic fetch cycles with stale-result suppression
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, info};

use crate::application::monitor_service::MonitorService;
use crate::application::state::StateController;

/// Fixed refresh cadence; deliberately not user-tunable.
pub const REFRESH_PERIOD: Duration = Duration::from_secs(60);

/// Scoped handle for one dashboard's refresh loop. Deactivating (or just
/// dropping) the handle stops the timer and causes any still-pending
/// cycle's result to be discarded instead of applied.
pub struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl SchedulerHandle {
    /// Stops the loop and waits until it has closed the state controller,
    /// so no cycle result can land after this returns.
    pub async fn deactivate(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

/// Starts the refresh loop. The first cycle runs immediately; later ones
/// fire every `REFRESH_PERIOD`. Cycles may overlap when one outlives the
/// period; each carries a generation number so only a result newer than
/// the last applied one lands in state.
pub fn activate(service: MonitorService, controller: StateController) -> SchedulerHandle {
    activate_every(service, controller, REFRESH_PERIOD)
}

fn activate_every(
    service: MonitorService,
    controller: StateController,
    period: Duration,
) -> SchedulerHandle {
    let (shutdown, mut shutdown_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut ticker = time::interval(period);
        let mut generation: u64 = 0;

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => break,
                _ = ticker.tick() => {
                    generation += 1;
                    let cycle = generation;
                    controller.begin_cycle().await;

                    let service = service.clone();
                    let controller = controller.clone();
                    tokio::spawn(async move {
                        let outcome = service.run_cycle().await;
                        if !controller.apply(cycle, outcome).await {
                            debug!("discarding stale result of cycle {}", cycle);
                        }
                    });
                }
            }
        }

        controller.close().await;
        info!("refresh loop stopped");
    });

    SchedulerHandle {
        shutdown,
        task: Some(task),
    }
}
