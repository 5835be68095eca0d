use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use super::scheduler::{AutoResetScheduler, Clock};
use crate::services::persistence::HouseholdStore;

/// Handle to a running reset task. Dropping it aborts the task.
pub struct ResetTaskHandle {
    shutdown: Option<oneshot::Sender<()>>,
    join: Option<JoinHandle<()>>,
}

impl ResetTaskHandle {
    /// Stop the timer and wait for an in-flight tick to finish.
    pub async fn shutdown(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(join) = self.join.take() {
            if let Err(err) = join.await {
                log::warn!("Auto-reset task ended abnormally: {}", err);
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.join.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for ResetTaskHandle {
    fn drop(&mut self) {
        if let Some(join) = self.join.take() {
            join.abort();
        }
    }
}

/// Run a reset pass immediately and then every `period` until shut down.
pub fn spawn_reset_task<C, S>(
    scheduler: AutoResetScheduler<C>,
    store: Arc<Mutex<S>>,
    period: Duration,
) -> ResetTaskHandle
where
    C: Clock + 'static,
    S: HouseholdStore + Send + 'static,
{
    let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

    let join = tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        log::info!("Auto-reset task started, checking every {:?}", period);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    run_tick(&scheduler, &store);
                }
                _ = &mut shutdown_rx => {
                    break;
                }
            }
        }

        log::info!("Auto-reset task stopped");
    });

    ResetTaskHandle {
        shutdown: Some(shutdown_tx),
        join: Some(join),
    }
}

fn run_tick<C: Clock, S: HouseholdStore>(scheduler: &AutoResetScheduler<C>, store: &Mutex<S>) {
    let mut guard = match store.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            log::warn!("Household store lock was poisoned; continuing");
            poisoned.into_inner()
        }
    };

    match scheduler.tick(&mut *guard) {
        Ok(result) if result.reset_count() > 0 => {
            log::debug!("Next reset in {:?}", result.next_reset_in);
        }
        Ok(_) => {}
        Err(err) => log::error!("Auto-reset tick failed: {:#}", err),
    }
}
