//! Periodic history refresh.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::Dispatcher;

/// Starts the recurring history refresh.
pub struct Poller;

impl Poller {
    /// Fetch history now and then every `interval` until the returned handle
    /// is stopped or dropped.
    pub fn start(dispatcher: Dispatcher, interval: Duration) -> PollHandle {
        let runtime = dispatcher.runtime().clone();
        let task = runtime.spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                // The first tick completes immediately.
                ticker.tick().await;
                tracing::debug!(backend = dispatcher.description(), "polling history");
                // Spawned so a slow or hung request never holds back the next tick.
                dispatcher.fetch_history();
            }
        });
        PollHandle {
            task: Some(task),
            interval,
        }
    }
}

/// Ownership of a running poll loop.
///
/// The loop is aborted when the handle is dropped.
#[derive(Debug)]
pub struct PollHandle {
    task: Option<JoinHandle<()>>,
    interval: Duration,
}

impl PollHandle {
    /// The refresh interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the loop is still scheduled.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Cancel the loop. Idempotent.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("history poll loop stopped");
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
