//! Countdown ticker for cosmetic re-renders.
//!
//! Emits the current time on a `watch` channel once per period. Consumers
//! re-render countdown text from the snapshot's fetch time; the ticker itself
//! never touches the network.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::ports::outbound::ClockPort;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Background ticker. The task is aborted when the ticker is dropped.
pub struct CountdownTicker {
    rx: watch::Receiver<DateTime<Utc>>,
    task: JoinHandle<()>,
}

impl CountdownTicker {
    /// Tick once per second. Must be called inside a tokio runtime.
    pub fn every_second(clock: Arc<dyn ClockPort>) -> Self {
        Self::spawn(clock, TICK_PERIOD)
    }

    pub fn spawn(clock: Arc<dyn ClockPort>, period: Duration) -> Self {
        let (tx, rx) = watch::channel(clock.now());
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately; the initial value already covers it.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(clock.now()).is_err() {
                    tracing::debug!("Countdown ticker has no receivers, stopping");
                    break;
                }
            }
        });
        Self { rx, task }
    }

    /// Time of the most recent tick.
    pub fn latest(&self) -> DateTime<Utc> {
        *self.rx.borrow()
    }

    /// Wait for the next tick. `None` once the ticker has stopped.
    pub async fn next_tick(&mut self) -> Option<DateTime<Utc>> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }

    /// Another receiver on the same ticks.
    pub fn subscribe(&self) -> watch::Receiver<DateTime<Utc>> {
        self.rx.clone()
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.task.abort();
    }
}
