//! Snapshot fetch throttle.
//!
//! `Idle -> Loading -> Idle`. A request is suppressed while another fetch is in
//! flight (even when forced) and, unless forced, when the last successful fetch
//! is younger than the debounce window. Failures return to `Idle` without
//! touching the freshness timestamp.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Loading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressReason {
    /// Last successful fetch is inside the debounce window.
    Fresh,
    /// Another fetch is already in flight.
    InFlight,
}

#[derive(Debug, Clone)]
pub struct FetchThrottle {
    phase: FetchPhase,
    last_success: Option<DateTime<Utc>>,
    debounce: chrono::Duration,
}

impl FetchThrottle {
    pub fn new(debounce: std::time::Duration) -> Self {
        Self {
            phase: FetchPhase::Idle,
            last_success: None,
            debounce: chrono::Duration::from_std(debounce)
                .unwrap_or_else(|_| chrono::Duration::seconds(3)),
        }
    }

    pub fn phase(&self) -> FetchPhase {
        self.phase
    }

    pub fn last_success(&self) -> Option<DateTime<Utc>> {
        self.last_success
    }

    /// Move to `Loading`, or report why the request is suppressed.
    pub fn try_begin(&mut self, force: bool, now: DateTime<Utc>) -> Result<(), SuppressReason> {
        if self.phase == FetchPhase::Loading {
            return Err(SuppressReason::InFlight);
        }
        if !force {
            if let Some(last) = self.last_success {
                if now - last < self.debounce {
                    return Err(SuppressReason::Fresh);
                }
            }
        }
        self.phase = FetchPhase::Loading;
        Ok(())
    }

    /// Back to `Idle`. `succeeded_at` is `None` for a failed fetch.
    pub fn finish(&mut self, succeeded_at: Option<DateTime<Utc>>) {
        self.phase = FetchPhase::Idle;
        if let Some(at) = succeeded_at {
            self.last_success = Some(at);
        }
    }
}
