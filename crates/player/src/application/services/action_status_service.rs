//! Action Status Service - owns the current snapshot and the fetch throttle.
//!
//! The snapshot is replaced wholesale on every successful fetch and never
//! touched on failure. Readers get an `Arc` to an immutable value.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use chrono::{DateTime, Utc};

use kingdom_domain::ActionStatusSnapshot;
use kingdom_shared::routes;

use crate::application::api::Api;
use crate::application::throttle::{FetchPhase, FetchThrottle, SuppressReason};
use crate::ports::outbound::{ApiError, ClockPort};

/// One successful fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedSnapshot {
    pub snapshot: ActionStatusSnapshot,
    pub fetched_at: DateTime<Utc>,
    /// Increases by one per successful fetch.
    pub version: u64,
}

#[derive(Debug, Clone)]
pub enum RefreshOutcome {
    Fetched(Arc<FetchedSnapshot>),
    Suppressed(SuppressReason),
}

impl RefreshOutcome {
    pub fn is_suppressed(&self) -> bool {
        matches!(self, RefreshOutcome::Suppressed(_))
    }
}

pub struct ActionStatusService {
    api: Api,
    clock: Arc<dyn ClockPort>,
    throttle: Mutex<FetchThrottle>,
    current: RwLock<Option<Arc<FetchedSnapshot>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Returns the throttle to `Idle` even if the fetch future is dropped midway.
struct InFlight<'a> {
    throttle: &'a Mutex<FetchThrottle>,
    done: bool,
}

impl InFlight<'_> {
    fn finish(mut self, succeeded_at: Option<DateTime<Utc>>) {
        lock(self.throttle).finish(succeeded_at);
        self.done = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.done {
            lock(self.throttle).finish(None);
        }
    }
}

impl ActionStatusService {
    pub fn new(api: Api, clock: Arc<dyn ClockPort>, debounce: std::time::Duration) -> Self {
        Self {
            api,
            clock,
            throttle: Mutex::new(FetchThrottle::new(debounce)),
            current: RwLock::new(None),
        }
    }

    /// The latest successful snapshot, if any.
    pub fn current(&self) -> Option<Arc<FetchedSnapshot>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn phase(&self) -> FetchPhase {
        lock(&self.throttle).phase()
    }

    /// Fetch the snapshot unless the throttle suppresses the request.
    pub async fn load_action_status(&self, force: bool) -> Result<RefreshOutcome, ApiError> {
        let begin = lock(&self.throttle).try_begin(force, self.clock.now());
        if let Err(reason) = begin {
            tracing::debug!(force, ?reason, "Action status refresh suppressed");
            return Ok(RefreshOutcome::Suppressed(reason));
        }
        let in_flight = InFlight {
            throttle: &self.throttle,
            done: false,
        };

        tracing::debug!(force, "Fetching action status");
        match self
            .api
            .get::<ActionStatusSnapshot>(routes::ACTION_STATUS)
            .await
        {
            Ok(snapshot) => {
                let fetched_at = self.clock.now();
                let fetched = {
                    let mut current = self
                        .current
                        .write()
                        .unwrap_or_else(PoisonError::into_inner);
                    let version = current.as_ref().map_or(1, |prev| prev.version + 1);
                    let fetched = Arc::new(FetchedSnapshot {
                        snapshot,
                        fetched_at,
                        version,
                    });
                    *current = Some(Arc::clone(&fetched));
                    fetched
                };
                in_flight.finish(Some(fetched_at));
                tracing::debug!(
                    version = fetched.version,
                    slots = fetched.snapshot.slots.len(),
                    actions = fetched.snapshot.actions.len(),
                    "Action status updated"
                );
                Ok(RefreshOutcome::Fetched(fetched))
            }
            Err(e) => {
                in_flight.finish(None);
                tracing::warn!(error = %e, "Failed to fetch action status");
                Err(e)
            }
        }
    }
}
