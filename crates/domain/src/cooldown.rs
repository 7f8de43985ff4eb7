//! Cooldowns and countdown text.
//!
//! Countdowns are recomputed from the snapshot's fetch time on every tick; the
//! server value is never decremented in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A time-based throttle reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cooldown {
    pub ready: bool,
    pub seconds_remaining: i64,
    /// What is holding the lock, for user-facing messaging.
    pub blocking_action: Option<String>,
}

impl Default for Cooldown {
    fn default() -> Self {
        Self {
            ready: true,
            seconds_remaining: 0,
            blocking_action: None,
        }
    }
}

impl Cooldown {
    /// Seconds left at `now`, given the snapshot was fetched at `fetched_at`.
    pub fn remaining_at(&self, fetched_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
        let elapsed = (now - fetched_at).num_seconds().max(0);
        (self.seconds_remaining.max(0) - elapsed).max(0)
    }

    pub fn is_blocking_at(&self, fetched_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        !self.ready && self.remaining_at(fetched_at, now) > 0
    }

    pub fn blocking_message(&self) -> String {
        match self.blocking_action.as_deref().map(str::trim) {
            Some(action) if !action.is_empty() => format!("Busy with {action}"),
            _ => "On cooldown".to_string(),
        }
    }
}

/// Short countdown label: `Ready`, `M:SS`, or `Hh MMm`.
pub fn format_countdown(seconds: i64) -> String {
    if seconds <= 0 {
        return "Ready".to_string();
    }
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}h {minutes:02}m")
    } else {
        format!("{minutes}:{secs:02}")
    }
}
