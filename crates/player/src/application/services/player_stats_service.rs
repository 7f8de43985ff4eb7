//! Player Stats Service - cached player stats between snapshot refreshes.

use std::sync::{PoisonError, RwLock};

use kingdom_shared::{routes, PlayerState};

use crate::application::api::Api;
use crate::ports::outbound::ApiError;

/// The mutable stats shown in reward deltas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatSnapshot {
    pub gold: i64,
    pub reputation: i64,
    pub experience: i64,
    pub level: i64,
}

impl From<&PlayerState> for StatSnapshot {
    fn from(state: &PlayerState) -> Self {
        Self {
            gold: state.gold,
            reputation: state.reputation,
            experience: state.experience,
            level: state.level,
        }
    }
}

/// `after - before` for each stat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatDelta {
    pub gold: i64,
    pub reputation: i64,
    pub experience: i64,
    pub level: i64,
}

impl StatDelta {
    pub fn between(before: StatSnapshot, after: StatSnapshot) -> Self {
        Self {
            gold: after.gold - before.gold,
            reputation: after.reputation - before.reputation,
            experience: after.experience - before.experience,
            level: after.level - before.level,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

pub struct PlayerStatsService {
    api: Api,
    cached: RwLock<Option<PlayerState>>,
}

impl PlayerStatsService {
    pub fn new(api: Api) -> Self {
        Self {
            api,
            cached: RwLock::new(None),
        }
    }

    pub fn cached(&self) -> Option<PlayerState> {
        self.cached
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn stats(&self) -> Option<StatSnapshot> {
        self.cached
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(StatSnapshot::from)
    }

    /// Re-fetch player state. The cache keeps its old value on failure.
    pub async fn refresh(&self) -> Result<PlayerState, ApiError> {
        let state: PlayerState = self.api.get(routes::PLAYER_STATE).await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to refresh player state");
            e
        })?;
        *self.cached.write().unwrap_or_else(PoisonError::into_inner) = Some(state.clone());
        Ok(state)
    }
}
