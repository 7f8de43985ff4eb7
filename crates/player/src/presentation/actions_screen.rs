//! Actions screen controller.
//!
//! Owns the screen-level state the views read: the current kingdom context,
//! the last user-facing error and the last reward popup. The snapshot itself
//! lives in `ActionStatusService`; the screen only holds `Arc`s to it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use kingdom_domain::{
    format_countdown, render, render_alliance_requests, render_slots, ActionCommand,
    AllianceRequestCard, Interaction, KingdomContext, RenderContext, RenderedAction,
    RenderedSlot, Rewards,
};
use kingdom_shared::PlayerState;

use crate::application::services::{FetchedSnapshot, RefreshOutcome, StatDelta};
use crate::application::{CommandError, CommandReport};
use crate::config::ClientConfig;
use crate::ports::outbound::{ApiError, ClockPort, RawApiPort};
use crate::presentation::countdown::CountdownTicker;
use crate::presentation::services::Services;

/// Everything a view needs to draw the screen at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenModel {
    pub slots: Vec<RenderedSlot>,
    pub alliance_requests: Vec<AllianceRequestCard>,
    /// Countdown text while the global cooldown blocks actions.
    pub global_countdown: Option<String>,
    pub kingdom: Option<KingdomContext>,
    pub snapshot_version: u64,
}

/// Shown after a successful command.
#[derive(Debug, Clone, PartialEq)]
pub struct RewardPopup {
    pub message: String,
    pub rewards: Option<Rewards>,
    pub stat_delta: Option<StatDelta>,
}

#[derive(Debug, Default)]
struct ScreenState {
    /// Keyed by `kingdom_id`; replaced whenever the player moves.
    kingdom: Option<KingdomContext>,
    alert: Option<String>,
    reward_popup: Option<RewardPopup>,
}

impl ScreenState {
    /// Recompute the kingdom context from freshly cached player state.
    ///
    /// `is_home` is derived from the latest player state on every call.
    fn update_kingdom(&mut self, player: Option<&PlayerState>) {
        let Some((player, kingdom_id)) = player.and_then(|p| {
            p.current_kingdom_id
                .clone()
                .filter(|id| !id.is_blank())
                .map(|id| (p, id))
        }) else {
            self.kingdom = None;
            return;
        };

        let is_home = player.home_kingdom_id.as_ref() == Some(&kingdom_id);
        if self.kingdom.as_ref().map(|k| &k.kingdom_id) != Some(&kingdom_id) {
            tracing::debug!(kingdom_id = %kingdom_id, is_home, "Kingdom context changed");
        }

        self.kingdom = Some(KingdomContext {
            kingdom_id,
            kingdom_name: player.current_kingdom_name.clone(),
            is_home,
        });
    }
}

pub struct ActionsScreen {
    services: Services,
    clock: Arc<dyn ClockPort>,
    state: Mutex<ScreenState>,
}

impl ActionsScreen {
    pub fn new(raw_api: Arc<dyn RawApiPort>, clock: Arc<dyn ClockPort>, config: &ClientConfig) -> Self {
        let services = Services::new(raw_api, Arc::clone(&clock), config.refresh_debounce);
        Self::with_services(services, clock)
    }

    pub fn with_services(services: Services, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            services,
            clock,
            state: Mutex::new(ScreenState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, ScreenState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load the snapshot, subject to the fetch throttle.
    ///
    /// Player stats are refreshed alongside every fetch that actually happens so
    /// the kingdom context follows the player. A failed snapshot fetch sets the
    /// alert; a failed stats refresh is only logged.
    pub async fn refresh(&self, force: bool) -> Result<RefreshOutcome, ApiError> {
        let outcome = match self.services.status.load_action_status(force).await {
            Ok(outcome) => outcome,
            Err(e) => {
                self.state().alert = Some(e.user_message());
                return Err(e);
            }
        };

        if !outcome.is_suppressed() || self.services.stats.cached().is_none() {
            if let Err(e) = self.services.stats.refresh().await {
                tracing::warn!(error = %e, "Player stats unavailable for kingdom context");
            }
        }
        let player = self.services.stats.cached();
        self.state().update_kingdom(player.as_ref());
        Ok(outcome)
    }

    /// Render the current snapshot at the clock's current time.
    pub fn render(&self) -> Option<ScreenModel> {
        self.render_at(self.clock.now())
    }

    /// Render the current snapshot at `now`. `None` until the first successful fetch.
    pub fn render_at(&self, now: DateTime<Utc>) -> Option<ScreenModel> {
        let fetched = self.services.status.current()?;
        let kingdom = self.kingdom();
        let ctx = render_context(&fetched, kingdom.as_ref(), now);

        let global = &fetched.snapshot.global_cooldown;
        let global_countdown = global
            .is_blocking_at(fetched.fetched_at, now)
            .then(|| format_countdown(global.remaining_at(fetched.fetched_at, now)));

        Some(ScreenModel {
            slots: render_slots(&ctx),
            alliance_requests: render_alliance_requests(&ctx),
            global_countdown,
            kingdom,
            snapshot_version: fetched.version,
        })
    }

    /// Render a single action by key, whether or not any slot references it.
    pub fn render_action(&self, key: &str) -> Option<RenderedAction> {
        let fetched = self.services.status.current()?;
        let action = fetched.snapshot.action(key)?;
        let kingdom = self.kingdom();
        let ctx = render_context(&fetched, kingdom.as_ref(), self.clock.now());
        Some(render(key, action, &ctx))
    }

    /// The interaction the user would trigger by tapping `key`.
    pub fn interaction_for(&self, key: &str) -> Option<Interaction> {
        match self.render_action(key)? {
            RenderedAction::Available(card) if card.enabled => card.interaction,
            RenderedAction::Available(card) => {
                tracing::debug!(key, reason = ?card.disabled_reason, "Action is disabled");
                None
            }
            RenderedAction::Locked(_) => None,
        }
    }

    /// Run a command. Errors become the alert; success becomes the reward popup.
    pub async fn execute(&self, command: &ActionCommand) -> Result<CommandReport, CommandError> {
        match self.services.dispatcher.execute(command).await {
            Ok(report) => {
                let player = self.services.stats.cached();
                let mut state = self.state();
                state.update_kingdom(player.as_ref());
                state.reward_popup = Some(RewardPopup {
                    message: report.outcome.message.clone(),
                    rewards: report.outcome.rewards,
                    stat_delta: report.stat_delta,
                });
                Ok(report)
            }
            Err(e) => {
                self.state().alert = Some(e.user_message());
                Err(e)
            }
        }
    }

    pub fn alert(&self) -> Option<String> {
        self.state().alert.clone()
    }

    pub fn dismiss_alert(&self) {
        self.state().alert = None;
    }

    pub fn reward_popup(&self) -> Option<RewardPopup> {
        self.state().reward_popup.clone()
    }

    pub fn dismiss_reward_popup(&self) {
        self.state().reward_popup = None;
    }

    pub fn kingdom(&self) -> Option<KingdomContext> {
        self.state().kingdom.clone()
    }

    /// One-second ticker for countdown re-renders, stopped when dropped.
    pub fn countdown_ticker(&self) -> CountdownTicker {
        CountdownTicker::every_second(Arc::clone(&self.clock))
    }
}

fn render_context<'a>(
    fetched: &'a FetchedSnapshot,
    kingdom: Option<&'a KingdomContext>,
    now: DateTime<Utc>,
) -> RenderContext<'a> {
    RenderContext::new(&fetched.snapshot, fetched.fetched_at)
        .with_kingdom(kingdom)
        .at(now)
}
