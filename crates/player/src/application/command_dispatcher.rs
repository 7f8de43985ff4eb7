//! Command Dispatcher - runs a user's chosen action against the backend.
//!
//! Every command has the same three phases:
//! 1. capture player stats for delta display,
//! 2. exactly one network call that performs the action and returns its result,
//! 3. forced snapshot re-fetch plus player stats refresh.
//!
//! A failure in phase 2 returns before phase 3, so the snapshot stays exactly as
//! it was. Local precondition failures return before phase 2. Nothing retries.

use std::sync::Arc;

use serde_json::{Map, Value};

use kingdom_domain::{ActionCommand, AllianceId, KingdomId, NavigationTarget};
use kingdom_shared::ActionOutcome;

use crate::application::error::{CommandError, PreconditionError};
use crate::application::services::{
    ActionService, ActionStatusService, AllianceService, PlayerStatsService, StatDelta,
};

/// What the UI shows after a successful command.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandReport {
    pub outcome: ActionOutcome,
    /// Stat changes observed across the command, when stats were known before it.
    pub stat_delta: Option<StatDelta>,
    pub navigate_to: Option<NavigationTarget>,
}

/// A command whose preconditions have been checked.
enum PreparedCall<'a> {
    Post {
        endpoint: &'a str,
        payload: Option<&'a Map<String, Value>>,
    },
    InitiateBattle {
        endpoint: Option<&'a str>,
        target: &'a KingdomId,
    },
    ProposeAlliance(&'a KingdomId),
    AcceptAlliance(AllianceId),
    DeclineAlliance(AllianceId),
}

fn present_target(target: &Option<KingdomId>) -> Result<&KingdomId, PreconditionError> {
    target
        .as_ref()
        .filter(|id| !id.is_blank())
        .ok_or(PreconditionError::MissingKingdomContext)
}

fn prepare(command: &ActionCommand) -> Result<PreparedCall<'_>, PreconditionError> {
    Ok(match command {
        ActionCommand::Generic {
            endpoint, payload, ..
        } => PreparedCall::Post {
            endpoint: endpoint
                .as_deref()
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .ok_or(PreconditionError::MissingEndpoint)?,
            payload: payload.as_ref(),
        },
        ActionCommand::InitiateBattle {
            endpoint, target, ..
        } => PreparedCall::InitiateBattle {
            endpoint: endpoint.as_deref(),
            target: present_target(target)?,
        },
        ActionCommand::ProposeAlliance { target, .. } => {
            PreparedCall::ProposeAlliance(present_target(target)?)
        }
        ActionCommand::AcceptAlliance(id) => PreparedCall::AcceptAlliance(*id),
        ActionCommand::DeclineAlliance(id) => PreparedCall::DeclineAlliance(*id),
    })
}

pub struct CommandDispatcher {
    actions: ActionService,
    alliances: AllianceService,
    status: Arc<ActionStatusService>,
    stats: Arc<PlayerStatsService>,
}

impl CommandDispatcher {
    pub fn new(
        actions: ActionService,
        alliances: AllianceService,
        status: Arc<ActionStatusService>,
        stats: Arc<PlayerStatsService>,
    ) -> Self {
        Self {
            actions,
            alliances,
            status,
            stats,
        }
    }

    pub async fn execute(&self, command: &ActionCommand) -> Result<CommandReport, CommandError> {
        let call = prepare(command).map_err(|e| {
            tracing::debug!(command = command.label(), error = %e, "Command precondition failed");
            e
        })?;

        let before = self.stats.stats();

        let outcome = match call {
            PreparedCall::Post { endpoint, payload } => {
                self.actions.perform(endpoint, payload).await?
            }
            PreparedCall::InitiateBattle { endpoint, target } => {
                self.actions.initiate_battle(endpoint, target).await?
            }
            PreparedCall::ProposeAlliance(target) => self.alliances.propose(target).await?.into(),
            PreparedCall::AcceptAlliance(id) => self.alliances.accept(id).await?.into(),
            PreparedCall::DeclineAlliance(id) => self.alliances.decline(id).await?.into(),
        };

        if !outcome.success {
            tracing::info!(
                command = command.label(),
                message = %outcome.message,
                "Command rejected by server"
            );
            return Err(CommandError::Rejected(outcome.message));
        }
        tracing::info!(command = command.label(), "Command executed");

        self.refresh_after_command().await;

        let stat_delta = before
            .zip(self.stats.stats())
            .map(|(before, after)| StatDelta::between(before, after));
        let navigate_to = match command {
            ActionCommand::InitiateBattle { .. } => {
                outcome.battle_id.map(NavigationTarget::BattleDetail)
            }
            _ => None,
        };

        Ok(CommandReport {
            outcome,
            stat_delta,
            navigate_to,
        })
    }

    /// Phase 3. The command already succeeded, so refresh failures are logged
    /// and left for the next refresh to reconcile.
    async fn refresh_after_command(&self) {
        let (snapshot, stats) = tokio::join!(
            self.status.load_action_status(true),
            self.stats.refresh()
        );
        if let Err(e) = snapshot {
            tracing::warn!(error = %e, "Snapshot refresh after command failed");
        }
        if let Err(e) = stats {
            tracing::warn!(error = %e, "Player stats refresh after command failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use serde_json::json;

    use kingdom_domain::BattleId;
    use kingdom_shared::routes;

    use crate::application::api::Api;
    use crate::infrastructure::clock::ManualClock;
    use crate::infrastructure::testing::fixtures::{self, api_request_failed, player_state_json};
    use crate::ports::outbound::{ApiError, MockRawApiPort};

    struct Harness {
        dispatcher: CommandDispatcher,
        status: Arc<ActionStatusService>,
        stats: Arc<PlayerStatsService>,
    }

    fn harness(raw: MockRawApiPort) -> Harness {
        let api = Api::new(Arc::new(raw));
        let clock = Arc::new(ManualClock::new(fixtures::epoch()));
        let status = Arc::new(ActionStatusService::new(
            api.clone(),
            clock,
            Duration::from_secs(3),
        ));
        let stats = Arc::new(PlayerStatsService::new(api.clone()));
        let dispatcher = CommandDispatcher::new(
            ActionService::new(api.clone()),
            AllianceService::new(api),
            Arc::clone(&status),
            Arc::clone(&stats),
        );
        Harness {
            dispatcher,
            status,
            stats,
        }
    }

    fn farm() -> ActionCommand {
        ActionCommand::Generic {
            key: "farm".to_string(),
            endpoint: Some("/actions/farm".to_string()),
            payload: None,
        }
    }

    #[tokio::test]
    async fn success_refreshes_snapshot_and_reports_delta() {
        let mut raw = MockRawApiPort::new();
        raw.expect_get_json()
            .withf(|path| path == routes::ACTION_STATUS)
            .times(2)
            .returning(|_| Ok(fixtures::farm_patrol_snapshot_json()));
        let mut stats_seq = mockall::Sequence::new();
        raw.expect_get_json()
            .withf(|path| path == routes::PLAYER_STATE)
            .times(1)
            .in_sequence(&mut stats_seq)
            .returning(|_| Ok(player_state_json(100, 10)));
        raw.expect_get_json()
            .withf(|path| path == routes::PLAYER_STATE)
            .times(1)
            .in_sequence(&mut stats_seq)
            .returning(|_| Ok(player_state_json(112, 11)));
        raw.expect_post_json()
            .withf(|path, _| path == "/actions/farm")
            .times(1)
            .returning(|_, _| {
                Ok(json!({"message": "Harvested", "rewards": {"gold": 12, "reputation": 1}}))
            });
        let h = harness(raw);

        h.status.load_action_status(false).await.unwrap();
        h.stats.refresh().await.unwrap();
        let before = h.status.current().unwrap();

        // Inside the debounce window: the post-command refresh is forced anyway.
        let report = h.dispatcher.execute(&farm()).await.unwrap();

        assert_eq!(report.outcome.message, "Harvested");
        let delta = report.stat_delta.unwrap();
        assert_eq!(delta.gold, 12);
        assert_eq!(delta.reputation, 1);
        assert!(report.navigate_to.is_none());
        assert_eq!(h.status.current().unwrap().version, before.version + 1);
    }

    #[tokio::test]
    async fn network_failure_leaves_snapshot_untouched() {
        let mut raw = MockRawApiPort::new();
        raw.expect_get_json()
            .withf(|path| path == routes::ACTION_STATUS)
            .times(1)
            .returning(|_| Ok(fixtures::farm_patrol_snapshot_json()));
        raw.expect_post_json()
            .times(1)
            .returning(|_, _| Err(api_request_failed("connection refused")));
        let h = harness(raw);

        h.status.load_action_status(false).await.unwrap();
        let before = h.status.current().unwrap();

        let err = h.dispatcher.execute(&farm()).await.unwrap_err();
        assert!(matches!(err, CommandError::Api(ApiError::RequestFailed(_))));

        let after = h.status.current().unwrap();
        assert!(Arc::ptr_eq(&before, &after));
        assert_eq!(before.version, after.version);
    }

    #[tokio::test]
    async fn server_error_message_is_surfaced() {
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json().times(1).returning(|_, _| {
            Err(ApiError::Server {
                status: 400,
                message: "Not enough gold".to_string(),
            })
        });
        let h = harness(raw);

        let err = h.dispatcher.execute(&farm()).await.unwrap_err();
        assert_eq!(err.user_message(), "Not enough gold");
        assert!(h.status.current().is_none());
    }

    #[tokio::test]
    async fn unsuccessful_outcome_is_rejected_without_refresh() {
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json()
            .times(1)
            .returning(|_, _| Ok(json!({"success": false, "message": "Already patrolling"})));
        raw.expect_get_json().never();
        let h = harness(raw);

        let err = h.dispatcher.execute(&farm()).await.unwrap_err();
        assert_eq!(err, CommandError::Rejected("Already patrolling".to_string()));
    }

    #[tokio::test]
    async fn missing_endpoint_fails_before_network() {
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json().never();
        raw.expect_get_json().never();
        let h = harness(raw);

        let command = ActionCommand::Generic {
            key: "mystery".to_string(),
            endpoint: Some("   ".to_string()),
            payload: None,
        };
        let err = h.dispatcher.execute(&command).await.unwrap_err();
        assert_eq!(
            err,
            CommandError::Precondition(PreconditionError::MissingEndpoint)
        );
        assert!(err.is_local());
    }

    #[tokio::test]
    async fn battle_without_kingdom_fails_before_network() {
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json().never();
        let h = harness(raw);

        let command = ActionCommand::InitiateBattle {
            key: "declare_war".to_string(),
            endpoint: None,
            target: None,
        };
        let err = h.dispatcher.execute(&command).await.unwrap_err();
        assert_eq!(
            err,
            CommandError::Precondition(PreconditionError::MissingKingdomContext)
        );
    }

    #[tokio::test]
    async fn battle_navigates_to_new_battle() {
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json()
            .withf(|path, body| {
                path == routes::INITIATE_BATTLE && *body == json!({"target_kingdom_id": "k-2"})
            })
            .times(1)
            .returning(|_, _| Ok(json!({"success": true, "message": "War!", "battle_id": 88})));
        raw.expect_get_json()
            .withf(|path| path == routes::ACTION_STATUS)
            .returning(|_| Ok(fixtures::farm_patrol_snapshot_json()));
        raw.expect_get_json()
            .withf(|path| path == routes::PLAYER_STATE)
            .returning(|_| Ok(player_state_json(0, 0)));
        let h = harness(raw);

        let command = ActionCommand::InitiateBattle {
            key: "declare_war".to_string(),
            endpoint: None,
            target: Some(KingdomId::new("k-2")),
        };
        let report = h.dispatcher.execute(&command).await.unwrap();
        assert_eq!(
            report.navigate_to,
            Some(NavigationTarget::BattleDetail(BattleId::new(88)))
        );
        // Stats were unknown before the command, so no delta.
        assert!(report.stat_delta.is_none());
    }

    #[tokio::test]
    async fn accept_alliance_posts_id_and_refreshes() {
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json()
            .withf(|path, body| {
                path == routes::ACCEPT_ALLIANCE && *body == json!({"alliance_id": 3})
            })
            .times(1)
            .returning(|_, _| Ok(json!({"success": true, "message": "Allied"})));
        raw.expect_get_json()
            .withf(|path| path == routes::ACTION_STATUS)
            .times(1)
            .returning(|_| Ok(fixtures::farm_patrol_snapshot_json()));
        raw.expect_get_json()
            .withf(|path| path == routes::PLAYER_STATE)
            .times(1)
            .returning(|_| Ok(player_state_json(0, 0)));
        let h = harness(raw);

        let report = h
            .dispatcher
            .execute(&ActionCommand::AcceptAlliance(AllianceId::new(3)))
            .await
            .unwrap();
        assert_eq!(report.outcome.message, "Allied");
        assert!(h.status.current().is_some());
    }

    #[tokio::test]
    async fn refresh_failure_after_success_still_reports_success() {
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json()
            .times(1)
            .returning(|_, _| Ok(json!({"message": "Harvested"})));
        raw.expect_get_json()
            .returning(|_| Err(api_request_failed("flaky")));
        let h = harness(raw);

        let report = h.dispatcher.execute(&farm()).await.unwrap();
        assert_eq!(report.outcome.message, "Harvested");
    }
}
