//! Action renderer dispatch.
//!
//! Turns one `(key, ActionStatus)` pair into a render-ready card. Locked actions
//! short-circuit to a locked card; everything else dispatches on the server's
//! `handler` tag, with unknown tags degrading to the generic POST path.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::cooldown::format_countdown;
use crate::display::{locked_text, ActionDisplay};
use crate::ids::{AllianceId, BattleId, KingdomId};
use crate::snapshot::{ActionCost, ActionStatus, ActionStatusSnapshot, Rewards};

pub const HANDLER_INITIATE_BATTLE: &str = "initiate_battle";
pub const HANDLER_VIEW_BATTLE: &str = "view_battle";
pub const HANDLER_PROPOSE_ALLIANCE: &str = "propose_alliance";

/// Interaction behaviour selected by the server's handler tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionHandler {
    InitiateBattle,
    ViewBattle,
    ProposeAlliance,
    /// Absent or unrecognised tag.
    Generic,
}

impl ActionHandler {
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(str::trim) {
            Some(HANDLER_INITIATE_BATTLE) => ActionHandler::InitiateBattle,
            Some(HANDLER_VIEW_BATTLE) => ActionHandler::ViewBattle,
            Some(HANDLER_PROPOSE_ALLIANCE) => ActionHandler::ProposeAlliance,
            _ => ActionHandler::Generic,
        }
    }
}

/// The kingdom the player is currently standing in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KingdomContext {
    pub kingdom_id: KingdomId,
    pub kingdom_name: Option<String>,
    pub is_home: bool,
}

/// Read-only inputs shared by every card rendered from one snapshot.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub snapshot: &'a ActionStatusSnapshot,
    pub kingdom: Option<&'a KingdomContext>,
    pub fetched_at: DateTime<Utc>,
    pub now: DateTime<Utc>,
}

impl<'a> RenderContext<'a> {
    pub fn new(snapshot: &'a ActionStatusSnapshot, fetched_at: DateTime<Utc>) -> Self {
        Self {
            snapshot,
            kingdom: None,
            fetched_at,
            now: fetched_at,
        }
    }

    pub fn with_kingdom(mut self, kingdom: Option<&'a KingdomContext>) -> Self {
        self.kingdom = kingdom;
        self
    }

    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    fn global_cooldown_active(&self) -> bool {
        self.snapshot
            .global_cooldown
            .is_blocking_at(self.fetched_at, self.now)
    }
}

/// A user intent ready for the command dispatcher. Context values that were
/// missing at render time stay `None` and are rejected before any network call.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionCommand {
    Generic {
        key: String,
        endpoint: Option<String>,
        payload: Option<Map<String, Value>>,
    },
    InitiateBattle {
        key: String,
        endpoint: Option<String>,
        target: Option<KingdomId>,
    },
    ProposeAlliance {
        key: String,
        target: Option<KingdomId>,
    },
    AcceptAlliance(AllianceId),
    DeclineAlliance(AllianceId),
}

impl ActionCommand {
    /// Short name used in logs.
    pub fn label(&self) -> &str {
        match self {
            ActionCommand::Generic { key, .. }
            | ActionCommand::InitiateBattle { key, .. }
            | ActionCommand::ProposeAlliance { key, .. } => key,
            ActionCommand::AcceptAlliance(_) => "accept_alliance",
            ActionCommand::DeclineAlliance(_) => "decline_alliance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationTarget {
    BattleDetail(BattleId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationPrompt {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    /// Ask first, then run the command.
    Confirm {
        prompt: ConfirmationPrompt,
        command: ActionCommand,
    },
    Navigate(NavigationTarget),
    Post(ActionCommand),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LockedCard {
    pub key: String,
    pub display: ActionDisplay,
    pub requirement: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionCard {
    pub key: String,
    pub display: ActionDisplay,
    pub handler: ActionHandler,
    pub cost: Option<ActionCost>,
    pub rewards: Option<Rewards>,
    pub enabled: bool,
    pub disabled_reason: Option<String>,
    pub countdown: Option<String>,
    /// `None` only when the card cannot be acted on at all.
    pub interaction: Option<Interaction>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderedAction {
    Locked(LockedCard),
    Available(ActionCard),
}

impl RenderedAction {
    pub fn key(&self) -> &str {
        match self {
            RenderedAction::Locked(card) => &card.key,
            RenderedAction::Available(card) => &card.key,
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, RenderedAction::Locked(_))
    }
}

pub fn render(key: &str, action: &ActionStatus, ctx: &RenderContext<'_>) -> RenderedAction {
    let display = ActionDisplay::resolve(key, action);

    if !action.unlocked {
        return RenderedAction::Locked(LockedCard {
            key: key.to_string(),
            display,
            requirement: locked_text(action),
        });
    }

    let handler = ActionHandler::from_tag(action.handler.as_deref());
    let mut card = ActionCard {
        key: key.to_string(),
        display,
        handler,
        cost: action.cost.filter(|cost| !cost.is_free()),
        rewards: action.expected_rewards.filter(|rewards| !rewards.is_empty()),
        enabled: true,
        disabled_reason: None,
        countdown: None,
        interaction: None,
    };

    match handler {
        ActionHandler::InitiateBattle => {
            let target_name = ctx
                .kingdom
                .and_then(|k| k.kingdom_name.clone())
                .or_else(|| action.target_kingdom_name.clone())
                .unwrap_or_else(|| "this kingdom".to_string());
            card.interaction = Some(Interaction::Confirm {
                prompt: ConfirmationPrompt {
                    title: card.display.title.clone(),
                    message: format!("Declare war on {target_name}? This cannot be undone."),
                    confirm_label: "Declare War".to_string(),
                },
                command: ActionCommand::InitiateBattle {
                    key: key.to_string(),
                    endpoint: action.endpoint.clone(),
                    target: ctx.kingdom.map(|k| k.kingdom_id.clone()),
                },
            });
        }
        ActionHandler::ViewBattle => match action.battle_id {
            Some(battle_id) => {
                card.interaction = Some(Interaction::Navigate(NavigationTarget::BattleDetail(
                    battle_id,
                )));
            }
            None => {
                card.enabled = false;
                card.disabled_reason = Some("Battle unavailable".to_string());
            }
        },
        ActionHandler::ProposeAlliance => {
            let target = action
                .target_kingdom_id
                .clone()
                .filter(|id| !id.is_blank())
                .or_else(|| ctx.kingdom.map(|k| k.kingdom_id.clone()));
            let target_name = action
                .target_kingdom_name
                .clone()
                .or_else(|| ctx.kingdom.and_then(|k| k.kingdom_name.clone()))
                .unwrap_or_else(|| "this kingdom".to_string());
            card.interaction = Some(Interaction::Confirm {
                prompt: ConfirmationPrompt {
                    title: card.display.title.clone(),
                    message: format!("Propose an alliance with {target_name}?"),
                    confirm_label: "Propose".to_string(),
                },
                command: ActionCommand::ProposeAlliance {
                    key: key.to_string(),
                    target,
                },
            });
        }
        ActionHandler::Generic => {
            let global = &ctx.snapshot.global_cooldown;
            if ctx.global_cooldown_active() {
                card.enabled = false;
                card.disabled_reason = Some(global.blocking_message());
                card.countdown = Some(format_countdown(
                    global.remaining_at(ctx.fetched_at, ctx.now),
                ));
            } else if let Some(own) = action
                .cooldown()
                .filter(|own| own.is_blocking_at(ctx.fetched_at, ctx.now))
            {
                card.countdown = Some(format_countdown(
                    own.remaining_at(ctx.fetched_at, ctx.now),
                ));
            }
            card.interaction = Some(Interaction::Post(ActionCommand::Generic {
                key: key.to_string(),
                endpoint: action.endpoint.clone(),
                payload: action.payload.clone(),
            }));
        }
    }

    RenderedAction::Available(card)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cooldown::Cooldown;
    use chrono::{Duration, TimeZone};

    fn fetched() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn unlocked(handler: Option<&str>) -> ActionStatus {
        ActionStatus {
            unlocked: true,
            handler: handler.map(str::to_string),
            endpoint: Some("/actions/work".to_string()),
            ..Default::default()
        }
    }

    fn home() -> KingdomContext {
        KingdomContext {
            kingdom_id: KingdomId::new("k-7"),
            kingdom_name: Some("Ashford".to_string()),
            is_home: false,
        }
    }

    fn available(rendered: RenderedAction) -> ActionCard {
        match rendered {
            RenderedAction::Available(card) => card,
            RenderedAction::Locked(card) => panic!("unexpected locked card {}", card.key),
        }
    }

    #[test]
    fn locked_wins_over_every_handler() {
        let snapshot = ActionStatusSnapshot::default();
        let ctx = RenderContext::new(&snapshot, fetched());
        for handler in [
            None,
            Some(HANDLER_INITIATE_BATTLE),
            Some(HANDLER_VIEW_BATTLE),
            Some(HANDLER_PROPOSE_ALLIANCE),
            Some("brand_new_handler"),
        ] {
            let action = ActionStatus {
                unlocked: false,
                handler: handler.map(str::to_string),
                battle_id: Some(BattleId::new(3)),
                ..Default::default()
            };
            let rendered = render("raid", &action, &ctx);
            assert!(rendered.is_locked(), "handler {handler:?} rendered unlocked");
        }
    }

    #[test]
    fn locked_card_uses_requirement_text() {
        let snapshot = ActionStatusSnapshot::default();
        let ctx = RenderContext::new(&snapshot, fetched());
        let action = ActionStatus {
            requirement_description: Some("Reach level 2".to_string()),
            ..Default::default()
        };
        let RenderedAction::Locked(card) = render("farm", &action, &ctx) else {
            panic!("expected locked");
        };
        assert_eq!(card.requirement, "Reach level 2");
    }

    #[test]
    fn unknown_handler_takes_generic_path() {
        let snapshot = ActionStatusSnapshot::default();
        let ctx = RenderContext::new(&snapshot, fetched());
        let card = available(render("work", &unlocked(Some("summon_dragon")), &ctx));
        assert_eq!(card.handler, ActionHandler::Generic);
        assert!(card.enabled);
        assert_eq!(
            card.interaction,
            Some(Interaction::Post(ActionCommand::Generic {
                key: "work".to_string(),
                endpoint: Some("/actions/work".to_string()),
                payload: None,
            }))
        );
    }

    #[test]
    fn global_cooldown_disables_generic_actions() {
        let snapshot = ActionStatusSnapshot {
            global_cooldown: Cooldown {
                ready: false,
                seconds_remaining: 120,
                blocking_action: Some("patrol".to_string()),
            },
            ..Default::default()
        };
        let ctx = RenderContext::new(&snapshot, fetched()).at(fetched() + Duration::seconds(30));
        let card = available(render("work", &unlocked(None), &ctx));
        assert!(!card.enabled);
        assert_eq!(card.disabled_reason.as_deref(), Some("Busy with patrol"));
        assert_eq!(card.countdown.as_deref(), Some("1:30"));

        let later = RenderContext::new(&snapshot, fetched()).at(fetched() + Duration::seconds(121));
        assert!(available(render("work", &unlocked(None), &later)).enabled);
    }

    #[test]
    fn initiate_battle_targets_current_kingdom() {
        let snapshot = ActionStatusSnapshot::default();
        let kingdom = home();
        let ctx = RenderContext::new(&snapshot, fetched()).with_kingdom(Some(&kingdom));
        let card = available(render("declare_war", &unlocked(Some(HANDLER_INITIATE_BATTLE)), &ctx));

        let Some(Interaction::Confirm { prompt, command }) = card.interaction else {
            panic!("battle must confirm first");
        };
        assert!(prompt.message.contains("Ashford"));
        assert_eq!(
            command,
            ActionCommand::InitiateBattle {
                key: "declare_war".to_string(),
                endpoint: Some("/actions/work".to_string()),
                target: Some(KingdomId::new("k-7")),
            }
        );
    }

    #[test]
    fn initiate_battle_without_context_carries_no_target() {
        let snapshot = ActionStatusSnapshot::default();
        let ctx = RenderContext::new(&snapshot, fetched());
        let card = available(render("declare_war", &unlocked(Some(HANDLER_INITIATE_BATTLE)), &ctx));
        let Some(Interaction::Confirm { command, .. }) = card.interaction else {
            panic!("battle must confirm first");
        };
        assert!(matches!(command, ActionCommand::InitiateBattle { target: None, .. }));
    }

    #[test]
    fn view_battle_navigates_without_posting() {
        let snapshot = ActionStatusSnapshot::default();
        let ctx = RenderContext::new(&snapshot, fetched());
        let action = ActionStatus {
            battle_id: Some(BattleId::new(77)),
            ..unlocked(Some(HANDLER_VIEW_BATTLE))
        };
        let card = available(render("battle", &action, &ctx));
        assert_eq!(
            card.interaction,
            Some(Interaction::Navigate(NavigationTarget::BattleDetail(
                BattleId::new(77)
            )))
        );
    }

    #[test]
    fn view_battle_without_id_is_disabled() {
        let snapshot = ActionStatusSnapshot::default();
        let ctx = RenderContext::new(&snapshot, fetched());
        let card = available(render("battle", &unlocked(Some(HANDLER_VIEW_BATTLE)), &ctx));
        assert!(!card.enabled);
        assert!(card.interaction.is_none());
    }

    #[test]
    fn propose_alliance_prefers_action_target() {
        let snapshot = ActionStatusSnapshot::default();
        let kingdom = home();
        let ctx = RenderContext::new(&snapshot, fetched()).with_kingdom(Some(&kingdom));

        let action = ActionStatus {
            target_kingdom_id: Some(KingdomId::new("k-99")),
            target_kingdom_name: Some("Brightwater".to_string()),
            ..unlocked(Some(HANDLER_PROPOSE_ALLIANCE))
        };
        let card = available(render("ally", &action, &ctx));
        let Some(Interaction::Confirm { prompt, command }) = card.interaction else {
            panic!("alliance must confirm first");
        };
        assert!(prompt.message.contains("Brightwater"));
        assert_eq!(
            command,
            ActionCommand::ProposeAlliance {
                key: "ally".to_string(),
                target: Some(KingdomId::new("k-99")),
            }
        );

        let card = available(render("ally", &unlocked(Some(HANDLER_PROPOSE_ALLIANCE)), &ctx));
        let Some(Interaction::Confirm { command, .. }) = card.interaction else {
            panic!("alliance must confirm first");
        };
        assert_eq!(
            command,
            ActionCommand::ProposeAlliance {
                key: "ally".to_string(),
                target: Some(KingdomId::new("k-7")),
            }
        );
    }

    #[test]
    fn per_action_countdown_is_cosmetic() {
        let snapshot = ActionStatusSnapshot::default();
        let ctx = RenderContext::new(&snapshot, fetched()).at(fetched() + Duration::seconds(5));
        let action = ActionStatus {
            ready: Some(false),
            seconds_remaining: Some(65),
            ..unlocked(None)
        };
        let card = available(render("work", &action, &ctx));
        assert!(card.enabled);
        assert_eq!(card.countdown.as_deref(), Some("1:00"));
    }

    #[test]
    fn ready_action_shows_no_countdown() {
        let snapshot = ActionStatusSnapshot::default();
        let ctx = RenderContext::new(&snapshot, fetched());
        let action = ActionStatus {
            ready: Some(true),
            seconds_remaining: Some(30),
            ..unlocked(None)
        };
        let card = available(render("work", &action, &ctx));
        assert!(card.enabled);
        assert_eq!(card.countdown, None);
    }

    #[test]
    fn free_costs_and_empty_rewards_are_hidden() {
        let snapshot = ActionStatusSnapshot::default();
        let ctx = RenderContext::new(&snapshot, fetched());
        let action = ActionStatus {
            cost: Some(ActionCost::default()),
            expected_rewards: Some(Rewards {
                gold: 10,
                ..Default::default()
            }),
            ..unlocked(None)
        };
        let card = available(render("work", &action, &ctx));
        assert!(card.cost.is_none());
        assert_eq!(card.rewards.map(|r| r.gold), Some(10));
    }
}
