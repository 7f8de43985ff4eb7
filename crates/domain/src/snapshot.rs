//! Action status snapshot - the full action/contract/cooldown state the
//! backend returns in one call.
//!
//! Every value in this module is rebuilt from scratch on each fetch and never
//! mutated in place afterwards.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::cooldown::Cooldown;
use crate::ids::{AllianceId, BattleId, ContractId, EmpireId, KingdomId};

/// Everything the Actions screen needs for the player's current context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionStatusSnapshot {
    /// Server-defined groupings, in display order.
    #[serde(deserialize_with = "null_as_default")]
    pub slots: Vec<SlotInfo>,
    /// Action key to status. Keys are arbitrary server-chosen identifiers.
    #[serde(deserialize_with = "null_as_default")]
    pub actions: BTreeMap<String, ActionStatus>,
    #[serde(deserialize_with = "null_as_default")]
    pub training_contracts: Vec<Contract>,
    #[serde(deserialize_with = "null_as_default")]
    pub workshop_contracts: Vec<Contract>,
    #[serde(deserialize_with = "null_as_default")]
    pub property_upgrade_contracts: Vec<Contract>,
    pub pending_alliance_requests: Option<Vec<AllianceRequest>>,
    #[serde(deserialize_with = "null_as_default")]
    pub global_cooldown: Cooldown,
}

/// `null` decodes like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ActionStatusSnapshot {
    /// Look up an action by key. Blank keys never resolve.
    pub fn action(&self, key: &str) -> Option<&ActionStatus> {
        if key.trim().is_empty() {
            return None;
        }
        self.actions.get(key)
    }

    /// The contract collection backing a contract-bearing slot type.
    pub fn contracts_for(&self, content_type: SlotContentType) -> &[Contract] {
        match content_type {
            SlotContentType::TrainingContracts => &self.training_contracts,
            SlotContentType::WorkshopContracts => &self.workshop_contracts,
            SlotContentType::BuildingContracts => &self.property_upgrade_contracts,
            SlotContentType::Actions | SlotContentType::Unknown => &[],
        }
    }

    pub fn pending_alliance_requests(&self) -> &[AllianceRequest] {
        self.pending_alliance_requests.as_deref().unwrap_or(&[])
    }
}

/// What kind of content a slot holds. Dispatch happens on this, never on the slot id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotContentType {
    TrainingContracts,
    WorkshopContracts,
    BuildingContracts,
    Actions,
    /// Content type introduced server-side that this client does not know yet.
    #[serde(other)]
    Unknown,
}

impl SlotContentType {
    pub fn is_contracts(self) -> bool {
        matches!(
            self,
            SlotContentType::TrainingContracts
                | SlotContentType::WorkshopContracts
                | SlotContentType::BuildingContracts
        )
    }
}

/// A server-defined named region of the Actions screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotInfo {
    pub id: String,
    pub content_type: SlotContentType,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Action keys; only meaningful when `content_type` is `Actions`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub actions: Vec<String>,
}

impl SlotInfo {
    pub fn new(id: impl Into<String>, content_type: SlotContentType) -> Self {
        Self {
            id: id.into(),
            content_type,
            display_name: None,
            icon: None,
            description: None,
            actions: Vec::new(),
        }
    }

    pub fn with_actions<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actions = keys.into_iter().map(Into::into).collect();
        self
    }
}

/// Status of a single server-defined action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionStatus {
    pub unlocked: bool,
    /// Interaction behaviour tag, e.g. `initiate_battle`. Unknown values fall
    /// back to the generic POST path.
    pub handler: Option<String>,
    /// POST target for the generic path.
    pub endpoint: Option<String>,
    pub display_order: Option<i32>,
    pub category: Option<String>,
    pub title: Option<String>,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub requirement_description: Option<String>,
    pub ready: Option<bool>,
    pub seconds_remaining: Option<i64>,
    pub cooldown_minutes: Option<f64>,
    pub battle_id: Option<BattleId>,
    pub target_kingdom_id: Option<KingdomId>,
    pub target_kingdom_name: Option<String>,
    pub cost: Option<ActionCost>,
    pub expected_rewards: Option<Rewards>,
    /// Body the server pre-computed for the generic POST.
    pub payload: Option<serde_json::Map<String, serde_json::Value>>,
}

impl ActionStatus {
    /// Per-action cooldown, if the server reported one.
    pub fn cooldown(&self) -> Option<Cooldown> {
        match (self.ready, self.seconds_remaining) {
            (None, None) => None,
            (ready, remaining) => {
                let remaining = remaining.unwrap_or(0).max(0);
                Some(Cooldown {
                    ready: ready.unwrap_or(remaining == 0),
                    seconds_remaining: remaining,
                    blocking_action: None,
                })
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionCost {
    pub gold: i64,
    pub food: i64,
}

impl ActionCost {
    pub fn is_free(&self) -> bool {
        self.gold == 0 && self.food == 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rewards {
    pub gold: i64,
    pub reputation: i64,
    pub experience: i64,
}

impl Rewards {
    pub fn is_empty(&self) -> bool {
        self.gold == 0 && self.reputation == 0 && self.experience == 0
    }
}

/// In-progress or finished background task (training, crafting, building).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: ContractId,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    pub status: ContractStatus,
    #[serde(default)]
    pub actions_completed: u32,
    #[serde(default)]
    pub actions_required: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Contract {
    pub fn is_completed(&self) -> bool {
        self.status == ContractStatus::Completed
    }

    /// Fraction of work done, clamped to `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.actions_required == 0 {
            return 0.0;
        }
        (f64::from(self.actions_completed) / f64::from(self.actions_required)).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    InProgress,
    Ready,
    Completed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

/// An alliance proposal waiting for the player's answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllianceRequest {
    pub id: AllianceId,
    pub proposer_empire_id: EmpireId,
    #[serde(default)]
    pub proposer_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}
