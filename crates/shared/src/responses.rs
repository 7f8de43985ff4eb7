//! Response types returned by the backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use kingdom_domain::{BattleId, KingdomId, Rewards};

fn default_true() -> bool {
    true
}

/// Result of any action POST.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// Absent means success; the backend only spells it out on failure.
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewards: Option<Rewards>,
    /// Set when the action opened a battle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battle_id: Option<BattleId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllianceResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

impl From<AllianceResponse> for ActionOutcome {
    fn from(response: AllianceResponse) -> Self {
        Self {
            success: response.success,
            message: response.message,
            rewards: None,
            battle_id: None,
        }
    }
}

/// Player stats the client caches between snapshot refreshes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerState {
    pub gold: i64,
    pub reputation: i64,
    pub experience: i64,
    pub level: i64,
    pub home_kingdom_id: Option<KingdomId>,
    pub current_kingdom_id: Option<KingdomId>,
    pub current_kingdom_name: Option<String>,
}

/// Extract the user-facing message from an error response body.
///
/// The backend is not consistent about the field name; `detail`, `message`
/// and `error` are tried in that order.
pub fn error_message(body: &Value) -> Option<String> {
    ["detail", "message", "error"].iter().find_map(|field| {
        body.get(*field)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}
