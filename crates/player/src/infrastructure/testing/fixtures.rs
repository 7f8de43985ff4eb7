//! Simple test fixtures used across unit tests.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};

use crate::ports::outbound::ApiError;

pub fn api_request_failed(msg: &str) -> ApiError {
    ApiError::RequestFailed(msg.to_string())
}

/// Fixed reference time so countdown assertions are exact.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// One `economy` actions slot holding `patrol` (order 2) and `farm` (order 1),
/// plus a contracts slot with nothing active.
pub fn farm_patrol_snapshot_json() -> Value {
    json!({
        "slots": [
            {
                "id": "economy",
                "content_type": "actions",
                "display_name": "Economy",
                "actions": ["patrol", "farm"]
            },
            {
                "id": "training",
                "content_type": "training_contracts"
            }
        ],
        "actions": {
            "farm": {
                "unlocked": true,
                "endpoint": "/actions/farm",
                "display_order": 1,
                "category": "economy",
                "title": "Farm",
                "ready": true,
                "seconds_remaining": 0
            },
            "patrol": {
                "unlocked": true,
                "endpoint": "/actions/patrol",
                "display_order": 2,
                "category": "economy",
                "ready": false,
                "seconds_remaining": 90
            }
        },
        "training_contracts": [],
        "global_cooldown": {"ready": true, "seconds_remaining": 0}
    })
}

pub fn player_state_json(gold: i64, reputation: i64) -> Value {
    json!({
        "gold": gold,
        "reputation": reputation,
        "experience": 0,
        "level": 1,
        "home_kingdom_id": "k-home",
        "current_kingdom_id": "k-home",
        "current_kingdom_name": "Hearthmoor"
    })
}
