//! Action Service - POSTs for server-defined actions.
//!
//! Every call here both performs the action and returns its result; the client
//! never computes rewards or costs itself.

use serde_json::{Map, Value};

use kingdom_domain::KingdomId;
use kingdom_shared::{routes, ActionOutcome, InitiateBattleRequest};

use crate::application::api::Api;
use crate::ports::outbound::ApiError;

#[derive(Clone)]
pub struct ActionService {
    api: Api,
}

impl ActionService {
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    /// Generic action: POST the server-computed payload (or `{}`) to its endpoint.
    pub async fn perform(
        &self,
        endpoint: &str,
        payload: Option<&Map<String, Value>>,
    ) -> Result<ActionOutcome, ApiError> {
        let body = Value::Object(payload.cloned().unwrap_or_default());
        self.api.post_value(endpoint, &body).await
    }

    pub async fn initiate_battle(
        &self,
        endpoint: Option<&str>,
        target: &KingdomId,
    ) -> Result<ActionOutcome, ApiError> {
        let endpoint = endpoint
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(routes::INITIATE_BATTLE);
        let body = InitiateBattleRequest {
            target_kingdom_id: target.clone(),
        };
        self.api.post(endpoint, &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    use crate::ports::outbound::MockRawApiPort;

    #[tokio::test]
    async fn perform_sends_empty_object_without_payload() {
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json()
            .withf(|path, body| path == "/actions/farm" && *body == json!({}))
            .times(1)
            .returning(|_, _| Ok(json!({"message": "Harvested", "rewards": {"gold": 8}})));
        let svc = ActionService::new(Api::new(Arc::new(raw)));

        let outcome = svc.perform("/actions/farm", None).await.unwrap();
        assert_eq!(outcome.message, "Harvested");
        assert_eq!(outcome.rewards.map(|r| r.gold), Some(8));
    }

    #[tokio::test]
    async fn perform_forwards_server_payload() {
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json()
            .withf(|_, body| *body == json!({"building": "farm", "tier": 2}))
            .times(1)
            .returning(|_, _| Ok(json!({"message": "ok"})));
        let svc = ActionService::new(Api::new(Arc::new(raw)));

        let payload = json!({"building": "farm", "tier": 2});
        let payload = payload.as_object().unwrap();
        svc.perform("/actions/upgrade", Some(payload)).await.unwrap();
    }

    #[tokio::test]
    async fn battle_defaults_to_fixed_route() {
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json()
            .withf(|path, body| {
                path == routes::INITIATE_BATTLE && *body == json!({"target_kingdom_id": "k-9"})
            })
            .times(1)
            .returning(|_, _| Ok(json!({"success": true, "message": "War", "battle_id": 4})));
        let svc = ActionService::new(Api::new(Arc::new(raw)));

        let outcome = svc
            .initiate_battle(Some("  "), &KingdomId::new("k-9"))
            .await
            .unwrap();
        assert_eq!(outcome.battle_id.map(|b| b.get()), Some(4));
    }
}
