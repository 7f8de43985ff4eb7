//! Alliance Service - propose, accept and decline alliances.

use kingdom_domain::{AllianceId, KingdomId};
use kingdom_shared::{
    routes, AllianceDecisionRequest, AllianceResponse, ProposeAllianceRequest,
};

use crate::application::api::Api;
use crate::ports::outbound::ApiError;

#[derive(Clone)]
pub struct AllianceService {
    api: Api,
}

impl AllianceService {
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    pub async fn propose(&self, target: &KingdomId) -> Result<AllianceResponse, ApiError> {
        let body = ProposeAllianceRequest {
            target_empire_id: target.clone(),
        };
        self.api.post(routes::PROPOSE_ALLIANCE, &body).await
    }

    pub async fn accept(&self, alliance_id: AllianceId) -> Result<AllianceResponse, ApiError> {
        self.api
            .post(routes::ACCEPT_ALLIANCE, &AllianceDecisionRequest { alliance_id })
            .await
    }

    pub async fn decline(&self, alliance_id: AllianceId) -> Result<AllianceResponse, ApiError> {
        self.api
            .post(routes::DECLINE_ALLIANCE, &AllianceDecisionRequest { alliance_id })
            .await
    }
}
