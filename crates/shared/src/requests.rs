//! Request bodies for the fixed routes.

use serde::{Deserialize, Serialize};

use kingdom_domain::{AllianceId, KingdomId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitiateBattleRequest {
    pub target_kingdom_id: KingdomId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposeAllianceRequest {
    /// Named for the empire on the wire, but the backend resolves the owning
    /// empire itself; the client sends the target kingdom id it rendered.
    pub target_empire_id: KingdomId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllianceDecisionRequest {
    pub alliance_id: AllianceId,
}
