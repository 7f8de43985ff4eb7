//! Wire contract between the kingdom backend and the client.
//!
//! The snapshot itself is defined in `kingdom-domain`; this crate adds the
//! request bodies, response envelopes and fixed routes around it.

pub mod requests;
pub mod responses;
pub mod routes;

pub use kingdom_domain::ActionStatusSnapshot;
pub use requests::{AllianceDecisionRequest, InitiateBattleRequest, ProposeAllianceRequest};
pub use responses::{error_message, ActionOutcome, AllianceResponse, PlayerState};
